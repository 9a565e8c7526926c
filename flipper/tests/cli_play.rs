//! CLI tests for `flipper init` and `flipper play`.
//!
//! Spawns the flipper binary and verifies exit codes and output for won,
//! abandoned and misconfigured sessions.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use flipper::exit_codes;
use flipper::io::config::{GameConfig, load_config};

fn play(dir: &std::path::Path, args: &[&str], script: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_flipper"))
        .current_dir(dir)
        .arg("play")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn flipper");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(script.as_bytes())
        .expect("write script");
    child.wait_with_output().expect("flipper play")
}

#[test]
fn edgeless_game_is_won_on_first_turn() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = play(temp.path(), &["-n", "4", "-p", "0", "-s", "1"], "done\nquit\n");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("YOU WIN!"));
}

#[test]
fn quitting_before_win_is_abandoned() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = play(temp.path(), &["-n", "5", "-p", "1", "-s", "3"], "show\nquit\n");

    assert_eq!(output.status.code(), Some(exit_codes::ABANDONED));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("original G_0 (10 edges)"));
}

#[test]
fn invalid_probability_exits_invalid() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = play(temp.path(), &["-p", "2"], "quit\n");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("edge_probability"));
}

#[test]
fn init_writes_default_config() {
    let temp = tempfile::tempdir().expect("tempdir");
    let status = Command::new(env!("CARGO_BIN_EXE_flipper"))
        .current_dir(temp.path())
        .arg("init")
        .status()
        .expect("flipper init");

    assert_eq!(status.code(), Some(exit_codes::OK));
    let cfg = load_config(&temp.path().join("flipper.toml")).expect("load");
    assert_eq!(cfg, GameConfig::default());
}

#[test]
fn init_keeps_existing_config_and_says_so() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("flipper.toml");
    std::fs::write(&path, "vertices = 9\n").expect("write");
    let output = Command::new(env!("CARGO_BIN_EXE_flipper"))
        .current_dir(temp.path())
        .arg("init")
        .output()
        .expect("flipper init");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("already exists (use --force to overwrite)"));
    assert_eq!(load_config(&path).expect("load").vertices, 9);
}

#[test]
fn oversized_vertex_count_exits_invalid() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = play(temp.path(), &["-n", "1000000"], "quit\n");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("vertices must be at most 500"));
}
