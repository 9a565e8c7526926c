//! Flipper runner game CLI.
//!
//! `flipper init` writes a default `flipper.toml`; `flipper play` starts an
//! interactive game on stdin/stdout using that config plus flag overrides.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use flipper::exit_codes;
use flipper::io::config::{DEFAULT_CONFIG_PATH, GameConfig, load_config, write_config};
use flipper::logging;
use flipper::play::{PlayEnd, run_play};
use flipper::session::Session;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "flipper",
    version,
    about = "Flip edges between vertex groups until the runner is isolated"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
        /// Config file path.
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// Play an interactive game on stdin/stdout.
    Play {
        /// Config file path (defaults apply if it does not exist).
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Number of vertices (at least 3).
        #[arg(short = 'n', long)]
        vertices: Option<usize>,
        /// Probability that a pair of vertices starts out joined.
        #[arg(short, long)]
        probability: Option<f64>,
        /// Seed for reproducible games.
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force, config } => cmd_init(&config, force),
        Command::Play {
            config,
            vertices,
            probability,
            seed,
        } => {
            let mut cfg = load_config(&config)?;
            apply_overrides(&mut cfg, vertices, probability, seed)?;
            cmd_play(cfg)
        }
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<i32> {
    if !force && path.exists() {
        info!(path = %path.display(), "config exists, keeping it");
        println!("{} already exists (use --force to overwrite)", path.display());
        return Ok(exit_codes::OK);
    }
    write_config(path, &GameConfig::default())
        .with_context(|| format!("write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(exit_codes::OK)
}

fn cmd_play(cfg: GameConfig) -> Result<i32> {
    let mut session = Session::new(cfg);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let end = run_play(&mut session, stdin.lock(), &mut stdout)?;
    Ok(match end {
        PlayEnd::Won => exit_codes::OK,
        PlayEnd::Abandoned => exit_codes::ABANDONED,
    })
}

/// Command-line flags win over the config file.
fn apply_overrides(
    cfg: &mut GameConfig,
    vertices: Option<usize>,
    probability: Option<f64>,
    seed: Option<u64>,
) -> Result<()> {
    if let Some(vertices) = vertices {
        cfg.vertices = vertices;
    }
    if let Some(probability) = probability {
        cfg.edge_probability = probability;
    }
    if seed.is_some() {
        cfg.seed = seed;
    }
    if let Err(err) = cfg.validate() {
        bail!("invalid options: {:#}", err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::parse_from(["flipper", "init"]);
        assert!(matches!(cli.command, Command::Init { force: false, .. }));
    }

    #[test]
    fn parse_init_force() {
        let cli = Cli::parse_from(["flipper", "init", "--force"]);
        assert!(matches!(cli.command, Command::Init { force: true, .. }));
    }

    #[test]
    fn parse_play_flags() {
        let cli = Cli::parse_from([
            "flipper",
            "play",
            "-n",
            "8",
            "--probability",
            "0.3",
            "--seed",
            "9",
        ]);
        match cli.command {
            Command::Play {
                config,
                vertices,
                probability,
                seed,
            } => {
                assert_eq!(config, PathBuf::from(DEFAULT_CONFIG_PATH));
                assert_eq!(vertices, Some(8));
                assert_eq!(probability, Some(0.3));
                assert_eq!(seed, Some(9));
            }
            Command::Init { .. } => panic!("expected play"),
        }
    }

    #[test]
    fn overrides_replace_config_values() {
        let mut cfg = GameConfig::default();
        apply_overrides(&mut cfg, Some(12), None, Some(4)).expect("overrides");
        assert_eq!(cfg.vertices, 12);
        assert_eq!(cfg.edge_probability, 0.5);
        assert_eq!(cfg.seed, Some(4));
    }

    #[test]
    fn overrides_are_validated() {
        let mut cfg = GameConfig::default();
        assert!(apply_overrides(&mut cfg, None, Some(-0.1), None).is_err());
    }
}
