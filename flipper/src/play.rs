//! Interactive text session for `flipper play`.
//!
//! Reads one command per line and writes plain-text responses. Input and
//! output are generic so the loop can be driven from tests.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::game::{FlipOutcome, TurnOutcome, check_vertex_limit};
use crate::core::graph::Edge;
use crate::core::partition::{FlipSelection, PartitionIndex};
use crate::render::{render_graph, render_partitions, render_state};
use crate::session::Session;

const HELP: &str = "\
commands:
  part <1-3> <ids>   set a partition, e.g. `part 1 0,2,5`
  flip <i> <j>       flip edges between partitions i and j
  within <i>         flip edges inside partition i
  done               end flipping, the runner moves
  show               print snapshots and partitions
  degree <v>         degree and neighbors of v in the current graph
  new [n] [p]        start a new game (3-500 vertices, edge probability)
  help               this text
  quit               leave
";

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayEnd {
    /// The last game ended with the runner isolated.
    Won,
    /// The player left (or input ended) before isolating the runner.
    Abandoned,
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Part(PartitionIndex, String),
    Flip(FlipSelection),
    Done,
    Show,
    Degree(usize),
    New(Option<usize>, Option<f64>),
    Help,
    Quit,
}

/// Run commands from `input` until `quit` or end of input.
pub fn run_play<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
) -> Result<PlayEnd> {
    write!(out, "{}", render_state(session.state())).context("write output")?;
    writeln!(out, "type `help` for commands").context("write output")?;

    for line in input.lines() {
        let line = line.context("read input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!(line, "command");
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "error: {}", message).context("write output")?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        apply(session, command, out).context("write output")?;
    }

    Ok(if session.state().winner {
        PlayEnd::Won
    } else {
        PlayEnd::Abandoned
    })
}

fn apply<W: Write>(session: &mut Session, command: Command, out: &mut W) -> std::io::Result<()> {
    match command {
        Command::Part(index, text) => {
            let kept = session.set_partition(index, &text).to_vec();
            writeln!(out, "partition {} = {:?}", index.label(), kept)?;
        }
        Command::Flip(selection) => match session.flip(selection) {
            Ok(FlipOutcome::Applied { removed, added }) => {
                writeln!(out, "removed: {}", join_edges(&removed))?;
                writeln!(out, "added: {}", join_edges(&added))?;
                let state = session.state();
                write!(out, "{}", render_graph("current G_i", &state.current, state.runner_pos))?;
            }
            Ok(FlipOutcome::Ignored) => writeln!(out, "game is over; start a `new` game")?,
            Err(err) => writeln!(out, "error: {}", err)?,
        },
        Command::Done => {
            match session.done_flipping() {
                TurnOutcome::Moved { from, to } => {
                    writeln!(out, "runner moved {} -> {}", from, to)?;
                }
                TurnOutcome::Isolated { from, to } => {
                    writeln!(out, "runner moved {} -> {}", from, to)?;
                    writeln!(out, "Runner is isolated. YOU WIN!")?;
                }
                TurnOutcome::NoRunner => writeln!(out, "no runner on the board")?,
                TurnOutcome::Ignored => {
                    writeln!(out, "game is over; start a `new` game")?;
                    return Ok(());
                }
            }
            write!(out, "{}", render_state(session.state()))?;
        }
        Command::Show => {
            write!(out, "{}", render_state(session.state()))?;
            write!(out, "{}", render_partitions(session.partitions()))?;
        }
        Command::Degree(v) => {
            let current = &session.state().current;
            let neighbors: Vec<usize> = current.neighbors(v).into_iter().collect();
            writeln!(out, "degree({}) = {}, neighbors {:?}", v, current.degree(v), neighbors)?;
        }
        Command::New(vertices, probability) => {
            let state = session.new_game(vertices, probability);
            write!(out, "{}", render_state(state))?;
        }
        Command::Help => write!(out, "{}", HELP)?,
        Command::Quit => {}
    }
    Ok(())
}

fn parse_command(line: &str) -> Result<Command, String> {
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));
    let args: Vec<&str> = rest.split_whitespace().collect();

    match word.to_ascii_lowercase().as_str() {
        "part" => {
            let (label, text) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(label, text)| (label, text.trim()));
            Ok(Command::Part(partition_arg(label)?, text.to_string()))
        }
        "flip" => match args.as_slice() {
            [a, b] => Ok(Command::Flip(FlipSelection::Between(
                partition_arg(a)?,
                partition_arg(b)?,
            ))),
            _ => Err("usage: flip <i> <j>".to_string()),
        },
        "within" => match args.as_slice() {
            [a] => Ok(Command::Flip(FlipSelection::Within(partition_arg(a)?))),
            _ => Err("usage: within <i>".to_string()),
        },
        "done" => Ok(Command::Done),
        "show" => Ok(Command::Show),
        "degree" => match args.as_slice() {
            [v] => v
                .parse()
                .map(Command::Degree)
                .map_err(|_| format!("not a vertex id: {}", v)),
            _ => Err("usage: degree <v>".to_string()),
        },
        "new" => {
            let vertices = args
                .first()
                .map(|n| n.parse::<usize>().map_err(|_| format!("not a vertex count: {}", n)))
                .transpose()?;
            if let Some(n) = vertices {
                check_vertex_limit(n)?;
            }
            let probability = args
                .get(1)
                .map(|p| {
                    p.parse::<f64>()
                        .ok()
                        .filter(|p| (0.0..=1.0).contains(p))
                        .ok_or_else(|| format!("not a probability in [0, 1]: {}", p))
                })
                .transpose()?;
            Ok(Command::New(vertices, probability))
        }
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command `{}` (try `help`)", other)),
    }
}

fn partition_arg(label: &str) -> Result<PartitionIndex, String> {
    PartitionIndex::from_label(label)
        .ok_or_else(|| format!("partition must be 1, 2 or 3, got `{}`", label))
}

fn join_edges(edges: &[Edge]) -> String {
    if edges.is_empty() {
        return "-".to_string();
    }
    edges
        .iter()
        .map(|edge| edge.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
