#![warn(clippy::pedantic)]

mod config;
mod render;

use std::{
    io::{self, BufRead, Write},
    ops::ControlFlow,
    path::PathBuf,
};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use cube_core::{CubeEngine, CubeState, parse_sequence};
use env_logger::TimestampPrecision;
use log::{LevelFilter, debug, info};
use owo_colors::OwoColorize;

use crate::{config::Config, render::Output};

/// Turns a virtual 3x3x3 cube
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// A configuration file in TOML format.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    log_level: u8,

    /// Print states in the JSON wire format instead of as a net.
    #[arg(long, global = true)]
    json: bool,

    /// Draw the net with letters instead of terminal colors.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the solved cube.
    Show,
    /// Apply a sequence of moves, e.g. "R U R' U'".
    Apply {
        /// The moves to apply, separated by whitespace.
        sequence: String,
        /// Starting state as JSON, six lists of nine color names.
        #[arg(long)]
        state: Option<String>,
    },
    /// Scramble a solved cube with random moves.
    Scramble {
        /// Number of moves. Defaults to the configured scramble length.
        #[arg(long, short = 'n')]
        count: Option<usize>,
        /// Seed for reproducible scrambles.
        #[arg(long, short = 's')]
        seed: Option<u64>,
    },
    /// Read moves from stdin line by line.
    Repl,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.log_level {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = Config::load(cli.config.as_deref())?;
    let output = if cli.json {
        Output::Json
    } else if cli.plain {
        Output::Plain
    } else {
        Output::Color
    };

    let mut engine = CubeEngine::new(config.scheme);

    match cli.command {
        Commands::Show => {
            print!("{}", render::state(engine.state(), output)?);
        }
        Commands::Apply { sequence, state } => {
            if let Some(state) = state {
                let state = serde_json::from_str::<CubeState>(&state)
                    .wrap_err("Failed to parse the starting state")?;
                engine.load_state(state);
            }
            let moves = parse_sequence(&sequence)?;
            for move_ in moves {
                engine.apply_move(move_);
            }
            print!("{}", render::state(engine.state(), output)?);
        }
        Commands::Scramble { count, seed } => {
            let mut rng = match seed {
                Some(seed) => fastrand::Rng::with_seed(seed),
                None => fastrand::Rng::new(),
            };
            let count = count.unwrap_or(config.scramble_length);
            let scramble = engine.scramble(count, &mut rng);
            print!(
                "{}",
                render::scramble(&scramble.moves, &scramble.state, output)?
            );
        }
        Commands::Repl => {
            eprintln!("Enter moves, or one of: reset, undo, state, exit");
            run_repl(&mut engine, io::stdin().lock(), io::stdout().lock(), output)?;
        }
    }

    Ok(())
}

/// Handle one line of REPL input. Breaks on `exit`.
fn repl_line(
    engine: &mut CubeEngine,
    line: &str,
    out: &mut impl Write,
    output: Output,
) -> color_eyre::Result<ControlFlow<()>> {
    let line = line.trim();
    debug!(target: "repl", "Read {line:?}");

    match line {
        "" => return Ok(ControlFlow::Continue(())),
        "exit" | "quit" => return Ok(ControlFlow::Break(())),
        "state" => {}
        "reset" => {
            engine.reset();
        }
        "undo" => match engine.undo() {
            Some(move_) => info!(target: "repl", "Undid {move_}"),
            None => {
                writeln!(out, "{}", "Nothing to undo".yellow())?;
                return Ok(ControlFlow::Continue(()));
            }
        },
        // The whole line is parsed first so a bad token applies nothing
        _ => match parse_sequence(line) {
            Ok(moves) => {
                for move_ in moves {
                    engine.apply_move(move_);
                }
            }
            Err(e) => {
                writeln!(out, "{}", e.red())?;
                return Ok(ControlFlow::Continue(()));
            }
        },
    }

    write!(out, "{}", render::state(engine.state(), output)?)?;
    if engine.is_solved() && !engine.history().is_empty() {
        writeln!(out, "{}", "Solved!".green())?;
    }
    Ok(ControlFlow::Continue(()))
}

fn run_repl(
    engine: &mut CubeEngine,
    input: impl BufRead,
    mut out: impl Write,
    output: Output,
) -> color_eyre::Result<()> {
    write!(out, "{}", render::state(engine.state(), output)?)?;

    for line in input.lines() {
        if repl_line(engine, &line?, &mut out, output)?.is_break() {
            break;
        }
        out.flush()?;
    }

    Ok(())
}
