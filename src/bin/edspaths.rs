//! Command-line interface for the `edspaths` crate.
//!
//! Subcommands are implemented in separate files (modules) under `src/bin/edspaths/`:
//! - `paths_cmd.rs`
//! - `segments_cmd.rs`
//!
//! Shared input and weighting options live in `args.rs`.
use clap::{ArgAction, Parser, Subcommand};
use anyhow::Result;

#[derive(Debug, Parser)]
#[command(name="edspaths", version=env!("CARGO_PKG_VERSION"), about="Maximum-scoring paths through elastic-degenerate strings", disable_help_subcommand=true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action=ArgAction::Count, global=true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find the maximum-scoring set of disjoint paths and write them as TSV.
    Paths(paths_cmd::PathsCmd),
    /// Write the parsed segment/layer matrix with per-character weights as TSV.
    Segments(segments_cmd::SegmentsCmd),
}

#[path = "edspaths/args.rs"] mod args;
#[path = "edspaths/paths_cmd.rs"] mod paths_cmd;
#[path = "edspaths/segments_cmd.rs"] mod segments_cmd;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    match cli.command {
        Command::Paths(cmd) => paths_cmd::run(cmd),
        Command::Segments(cmd) => segments_cmd::run(cmd),
    }
}
