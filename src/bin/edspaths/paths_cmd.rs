use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use edspaths::*;

use crate::args::{InputArgs, WeightArgs};

/// Options for the `paths` subcommand.
#[derive(Debug, Args)]
pub struct PathsCmd {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub weights: WeightArgs,
    /// Gap-open penalty charged once per path (>= 0).
    #[arg(long, default_value_t=2, allow_hyphen_values=true)]
    pub penalty: Score,
    /// Path to the output file (TSV).
    #[arg(long, default_value="paths.tsv")]
    pub outfile: PathBuf,
}

pub fn run(cmd: PathsCmd) -> Result<()> {
    let text = cmd.input.read_eds()?;
    let params = PathParams { penalty: cmd.penalty, weights: cmd.weights.scheme() };
    let found = max_scoring_paths(&text, &params).context("find paths")?;
    let metrics = PathMetrics::compute(&found.graph, &found.paths);

    println!("score\t{}", found.score);
    println!("paths\t{}", metrics.path_count);
    println!("coverage\t{:.2}", metrics.coverage);
    println!("average_length\t{:.2}", metrics.average_length);

    let mut w = csv::WriterBuilder::new().delimiter(b'\t').from_path(&cmd.outfile)
        .with_context(|| format!("create outfile {}", cmd.outfile.display()))?;
    w.write_record(["path","length","weight","first","last","text","vertices"])?;
    for (i, path) in found.paths.iter().enumerate() {
        let (Some(first), Some(last)) = (path.first(), path.last()) else { continue };
        let vertices: Vec<String> = path.iter().map(|v| v.to_string()).collect();
        w.write_record([
            &(i + 1).to_string(),
            &path.len().to_string(),
            &path_weight(&found.graph, path)?.to_string(),
            &first.to_string(),
            &last.to_string(),
            &path_text(&found.graph, path)?,
            &vertices.join(";"),
        ])?;
    }
    w.flush()?;
    Ok(())
}
