use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use edspaths::*;

use crate::args::{InputArgs, WeightArgs};

/// Options for the `segments` subcommand.
#[derive(Debug, Args)]
pub struct SegmentsCmd {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub weights: WeightArgs,
    /// Path to the output file (TSV).
    #[arg(long, default_value="segments.tsv")]
    pub outfile: PathBuf,
}

pub fn run(cmd: SegmentsCmd) -> Result<()> {
    let text = cmd.input.read_eds()?;
    let scheme = cmd.weights.scheme();
    let matrix = parse_eds(&text, scheme.sentinel).context("parse EDS")?;
    let weights = weight_matrix(&matrix, &scheme);
    // Reject shapes the path search would refuse, so both commands agree on validity.
    BubbleGraph::new(&matrix, &weights).context("build bubble graph")?;

    let mut w = csv::WriterBuilder::new().delimiter(b'\t').from_path(&cmd.outfile)
        .with_context(|| format!("create outfile {}", cmd.outfile.display()))?;
    w.write_record(["segment","layer","text","weights"])?;
    for (s, (layers, layer_weights)) in matrix.iter().zip(&weights).enumerate() {
        for (l, (text, ws)) in layers.iter().zip(layer_weights).enumerate() {
            let ws: Vec<String> = ws.iter().map(|x| x.to_string()).collect();
            w.write_record([&s.to_string(), &l.to_string(), text, &ws.join(",")])?;
        }
    }
    w.flush()?;
    log::info!("wrote {} segments to {}", matrix.len(), cmd.outfile.display());
    Ok(())
}
