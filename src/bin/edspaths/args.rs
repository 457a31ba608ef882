use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use edspaths::{Score, WeightScheme};

/// Where the EDS text comes from.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// EDS text file. If omitted, reads the EDS from stdin.
    #[arg(long, value_name="FILE")]
    pub input: Option<PathBuf>,
}

/// Per-character weighting options.
#[derive(Debug, Args)]
pub struct WeightArgs {
    /// Weight of a target base.
    #[arg(long, default_value_t=1, allow_hyphen_values=true)]
    pub match_score: Score,
    /// Weight of any other non-sentinel character.
    #[arg(long, default_value_t=-1, allow_hyphen_values=true)]
    pub mismatch: Score,
    /// Sentinel character (weight 0; stands in for empty variants).
    #[arg(long, default_value_t='_')]
    pub sentinel: char,
    /// Target bases scored with --match-score (case-insensitive).
    #[arg(long, default_value="GC")]
    pub targets: String,
}

impl WeightArgs {
    pub fn scheme(&self) -> WeightScheme {
        WeightScheme {
            match_score: self.match_score,
            non_match: self.mismatch,
            sentinel: self.sentinel,
            targets: self.targets.clone(),
        }
    }
}

impl InputArgs {
    /// Read the EDS, with surrounding whitespace removed.
    pub fn read_eds(&self) -> Result<String> {
        let mut s = String::new();
        match &self.input {
            Some(p) => {
                File::open(p).with_context(|| format!("open EDS: {}", p.display()))?.read_to_string(&mut s)
                    .with_context(|| format!("read EDS: {}", p.display()))?;
            }
            None => {
                io::stdin().read_to_string(&mut s).context("read EDS from stdin")?;
            }
        }
        let text = s.trim();
        if text.is_empty() {
            anyhow::bail!("no EDS text found");
        }
        Ok(text.to_string())
    }
}
