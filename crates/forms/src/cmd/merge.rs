use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use form_spec::Config;
use tracing::debug;

use super::load_config;

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    /// Definition whose values win
    #[arg(value_name = "BASE")]
    pub base: PathBuf,
    /// Layers that fill in what the base leaves empty, applied in order
    #[arg(value_name = "OVERLAY", required = true)]
    pub overlays: Vec<PathBuf>,
    /// Write the merged definition here instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: &MergeArgs) -> Result<()> {
    let merged = merge_files(args)?;
    let json = merged.to_json_pretty()?;
    match &args.output {
        Some(path) => fs::write(path, json + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

pub fn merge_files(args: &MergeArgs) -> Result<Config> {
    let mut merged = load_config(&args.base)?;
    for overlay in &args.overlays {
        debug!(overlay = %overlay.display(), "merging layer");
        merged.merge(&load_config(overlay)?);
    }
    Ok(merged)
}
