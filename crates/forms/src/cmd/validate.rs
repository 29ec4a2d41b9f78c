use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;

use super::load_config;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Form definition (JSON)
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

pub fn run(args: &ValidateArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let problems = config.problems();
    if problems.is_empty() {
        println!("{}: ok", args.config.display());
        return Ok(());
    }
    for problem in &problems {
        println!("{}: {problem}", args.config.display());
    }
    bail!("{} problem(s) found in {}", problems.len(), args.config.display());
}
