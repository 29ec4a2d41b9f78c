pub mod inspect;
pub mod merge;
pub mod payload;
pub mod schema;
pub mod validate;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use form_spec::Config;

pub(crate) fn load_config(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Config::from_json_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
