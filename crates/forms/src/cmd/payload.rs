use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use super::load_config;
use crate::builder::{Form, FormBuilder};
use crate::error::FormsError;
use crate::render::{TemplateCache, TemplateKey, render_payload};

const DEFAULT_STYLE: &str = "base";

#[derive(Args, Debug, Clone)]
pub struct PayloadArgs {
    /// Form definition (JSON)
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
    /// Override the theme named by the definition
    #[arg(long, value_name = "THEME")]
    pub theme: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,
    /// Handlebars template rendered with the payload
    #[arg(long, value_name = "FILE")]
    pub template: PathBuf,
}

pub fn run(args: &PayloadArgs) -> Result<()> {
    let form = build_form(args)?;
    println!("{}", serde_json::to_string_pretty(&render_payload(&form))?);
    Ok(())
}

pub fn run_render(args: &RenderArgs) -> Result<()> {
    let form = build_form(&args.payload)?;
    let mut cache = TemplateCache::new();
    let output = render_with(&mut cache, &form, &args.template)?;
    println!("{output}");
    Ok(())
}

pub fn build_form(args: &PayloadArgs) -> Result<Form> {
    let config = load_config(&args.config)?;
    let builder = match &args.theme {
        Some(theme) => FormBuilder::new().with_theme(theme.as_str()),
        None => FormBuilder::new(),
    };
    Ok(builder.build(&config))
}

/// Renders `form` through the template file at `path`, compiling it at most once per cache.
pub fn render_with(cache: &mut TemplateCache, form: &Form, path: &Path) -> Result<String> {
    let style = if form.theme.is_empty() {
        DEFAULT_STYLE
    } else {
        form.theme.as_str()
    };
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let key = TemplateKey::new(style, "form", name);
    cache.get_or_register(&key, || {
        fs::read_to_string(path).map_err(|err| FormsError::Template {
            key: key.to_string(),
            message: err.to_string(),
        })
    })?;
    cache
        .render(&key, &render_payload(form))
        .with_context(|| format!("failed to render {}", path.display()))
}
