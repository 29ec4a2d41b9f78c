use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use form_spec::{FormElement, Group};

use super::load_config;
use crate::builder::FormBuilder;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Form definition (JSON)
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

pub fn run_names(args: &InspectArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    for name in config.get_names() {
        println!("{name}");
    }
    Ok(())
}

pub fn run_groups(args: &InspectArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let form = FormBuilder::new().build(&config);
    for line in describe_groups(&form.groups()) {
        println!("{line}");
    }
    Ok(())
}

pub fn run_text(args: &InspectArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    for text in config.multilingual_text() {
        println!("{text}");
    }
    Ok(())
}

/// One line per row, nested rows indented under their set.
pub fn describe_groups(groups: &[Group<'_, FormElement>]) -> Vec<String> {
    let mut lines = Vec::new();
    push_rows(groups, "", &mut lines);
    lines
}

fn push_rows(groups: &[Group<'_, FormElement>], indent: &str, lines: &mut Vec<String>) {
    for (idx, group) in groups.iter().enumerate() {
        let cells = group
            .elements
            .iter()
            .map(|element| format!("{}({})", element.name(), element.cols()))
            .collect::<Vec<_>>()
            .join(" ");
        let marker = if group.has_error { " [error]" } else { "" };
        lines.push(format!("{indent}row {}: {cells}{marker}", idx + 1));
        for element in &group.elements {
            match element {
                FormElement::Field(_) => {}
                FormElement::FieldSet(set) => {
                    push_rows(&set.groups(), &format!("{indent}  "), lines);
                }
                FormElement::LangSet(set) => {
                    for language in set.languages() {
                        let nested = format!("{indent}  [{}] ", language.id);
                        push_rows(&language.groups(), &nested, lines);
                    }
                }
            }
        }
    }
}
