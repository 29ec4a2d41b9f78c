use anyhow::Result;
use form_spec::Config;
use schemars::schema_for;

pub fn run() -> Result<()> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
