use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::{
    self, inspect::InspectArgs, merge::MergeArgs, payload::PayloadArgs, payload::RenderArgs,
    validate::ValidateArgs,
};

#[derive(Parser, Debug)]
#[command(
    name = "forms",
    about = "Merge, inspect and lay out declarative form definitions",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Layer one or more overlays onto a base definition
    Merge(MergeArgs),
    /// List the qualified names a submission is read from
    Names(InspectArgs),
    /// Show how fields are grouped into grid rows
    Groups(InspectArgs),
    /// List strings that need translating
    Text(InspectArgs),
    /// Check for duplicate names and malformed name formats
    Validate(ValidateArgs),
    /// Print the render payload as JSON
    Payload(PayloadArgs),
    /// Render the payload through a handlebars template
    Render(RenderArgs),
    /// Print the JSON Schema of a form definition
    Schema,
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Merge(args) => cmd::merge::run(&args),
        Commands::Names(args) => cmd::inspect::run_names(&args),
        Commands::Groups(args) => cmd::inspect::run_groups(&args),
        Commands::Text(args) => cmd::inspect::run_text(&args),
        Commands::Validate(args) => cmd::validate::run(&args),
        Commands::Payload(args) => cmd::payload::run(&args),
        Commands::Render(args) => cmd::payload::run_render(&args),
        Commands::Schema => cmd::schema::run(),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
