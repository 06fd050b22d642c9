use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "hydrant",
    about = "Hydrant: populate object graphs from JSON input",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a model schema and list its types
    Check(CheckArgs),
    /// Hydrate one object from a JSON input file
    Hydrate(HydrateArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    /// Schema file (TOML, or JSON with a .json extension)
    pub schema: PathBuf,
}

#[derive(Args)]
pub struct HydrateArgs {
    /// Schema file (TOML, or JSON with a .json extension)
    pub schema: PathBuf,
    /// Type to instantiate
    pub type_name: String,
    /// Input document
    pub input: PathBuf,
    /// Read the input as a JSON:API document
    #[arg(long)]
    pub jsonapi: bool,
    /// Load referenced objects instead of binding placeholders
    #[arg(long)]
    pub verified: bool,
    /// Hydrator configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Existing objects, as a JSON map from type name to a list of objects
    #[arg(long)]
    pub store: Option<PathBuf>,
}
