use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "octofhir-tx")]
#[command(about = "OctoFHIR ConceptMap $translate")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./octofhir-tx.toml if present)
    #[arg(short, long, global = true, env = "OCTOFHIR_TX_CONFIG")]
    pub config: Option<String>,

    /// ConceptMap or Bundle JSON file to load (repeatable, added to config mappings)
    #[arg(short, long = "map", global = true)]
    pub maps: Vec<String>,

    /// Output format (overrides output.format)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Log level (overrides logging.level)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

impl OutputFormat {
    /// Parses a configured format name, case-insensitively.
    pub fn from_config(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate a code through the loaded concept maps
    Translate(TranslateArgs),
    /// List the loaded concept maps
    Maps,
}

#[derive(clap::Args, Default)]
pub struct TranslateArgs {
    /// Code to translate
    pub code: Option<String>,
    /// Code system of the code
    #[arg(long)]
    pub system: Option<String>,
    /// Code system version
    #[arg(long)]
    pub version: Option<String>,
    /// Source value set URL
    #[arg(long)]
    pub source: Option<String>,
    /// Target value set URL
    #[arg(long)]
    pub target: Option<String>,
    /// Only report matches in this code system
    #[arg(long)]
    pub target_system: Option<String>,
    /// Only use the concept map with this URL
    #[arg(long)]
    pub url: Option<String>,
    /// Translate from target concepts back to source concepts
    #[arg(long)]
    pub reverse: bool,
    /// Read a Parameters resource from a file ("-" for stdin) instead of flags
    #[arg(long, conflicts_with_all = ["code", "system", "version", "source", "target", "target_system", "url", "reverse"])]
    pub params: Option<String>,
}
