use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use aqua_verify::CaseType;

#[derive(Parser, Debug)]
#[command(
    name = "aqua-verify",
    version,
    about = "Client for the Aqua Verify building-permit compliance service"
)]
pub struct Cli {
    /// Backend API root; overrides `api_base_url` from the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload documents and print the compliance report
    Analyze(AnalyzeArgs),
    /// Ask the assistant a one-off question without report context
    Chat(ChatArgs),
    /// Check that the backend is reachable
    Health,
    /// Show or change the stored configuration
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Documents to analyze (.pdf, .docx, .doc)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[arg(long, value_enum)]
    pub case_type: Option<CaseTypeArg>,

    /// Print the raw report JSON instead of the formatted view
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Open an interactive conversation about the report
    #[arg(long, default_value_t = false)]
    pub chat: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ChatArgs {
    pub message: String,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    Show,
    SetBaseUrl { url: String },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CaseTypeArg {
    /// Permis de construire
    Pc,
    /// Permis d'aménager
    Pa,
}

impl From<CaseTypeArg> for CaseType {
    fn from(arg: CaseTypeArg) -> Self {
        match arg {
            CaseTypeArg::Pc => CaseType::PC,
            CaseTypeArg::Pa => CaseType::PA,
        }
    }
}
