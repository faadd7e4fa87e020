pub mod toml_config;

pub use toml_config::ScenarioConfig;

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "business-mediator")]
#[command(about = "Runs an estate owner, grocery store and restaurant through a shared mediator")]
pub struct CliConfig {
    #[arg(short, long, help = "Scenario TOML file (runs the built-in demo when omitted)")]
    pub config: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Print the steps without running them")]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn load_scenario(&self) -> crate::utils::error::Result<ScenarioConfig> {
        match &self.config {
            Some(path) => ScenarioConfig::from_file(path),
            None => Ok(ScenarioConfig::demo()),
        }
    }
}
