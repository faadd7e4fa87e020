pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{OutputFormat, ScenarioConfig};
pub use crate::core::{
    BusinessMediator, ErrorPolicy, EstateOwner, GroceryStore, Mediator, Restaurant,
    ScenarioRunner, Town, TownSettings,
};
pub use utils::error::{Result, TownError};
