use crate::core::{ErrorPolicy, Step, TownSettings};
use crate::utils::error::{Result, TownError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub scenario: ScenarioInfo,
    pub town: Option<TownConfig>,
    pub mediator: Option<MediatorConfig>,
    pub error_handling: Option<ErrorHandlingConfig>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TownConfig {
    pub rent_price: Option<i32>,
    pub grocery_stock: Option<i32>,
    pub grocery_price: Option<i32>,
    pub restaurant_price: Option<i32>,
    pub restaurant_opened: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediatorConfig {
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    pub on_step_failure: Option<String>, // "abort" or "continue"
}

impl ScenarioConfig {
    /// 從 TOML 檔案載入場景
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TownError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析場景
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TownError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RENT_PRICE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| {
            TownError::ConfigValidationError {
                field: "environment".to_string(),
                message: e.to_string(),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 內建示範場景：補貨、用餐、調整租金與進貨價格
    pub fn demo() -> Self {
        let steps = vec![
            Step::Supply { count: 1 },
            Step::BuyFood,
            Step::BuyFood,
            Step::Pause,
            Step::Supply { count: 3 },
            Step::ChangeRent { price: 1000 },
            Step::BuyFood,
            Step::ChangeRent { price: 10000 },
            Step::BuyFood,
            Step::ChangeRent { price: 100000 },
            Step::BuyFood,
            Step::Pause,
            Step::Supply { count: 3 },
            Step::ChangeGroceryPrice { delta: 100 },
            Step::BuyFood,
            Step::ChangeRent { price: 10000 },
            Step::BuyFood,
            Step::ChangeGroceryPrice { delta: -100 },
            Step::BuyFood,
            Step::BuyFood,
        ];

        Self {
            scenario: ScenarioInfo {
                name: "demo".to_string(),
                description: Some("Estate owner, grocery store and restaurant".to_string()),
            },
            town: None,
            mediator: None,
            error_handling: None,
            steps,
        }
    }

    pub fn name(&self) -> &str {
        &self.scenario.name
    }

    pub fn town_settings(&self) -> TownSettings {
        let defaults = TownSettings::default();
        let town = self.town.clone().unwrap_or_default();
        TownSettings {
            rent_price: town.rent_price.unwrap_or(defaults.rent_price),
            grocery_stock: town.grocery_stock.unwrap_or(defaults.grocery_stock),
            grocery_price: town.grocery_price.unwrap_or(defaults.grocery_price),
            restaurant_price: town.restaurant_price.unwrap_or(defaults.restaurant_price),
            restaurant_opened: town.restaurant_opened.unwrap_or(defaults.restaurant_opened),
            max_depth: self
                .mediator
                .as_ref()
                .and_then(|m| m.max_depth)
                .unwrap_or(defaults.max_depth),
        }
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_handling
            .as_ref()
            .and_then(|e| e.on_step_failure.as_deref())
            .and_then(ErrorPolicy::parse)
            .unwrap_or_default()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("scenario.name", &self.scenario.name)?;

        if let Some(stock) = self.town.as_ref().and_then(|t| t.grocery_stock) {
            validation::validate_non_negative("town.grocery_stock", stock)?;
        }

        if let Some(depth) = self.mediator.as_ref().and_then(|m| m.max_depth) {
            validation::validate_positive_number("mediator.max_depth", depth, 1)?;
        }

        if let Some(policy) = self
            .error_handling
            .as_ref()
            .and_then(|e| e.on_step_failure.as_deref())
        {
            validation::validate_one_of(
                "error_handling.on_step_failure",
                policy,
                &ErrorPolicy::VALUES,
            )?;
        }

        if self.steps.is_empty() {
            return Err(TownError::MissingConfigError {
                field: "steps".to_string(),
            });
        }

        Ok(())
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
