use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_RENT_PRICE: i32 = 10000;
pub const DEFAULT_GROCERY_STOCK: i32 = 0;
pub const DEFAULT_GROCERY_PRICE: i32 = 100;
pub const DEFAULT_RESTAURANT_PRICE: i32 = 500;
pub const DEFAULT_RESTAURANT_OPENED: bool = true;

/// `cook_food` 在餐廳休息時回傳的值
pub const RESTAURANT_CLOSED: i32 = -1;

/// 一個場景步驟，對應外部呼叫者可以觸發的操作
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Supply { count: u16 },
    BuyFood,
    ChangeGroceryPrice { delta: i32 },
    ChangeRent { price: i32 },
    SellGrocery,
    SetRestaurantOpened { opened: bool },
    ChangeRestaurantPrice { delta: i32 },
    Pause,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepOutcome {
    FoodBought { price: i32 },
    RestaurantClosed,
    StockChanged { old: i32, new: i32 },
    GroceryPriceChanged { old: i32, new: i32 },
    RentChanged { old: i32, new: i32 },
    GrocerySold { price: i32 },
    RestaurantOpenedSet { opened: bool },
    RestaurantPriceChanged { old: i32, new: i32 },
    Paused,
    Failed { reason: String },
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::FoodBought { price } => write!(f, "[BuyFood] food price: {}", price),
            StepOutcome::RestaurantClosed => {
                write!(f, "[BuyFood] restaurant closed: groceries ran out")
            }
            StepOutcome::StockChanged { old, new } => write!(f, "Grocery stock: {} -> {}", old, new),
            StepOutcome::GroceryPriceChanged { old, new } => {
                write!(f, "Grocery price: {} -> {}", old, new)
            }
            StepOutcome::RentChanged { old, new } => write!(f, "Estate rent price: {} -> {}", old, new),
            StepOutcome::GrocerySold { price } => write!(f, "Grocery sold one unit for {}", price),
            StepOutcome::RestaurantOpenedSet { opened } => {
                write!(f, "Restaurant {}", if *opened { "opened" } else { "closed" })
            }
            StepOutcome::RestaurantPriceChanged { old, new } => {
                write!(f, "Restaurant price: {} -> {}", old, new)
            }
            StepOutcome::Paused => Ok(()),
            StepOutcome::Failed { reason } => write!(f, "Step failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownSnapshot {
    pub rent_price: i32,
    pub grocery_stock: i32,
    pub grocery_price: i32,
    pub restaurant_price: i32,
    pub restaurant_opened: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub index: usize,
    pub step: Step,
    pub outcome: StepOutcome,
    pub snapshot: TownSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub name: String,
    pub steps: Vec<StepReport>,
    pub final_state: TownSnapshot,
}

impl ScenarioReport {
    pub fn failures(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::Failed { .. }))
            .count()
    }

    /// 報告輸出為 JSON (`--format json`)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_deserializes_from_tagged_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            steps: Vec<Step>,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
[[steps]]
action = "supply"
count = 3

[[steps]]
action = "buy_food"

[[steps]]
action = "change_rent"
price = 1000
"#,
        )
        .unwrap();

        assert_eq!(
            parsed.steps,
            vec![
                Step::Supply { count: 3 },
                Step::BuyFood,
                Step::ChangeRent { price: 1000 },
            ]
        );
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(
            StepOutcome::FoodBought { price: 500 }.to_string(),
            "[BuyFood] food price: 500"
        );
        assert_eq!(
            StepOutcome::StockChanged { old: 0, new: 1 }.to_string(),
            "Grocery stock: 0 -> 1"
        );
    }
}
