use crate::core::mediator::DEFAULT_MAX_DEPTH;
use crate::core::{BusinessMediator, EstateOwner, GroceryStore, Restaurant, Result};
use crate::domain::model::{
    Step, StepOutcome, TownSnapshot, DEFAULT_GROCERY_PRICE, DEFAULT_GROCERY_STOCK,
    DEFAULT_RENT_PRICE, DEFAULT_RESTAURANT_OPENED, DEFAULT_RESTAURANT_PRICE, RESTAURANT_CLOSED,
};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// 城鎮初始狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownSettings {
    pub rent_price: i32,
    pub grocery_stock: i32,
    pub grocery_price: i32,
    pub restaurant_price: i32,
    pub restaurant_opened: bool,
    pub max_depth: usize,
}

impl Default for TownSettings {
    fn default() -> Self {
        Self {
            rent_price: DEFAULT_RENT_PRICE,
            grocery_stock: DEFAULT_GROCERY_STOCK,
            grocery_price: DEFAULT_GROCERY_PRICE,
            restaurant_price: DEFAULT_RESTAURANT_PRICE,
            restaurant_opened: DEFAULT_RESTAURANT_OPENED,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Owns the three businesses and their mediator so they are dropped together.
pub struct Town {
    estate_owner: Rc<EstateOwner>,
    grocery_store: Rc<GroceryStore>,
    restaurant: Rc<Restaurant>,
    mediator: Rc<BusinessMediator>,
}

impl Town {
    pub fn new() -> Self {
        Self::with_settings(&TownSettings::default())
    }

    pub fn with_settings(settings: &TownSettings) -> Self {
        let estate_owner = Rc::new(EstateOwner::with_rent_price(settings.rent_price));
        let grocery_store = Rc::new(GroceryStore::with_state(
            settings.grocery_stock,
            settings.grocery_price,
        ));
        let restaurant = Rc::new(Restaurant::with_state(
            settings.restaurant_opened,
            settings.restaurant_price,
        ));
        let mediator = BusinessMediator::with_max_depth(
            estate_owner.clone(),
            grocery_store.clone(),
            restaurant.clone(),
            settings.max_depth,
        );

        Self {
            estate_owner,
            grocery_store,
            restaurant,
            mediator,
        }
    }

    pub fn estate_owner(&self) -> &EstateOwner {
        &self.estate_owner
    }

    pub fn grocery_store(&self) -> &GroceryStore {
        &self.grocery_store
    }

    pub fn restaurant(&self) -> &Restaurant {
        &self.restaurant
    }

    pub fn mediator(&self) -> &BusinessMediator {
        &self.mediator
    }

    pub fn snapshot(&self) -> TownSnapshot {
        TownSnapshot {
            rent_price: self.estate_owner.rent_price(),
            grocery_stock: self.grocery_store.stock(),
            grocery_price: self.grocery_store.price(),
            restaurant_price: self.restaurant.price(),
            restaurant_opened: self.restaurant.is_opened(),
        }
    }

    pub fn buy_food(&self) -> Result<StepOutcome> {
        let price = self.restaurant.cook_food()?;
        if price == RESTAURANT_CLOSED {
            Ok(StepOutcome::RestaurantClosed)
        } else {
            Ok(StepOutcome::FoodBought { price })
        }
    }

    pub fn supply_grocery(&self, count: u16) -> Result<StepOutcome> {
        let old = self.grocery_store.stock();
        let new = self.grocery_store.supply(count)?;
        Ok(StepOutcome::StockChanged { old, new })
    }

    pub fn change_grocery_price(&self, delta: i32) -> Result<StepOutcome> {
        let old = self.grocery_store.price();
        let new = self.grocery_store.alter_price(delta)?;
        Ok(StepOutcome::GroceryPriceChanged { old, new })
    }

    pub fn change_estate_rent_price(&self, price: i32) -> Result<StepOutcome> {
        let old = self.estate_owner.set_rent_price(price)?;
        Ok(StepOutcome::RentChanged { old, new: price })
    }

    pub fn sell_grocery(&self) -> Result<StepOutcome> {
        let price = self.grocery_store.sell()?;
        Ok(StepOutcome::GrocerySold { price })
    }

    pub fn set_restaurant_opened(&self, opened: bool) -> StepOutcome {
        self.restaurant.set_is_opened(opened);
        StepOutcome::RestaurantOpenedSet { opened }
    }

    pub fn change_restaurant_price(&self, delta: i32) -> StepOutcome {
        let old = self.restaurant.price();
        let new = self.restaurant.alter_price(delta);
        StepOutcome::RestaurantPriceChanged { old, new }
    }

    pub fn apply(&self, step: &Step) -> Result<StepOutcome> {
        match *step {
            Step::Supply { count } => self.supply_grocery(count),
            Step::BuyFood => self.buy_food(),
            Step::ChangeGroceryPrice { delta } => self.change_grocery_price(delta),
            Step::ChangeRent { price } => self.change_estate_rent_price(price),
            Step::SellGrocery => self.sell_grocery(),
            Step::SetRestaurantOpened { opened } => Ok(self.set_restaurant_opened(opened)),
            Step::ChangeRestaurantPrice { delta } => Ok(self.change_restaurant_price(delta)),
            Step::Pause => Ok(StepOutcome::Paused),
        }
    }
}

impl Default for Town {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_seed_businesses() {
        let town = Town::with_settings(&TownSettings {
            rent_price: 2000,
            grocery_stock: 4,
            grocery_price: 80,
            restaurant_price: 300,
            restaurant_opened: false,
            max_depth: 8,
        });

        assert_eq!(
            town.snapshot(),
            TownSnapshot {
                rent_price: 2000,
                grocery_stock: 4,
                grocery_price: 80,
                restaurant_price: 300,
                restaurant_opened: false,
            }
        );
        assert_eq!(town.mediator().max_depth(), 8);
    }

    #[test]
    fn test_helpers_report_old_and_new() {
        let town = Town::new();
        assert_eq!(
            town.supply_grocery(3).unwrap(),
            StepOutcome::StockChanged { old: 0, new: 3 }
        );
        assert_eq!(
            town.change_grocery_price(-20).unwrap(),
            StepOutcome::GroceryPriceChanged { old: 100, new: 80 }
        );
        assert_eq!(
            town.change_estate_rent_price(1000).unwrap(),
            StepOutcome::RentChanged { old: 10000, new: 1000 }
        );
        assert_eq!(
            town.change_restaurant_price(9),
            StepOutcome::RestaurantPriceChanged { old: 471, new: 480 }
        );
    }

    #[test]
    fn test_helpers_survive_extreme_values() {
        let town = Town::new();
        assert_eq!(
            town.change_estate_rent_price(i32::MIN).unwrap(),
            StepOutcome::RentChanged { old: 10000, new: i32::MIN }
        );
        assert_eq!(
            town.change_grocery_price(i32::MAX).unwrap(),
            StepOutcome::GroceryPriceChanged {
                old: 100 - 214749,
                new: (100 - 214749i32).wrapping_add(i32::MAX),
            }
        );
    }

    #[test]
    fn test_buy_food_reports_closed() {
        let town = Town::new();
        town.set_restaurant_opened(false);
        assert_eq!(town.buy_food().unwrap(), StepOutcome::RestaurantClosed);
    }
}
