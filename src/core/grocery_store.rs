use crate::core::{Mediator, MediatorSlot, Result};
use crate::domain::model::{DEFAULT_GROCERY_PRICE, DEFAULT_GROCERY_STOCK};
use crate::utils::error::TownError;
use std::cell::Cell;
use std::rc::Weak;

/// Grocery store holding a stock count and a unit price.
///
/// Stock never goes below zero: `sell` refuses once it is empty. Price has
/// no floor and may be driven to zero or below by price changes.
#[derive(Debug)]
pub struct GroceryStore {
    mediator: MediatorSlot,
    stock: Cell<i32>,
    price: Cell<i32>,
}

impl GroceryStore {
    pub fn new() -> Self {
        Self::with_state(DEFAULT_GROCERY_STOCK, DEFAULT_GROCERY_PRICE)
    }

    pub fn with_state(stock: i32, price: i32) -> Self {
        Self {
            mediator: MediatorSlot::new(),
            stock: Cell::new(stock.max(0)),
            price: Cell::new(price),
        }
    }

    pub fn set_mediator(&self, mediator: Option<Weak<dyn Mediator>>) -> Option<Weak<dyn Mediator>> {
        self.mediator.replace(mediator)
    }

    pub fn stock(&self) -> i32 {
        self.stock.get()
    }

    pub fn price(&self) -> i32 {
        self.price.get()
    }

    /// Adds `count` units and returns the new stock, saturating at `i32::MAX`.
    pub fn supply(&self, count: u16) -> Result<i32> {
        let stock = self.stock.get().saturating_add(i32::from(count));
        self.stock.set(stock);
        if let Some(mediator) = self.mediator.current() {
            mediator.grocery_stock_changed(stock)?;
        }
        Ok(stock)
    }

    /// Sells one unit and returns the price charged for it.
    pub fn sell(&self) -> Result<i32> {
        let stock = self.stock.get();
        if stock <= 0 {
            tracing::warn!(stock, "grocery store is out of stock");
            return Err(TownError::OutOfStock { stock });
        }

        let price = self.price.get();
        self.stock.set(stock - 1);
        if let Some(mediator) = self.mediator.current() {
            mediator.grocery_stock_changed(stock - 1)?;
        }
        Ok(price)
    }

    /// Shifts the price by `delta` and returns the new price. Wraps on overflow.
    pub fn alter_price(&self, delta: i32) -> Result<i32> {
        let old_price = self.price.get();
        let new_price = old_price.wrapping_add(delta);
        self.price.set(new_price);
        if let Some(mediator) = self.mediator.current() {
            mediator.grocery_price_changed(old_price, new_price)?;
        }
        Ok(new_price)
    }
}

impl Default for GroceryStore {
    fn default() -> Self {
        Self::new()
    }
}
