use crate::core::{Mediator, MediatorSlot, Result};
use crate::domain::model::{DEFAULT_RESTAURANT_OPENED, DEFAULT_RESTAURANT_PRICE, RESTAURANT_CLOSED};
use std::cell::Cell;
use std::rc::Weak;

#[derive(Debug)]
pub struct Restaurant {
    mediator: MediatorSlot,
    is_opened: Cell<bool>,
    price: Cell<i32>,
}

impl Restaurant {
    pub fn new() -> Self {
        Self::with_state(DEFAULT_RESTAURANT_OPENED, DEFAULT_RESTAURANT_PRICE)
    }

    pub fn with_state(is_opened: bool, price: i32) -> Self {
        Self {
            mediator: MediatorSlot::new(),
            is_opened: Cell::new(is_opened),
            price: Cell::new(price),
        }
    }

    pub fn set_mediator(&self, mediator: Option<Weak<dyn Mediator>>) -> Option<Weak<dyn Mediator>> {
        self.mediator.replace(mediator)
    }

    pub fn is_opened(&self) -> bool {
        self.is_opened.get()
    }

    pub fn price(&self) -> i32 {
        self.price.get()
    }

    /// 營業中則通知 mediator 並回傳餐點價格；休息中回傳 `RESTAURANT_CLOSED`。
    ///
    /// 價格在通知鏈跑完之後才讀取。
    pub fn cook_food(&self) -> Result<i32> {
        if !self.is_opened.get() {
            return Ok(RESTAURANT_CLOSED);
        }
        if let Some(mediator) = self.mediator.current() {
            mediator.food_is_cooked()?;
        }
        Ok(self.price.get())
    }

    /// Never notifies: restaurant price changes end propagation. Wraps on overflow.
    pub fn alter_price(&self, delta: i32) -> i32 {
        let price = self.price.get().wrapping_add(delta);
        self.price.set(price);
        price
    }

    pub fn set_is_opened(&self, is_opened: bool) {
        self.is_opened.set(is_opened);
    }
}

impl Default for Restaurant {
    fn default() -> Self {
        Self::new()
    }
}
