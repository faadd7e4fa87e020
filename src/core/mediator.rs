use crate::core::{EstateOwner, GroceryStore, Mediator, Restaurant, Result};
use crate::utils::error::TownError;
use std::cell::Cell;
use std::rc::{Rc, Weak};

pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Rent changes reach the grocery store at 1/10000 of the delta.
const GROCERY_RENT_DIVISOR: i64 = 10000;
/// Rent changes reach the restaurant at 1/1000 of the delta.
const RESTAURANT_RENT_DIVISOR: i64 = 1000;

/// Holds the cross-business rules. The businesses only see it as a
/// [`Mediator`]; none of them references another business.
pub struct BusinessMediator {
    estate_owner: Rc<EstateOwner>,
    grocery_store: Rc<GroceryStore>,
    restaurant: Rc<Restaurant>,
    depth: Cell<usize>,
    max_depth: usize,
}

impl BusinessMediator {
    pub fn new(
        estate_owner: Rc<EstateOwner>,
        grocery_store: Rc<GroceryStore>,
        restaurant: Rc<Restaurant>,
    ) -> Rc<Self> {
        Self::with_max_depth(estate_owner, grocery_store, restaurant, DEFAULT_MAX_DEPTH)
    }

    /// 建立 mediator 並向三個商家註冊自己，先前註冊的 mediator 會被丟棄
    pub fn with_max_depth(
        estate_owner: Rc<EstateOwner>,
        grocery_store: Rc<GroceryStore>,
        restaurant: Rc<Restaurant>,
        max_depth: usize,
    ) -> Rc<Self> {
        let mediator = Rc::new(Self {
            estate_owner,
            grocery_store,
            restaurant,
            depth: Cell::new(0),
            max_depth,
        });

        let weak: Weak<dyn Mediator> = Rc::downgrade(&mediator) as Weak<dyn Mediator>;
        mediator.estate_owner.set_mediator(Some(weak.clone()));
        mediator.grocery_store.set_mediator(Some(weak.clone()));
        mediator.restaurant.set_mediator(Some(weak));

        tracing::debug!(max_depth, "business mediator registered");
        mediator
    }

    pub fn estate_owner(&self) -> &Rc<EstateOwner> {
        &self.estate_owner
    }

    pub fn grocery_store(&self) -> &Rc<GroceryStore> {
        &self.grocery_store
    }

    pub fn restaurant(&self) -> &Rc<Restaurant> {
        &self.restaurant
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Runs one propagation rule, refusing to nest past `max_depth`.
    fn propagate<F>(&self, event: &'static str, rule: F) -> Result<()>
    where
        F: FnOnce() -> Result<()>,
    {
        let depth = self.depth.get() + 1;
        if depth > self.max_depth {
            tracing::error!(event, max_depth = self.max_depth, "propagation depth exceeded");
            return Err(TownError::PropagationTooDeep {
                event,
                max_depth: self.max_depth,
            });
        }

        self.depth.set(depth);
        let result = rule();
        self.depth.set(depth - 1);
        result
    }
}

impl Mediator for BusinessMediator {
    fn estate_rent_price_changed(&self, old_price: i32, new_price: i32) -> Result<()> {
        tracing::debug!(old_price, new_price, "estate rent price changed");
        self.propagate("estate_rent_price_changed", || {
            // i64 so that any pair of i32 rents has a representable delta
            let delta = i64::from(new_price) - i64::from(old_price);
            self.grocery_store
                .alter_price((delta / GROCERY_RENT_DIVISOR) as i32)?;
            self.restaurant
                .alter_price((delta / RESTAURANT_RENT_DIVISOR) as i32);
            Ok(())
        })
    }

    fn grocery_stock_changed(&self, current_stock: i32) -> Result<()> {
        tracing::debug!(current_stock, "grocery stock changed");
        self.propagate("grocery_stock_changed", || {
            self.restaurant.set_is_opened(current_stock > 0);
            Ok(())
        })
    }

    fn grocery_price_changed(&self, old_price: i32, new_price: i32) -> Result<()> {
        tracing::debug!(old_price, new_price, "grocery price changed");
        self.propagate("grocery_price_changed", || {
            self.restaurant.alter_price(new_price.wrapping_sub(old_price));
            Ok(())
        })
    }

    fn food_is_cooked(&self) -> Result<()> {
        tracing::debug!("food is cooked");
        self.propagate("food_is_cooked", || self.grocery_store.sell().map(|_| ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wired() -> (Rc<EstateOwner>, Rc<GroceryStore>, Rc<Restaurant>, Rc<BusinessMediator>) {
        let owner = Rc::new(EstateOwner::new());
        let grocery = Rc::new(GroceryStore::new());
        let restaurant = Rc::new(Restaurant::new());
        let mediator = BusinessMediator::new(owner.clone(), grocery.clone(), restaurant.clone());
        (owner, grocery, restaurant, mediator)
    }

    #[test]
    fn test_registers_with_every_business() {
        let (owner, grocery, restaurant, mediator) = wired();
        let expected: Rc<dyn Mediator> = mediator.clone();

        for previous in [
            owner.set_mediator(None),
            grocery.set_mediator(None),
            restaurant.set_mediator(None),
        ] {
            let previous = previous.and_then(|w| w.upgrade()).unwrap();
            assert!(Rc::ptr_eq(&previous, &expected));
        }
    }

    #[test]
    fn test_rent_change_truncates_toward_zero() {
        let (owner, grocery, restaurant, _mediator) = wired();

        owner.set_rent_price(1000).unwrap(); // delta -9000
        assert_eq!(grocery.price(), 100);
        assert_eq!(restaurant.price(), 491);

        owner.set_rent_price(100000).unwrap(); // delta +99000
        assert_eq!(grocery.price(), 109);
        // 491 + 99 from rent, +9 passed through from the grocery price change
        assert_eq!(restaurant.price(), 599);
    }

    #[test]
    fn test_grocery_price_passes_through_fully() {
        let (_owner, grocery, restaurant, _mediator) = wired();
        grocery.alter_price(100).unwrap();
        assert_eq!(restaurant.price(), 600);
        grocery.alter_price(-250).unwrap();
        assert_eq!(restaurant.price(), 350);
    }

    #[test]
    fn test_stock_drives_opening_state() {
        let (_owner, grocery, restaurant, _mediator) = wired();
        grocery.supply(0).unwrap();
        assert!(!restaurant.is_opened());
        grocery.supply(1).unwrap();
        assert!(restaurant.is_opened());
        grocery.sell().unwrap();
        assert!(!restaurant.is_opened());
    }

    #[test]
    fn test_cooking_consumes_stock() {
        let (_owner, grocery, restaurant, _mediator) = wired();
        grocery.supply(2).unwrap();
        assert_eq!(restaurant.cook_food().unwrap(), 500);
        assert_eq!(grocery.stock(), 1);
        assert!(restaurant.is_opened());
    }

    #[test]
    fn test_out_of_stock_reaches_cook_caller() {
        let (_owner, grocery, restaurant, _mediator) = wired();
        // default state: opened but no stock, never synced by a stock change
        let err = restaurant.cook_food().unwrap_err();
        assert!(matches!(err, TownError::OutOfStock { stock: 0 }));
        assert_eq!(grocery.stock(), 0);
    }

    #[test]
    fn test_depth_guard_rejects_deep_chains() {
        let owner = Rc::new(EstateOwner::new());
        let grocery = Rc::new(GroceryStore::new());
        let restaurant = Rc::new(Restaurant::new());
        let mediator =
            BusinessMediator::with_max_depth(owner.clone(), grocery.clone(), restaurant.clone(), 1);

        // rent -> grocery price -> restaurant needs two levels
        let err = owner.set_rent_price(100000).unwrap_err();
        assert!(matches!(err, TownError::PropagationTooDeep { max_depth: 1, .. }));

        // the counter unwinds, so a one-level chain still works afterwards
        grocery.supply(1).unwrap();
        assert!(restaurant.is_opened());
        assert_eq!(mediator.max_depth(), 1);
    }

    #[test]
    fn test_rent_extremes_pass_through_without_overflow() {
        let (owner, grocery, restaurant, _mediator) = wired();

        // delta = i32::MIN - 10000 = -2147493648
        assert_eq!(owner.set_rent_price(i32::MIN).unwrap(), 10000);
        assert_eq!(grocery.price(), 100 - 214749);
        assert_eq!(restaurant.price(), 500 - 214749 - 2147493);

        // delta = i32::MAX - i32::MIN = 4294967295
        assert_eq!(owner.set_rent_price(i32::MAX).unwrap(), i32::MIN);
        assert_eq!(grocery.price(), 100 - 214749 + 429496);
        assert_eq!(restaurant.price(), 500 - 214749 - 2147493 + 429496 + 4294967);
    }

    #[test]
    fn test_grocery_price_overflow_wraps_through_to_restaurant() {
        let (_owner, grocery, restaurant, _mediator) = wired();

        assert_eq!(grocery.alter_price(i32::MAX).unwrap(), 100i32.wrapping_add(i32::MAX));
        assert_eq!(restaurant.price(), 500i32.wrapping_add(i32::MAX));
    }

    #[test]
    fn test_dropped_mediator_leaves_businesses_standalone() {
        let (owner, grocery, restaurant, mediator) = wired();
        drop(mediator);

        grocery.supply(0).unwrap();
        assert!(restaurant.is_opened());
        owner.set_rent_price(0).unwrap();
        assert_eq!(restaurant.price(), 500);
    }
}
