use crate::core::{Mediator, MediatorSlot, Result};
use crate::domain::model::DEFAULT_RENT_PRICE;
use std::cell::Cell;
use std::rc::Weak;

#[derive(Debug)]
pub struct EstateOwner {
    mediator: MediatorSlot,
    rent_price: Cell<i32>,
}

impl EstateOwner {
    pub fn new() -> Self {
        Self::with_rent_price(DEFAULT_RENT_PRICE)
    }

    pub fn with_rent_price(rent_price: i32) -> Self {
        Self {
            mediator: MediatorSlot::new(),
            rent_price: Cell::new(rent_price),
        }
    }

    pub fn set_mediator(&self, mediator: Option<Weak<dyn Mediator>>) -> Option<Weak<dyn Mediator>> {
        self.mediator.replace(mediator)
    }

    pub fn rent_price(&self) -> i32 {
        self.rent_price.get()
    }

    /// 設定新租金，回傳先前的租金。欄位先更新，再通知 mediator。
    pub fn set_rent_price(&self, price: i32) -> Result<i32> {
        let old_price = self.rent_price.replace(price);
        if let Some(mediator) = self.mediator.current() {
            mediator.estate_rent_price_changed(old_price, price)?;
        }
        Ok(old_price)
    }
}

impl Default for EstateOwner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingMediator {
        rent_changes: RefCell<Vec<(i32, i32)>>,
        seen_by_owner: RefCell<Option<Rc<EstateOwner>>>,
        observed_price: Cell<Option<i32>>,
    }

    impl Mediator for RecordingMediator {
        fn estate_rent_price_changed(&self, old_price: i32, new_price: i32) -> Result<()> {
            self.rent_changes.borrow_mut().push((old_price, new_price));
            if let Some(owner) = self.seen_by_owner.borrow().as_ref() {
                self.observed_price.set(Some(owner.rent_price()));
            }
            Ok(())
        }
        fn grocery_stock_changed(&self, _: i32) -> Result<()> {
            Ok(())
        }
        fn grocery_price_changed(&self, _: i32, _: i32) -> Result<()> {
            Ok(())
        }
        fn food_is_cooked(&self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_rent_price() {
        assert_eq!(EstateOwner::new().rent_price(), 10000);
    }

    #[test]
    fn test_set_rent_price_without_mediator() {
        let owner = EstateOwner::new();
        assert_eq!(owner.set_rent_price(1000).unwrap(), 10000);
        assert_eq!(owner.set_rent_price(-5).unwrap(), 1000);
        assert_eq!(owner.rent_price(), -5);
    }

    #[test]
    fn test_notifies_after_update() {
        let owner = Rc::new(EstateOwner::new());
        let mediator = Rc::new(RecordingMediator::default());
        *mediator.seen_by_owner.borrow_mut() = Some(owner.clone());
        let weak: Weak<dyn Mediator> = Rc::downgrade(&mediator) as Weak<dyn Mediator>;
        assert!(owner.set_mediator(Some(weak)).is_none());

        owner.set_rent_price(1000).unwrap();

        assert_eq!(*mediator.rent_changes.borrow(), vec![(10000, 1000)]);
        assert_eq!(mediator.observed_price.get(), Some(1000));
    }
}
