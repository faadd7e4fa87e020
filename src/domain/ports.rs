use crate::utils::error::Result;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Notification sink the businesses report completed state changes to.
///
/// Each business only knows this trait; the rules of how one change affects
/// the other businesses live entirely in the implementor.
pub trait Mediator {
    fn estate_rent_price_changed(&self, old_price: i32, new_price: i32) -> Result<()>;
    fn grocery_stock_changed(&self, current_stock: i32) -> Result<()>;
    fn grocery_price_changed(&self, old_price: i32, new_price: i32) -> Result<()>;
    fn food_is_cooked(&self) -> Result<()>;
}

/// Non-owning back-reference from a business to its mediator.
#[derive(Default)]
pub struct MediatorSlot {
    inner: RefCell<Option<Weak<dyn Mediator>>>,
}

impl MediatorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `mediator` and hands back whatever was registered before.
    pub fn replace(&self, mediator: Option<Weak<dyn Mediator>>) -> Option<Weak<dyn Mediator>> {
        self.inner.replace(mediator)
    }

    /// The live mediator, if one is registered and still alive.
    ///
    /// The borrow ends before the caller notifies, so a notification may
    /// re-register mediators on this same business.
    pub fn current(&self) -> Option<Rc<dyn Mediator>> {
        self.inner.borrow().as_ref().and_then(Weak::upgrade)
    }

    pub fn is_registered(&self) -> bool {
        self.current().is_some()
    }
}

impl fmt::Debug for MediatorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediatorSlot")
            .field("registered", &self.is_registered())
            .finish()
    }
}
