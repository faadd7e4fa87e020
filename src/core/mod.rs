pub mod estate_owner;
pub mod grocery_store;
pub mod mediator;
pub mod restaurant;
pub mod scenario;
pub mod town;

pub use crate::domain::model::{ScenarioReport, Step, StepOutcome, StepReport, TownSnapshot};
pub use crate::domain::ports::{Mediator, MediatorSlot};
pub use crate::utils::error::Result;

pub use estate_owner::EstateOwner;
pub use grocery_store::GroceryStore;
pub use mediator::BusinessMediator;
pub use restaurant::Restaurant;
pub use scenario::{ErrorPolicy, ScenarioRunner};
pub use town::{Town, TownSettings};
