// Domain layer: value types and the mediator port. Businesses depend on nothing else.

pub mod model;
pub mod ports;
