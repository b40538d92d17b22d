//! Helpers shared by the checks: container iteration, label selectors and
//! resource quantities.

pub mod container;
pub mod quantity;
pub mod selector;

pub use quantity::{Quantity, QuantityError};
pub use selector::{Selector, SelectorError, selector_matches};
