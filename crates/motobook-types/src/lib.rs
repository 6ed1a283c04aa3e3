pub mod catalog;
pub mod error;
pub mod field;
pub mod money;
pub mod selection;
pub mod step;

pub use catalog::*;
pub use error::{CatalogError, Result};
pub use field::Field;
pub use money::Money;
pub use selection::*;
pub use step::Step;
