pub mod config;
pub mod error;
mod gateway;
pub mod session;
pub mod store;

pub use config::{Config, resolve_data_dir};
pub use error::{Error, Result};
pub use session::{AdvanceOutcome, BookingSession};
pub use store::{CatalogStore, LoadState};
