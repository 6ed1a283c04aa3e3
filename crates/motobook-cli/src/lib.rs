mod args;
mod commands;
mod handlers;
mod output;

pub use args::{CatalogCommand, Cli, Commands, DemoOutcome, OutputFormat};
pub use commands::run;
