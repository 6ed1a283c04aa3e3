pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::{CommandResult, TestWorld};
