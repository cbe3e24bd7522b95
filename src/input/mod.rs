//! User input records and batch loading

mod data;
pub mod loader;

pub use data::{Sex, UserInput};
pub use loader::{load_inputs, load_inputs_from_reader};
