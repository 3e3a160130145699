//! Data source implementations

mod cli;
mod memory;

pub use cli::{CliDataSource, DEFAULT_PROGRAM};
pub use memory::InMemoryDataSource;
