//! External collaborator abstract Trait definition

mod data_source;

pub use data_source::{DataSource, SourceRequest};
