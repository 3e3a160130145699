//! MultiFlexi Core Library
//!
//! Data access layer of the MultiFlexi terminal dashboard:
//! - Data source adapter over `multiflexi-cli` (`DataSource`, `CliDataSource`)
//! - TTL fetch cache with concurrent batch fetch (`DataFetcher`)
//! - Paged listing controller and entity registry
//! - System status and administrative actions
//!
//! The UI never talks to the tool directly; everything goes through the
//! services assembled in [`ServiceContext`].

pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod listing;
pub mod registry;
pub mod services;
pub mod source;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use cache::{CacheStats, FetchCache, Generation, RequestSignature};
pub use config::AppConfig;
pub use error::{CoreError, CoreResult, RemoteFailure};
pub use fetcher::{DataFetcher, FetchOptions, FetchParams, Fetched};
pub use listing::{ListingController, ListingOutcome, LoadedPage, PageState, RefreshMode};
pub use registry::{Column, EntityRegistry, EntitySpec};
pub use services::{Action, ActionService, ServiceContext, SystemService};
pub use traits::{DataSource, SourceRequest};
pub use types::{EntityKind, Item};
