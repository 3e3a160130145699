//! 各页面的视图状态

mod admin;
mod commands;
mod confirm;
mod detail;
mod editor;
mod listing;

pub use admin::{EncryptionState, PruneField, PruneState};
pub use commands::{CommandsState, HelpState};
pub use confirm::PendingDelete;
pub use detail::DetailState;
pub use editor::{EditorField, EditorState, SchedulerState};
pub use listing::ListingState;
