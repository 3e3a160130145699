//! Model 层：应用状态
//!
//! ```text
//! App
//!  ├── page / previous : Page          当前页面与返回目标
//!  ├── focus           : FocusMode     菜单栏 / 内容区
//!  ├── menu            : MenuBar       顶部菜单栏
//!  └── state::*                        各页面视图状态
//! ```

mod app;
mod focus;
mod menu;
mod page;
pub mod state;

pub use app::App;
pub use focus::FocusMode;
pub use menu::{MenuBar, MenuEntry, MenuItem, ITEM_GAP};
pub use page::Page;
