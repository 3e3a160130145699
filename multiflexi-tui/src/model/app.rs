//!
//! model/app.rs
//! 应用主状态
//!
//! App 是整个界面唯一的状态容器，只在主循环中被 `update` 顺序修改：
//!
//! App {
//!     page / previous          // 当前页面与单层返回目标
//!     focus                    // 菜单栏 or 内容区
//!     menu                     // 顶部菜单栏（含水平滚动）
//!     listings                 // 每个实体类型一份列表状态
//!     detail / editor / ...    // 类弹窗页面状态，进入时重建
//!     status_message           // 状态栏消息，在列表页渲染一次后清除
//!     system_status            // 首次加载完成前为 None
//! }
//!

use std::collections::BTreeMap;
use std::sync::Arc;

use multiflexi_core::types::StatusInfo;
use multiflexi_core::{EntityKind, EntityRegistry, EntitySpec};

use super::state::{
    CommandsState, DetailState, EditorState, EncryptionState, HelpState, ListingState,
    PendingDelete, PruneState, SchedulerState,
};
use super::{FocusMode, MenuBar, Page};

/// 菜单栏、提示行、状态栏与内容边框占用的行数
const CHROME_ROWS: u16 = 5;

/// 应用主状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,

    /// 当前焦点
    pub focus: FocusMode,

    /// 当前页面
    pub page: Page,

    /// 返回目标
    pub previous: Page,

    /// 菜单栏状态
    pub menu: MenuBar,

    /// 终端尺寸
    pub width: u16,
    pub height: u16,

    /// 状态栏消息
    pub status_message: Option<String>,

    /// 系统状态快照
    pub system_status: Option<StatusInfo>,

    /// 实体注册表（标题、列、分页与能力）
    pub registry: Arc<EntityRegistry>,

    // === 各页面状态 ===
    pub listings: BTreeMap<EntityKind, ListingState>,
    pub detail: Option<DetailState>,
    pub editor: Option<EditorState>,
    pub scheduler: Option<SchedulerState>,
    pub pending_delete: Option<PendingDelete>,
    pub commands: CommandsState,
    pub help: HelpState,
    pub prune: PruneState,
    pub encryption: EncryptionState,

    next_session: u64,
}

impl App {
    /// 创建新的应用实例
    pub fn new(registry: Arc<EntityRegistry>) -> Self {
        Self {
            should_quit: false,
            focus: FocusMode::Menu,
            page: Page::Home,
            previous: Page::Home,
            menu: MenuBar::new(),
            width: 80,
            height: 24,
            status_message: None,
            system_status: None,
            registry,
            listings: BTreeMap::new(),
            detail: None,
            editor: None,
            scheduler: None,
            pending_delete: None,
            commands: CommandsState::new(),
            help: HelpState::new(),
            prune: PruneState::new(),
            encryption: EncryptionState::new(),
            next_session: 0,
        }
    }

    /// 设置状态消息
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// 清除状态消息
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// 分配新的列表会话号
    pub fn next_session(&mut self) -> u64 {
        self.next_session += 1;
        self.next_session
    }

    /// 实体注册信息
    pub fn spec(&self, kind: EntityKind) -> Option<&EntitySpec> {
        self.registry.get(kind).ok()
    }

    pub fn listing(&self, kind: EntityKind) -> Option<&ListingState> {
        self.listings.get(&kind)
    }

    pub fn listing_mut(&mut self, kind: EntityKind) -> Option<&mut ListingState> {
        self.listings.get_mut(&kind)
    }

    /// 内容区可用行数
    pub fn content_rows(&self) -> usize {
        usize::from(self.height.saturating_sub(CHROME_ROWS))
    }

    /// 每次渲染后调用：状态消息只显示一次
    ///
    /// Prune 和 Encryption 页面的执行结果保存在各自的状态里，不依赖状态栏。
    pub fn on_rendered(&mut self) {
        self.status_message = None;
    }
}
