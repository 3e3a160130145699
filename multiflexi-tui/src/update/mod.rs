//！┌─────────────────────────────────────────────────────────────────────────────┐
//！│                              主循环 (app.rs)                               │
//！│                                                                            │
//！│  ┌────────────────────────────── UI 层 ───────────────────────────────┐   │
//！│  │                                                                     │   │
//！│  │   ┌─────────┐          ┌───────────┐          ┌──────────┐         │   │
//！│  │   │  Event  │ ───────▶ │  Message  │ ───────▶ │  Update  │         │   │
//！│  │   │   层    │   翻译    │    层     │   消费    │    层    │         │   │
//！│  │   └─────────┘          │           │          └──┬────┬──┘         │   │
//！│  │        ▲               │ AppMessage│        修改 │    │ Command    │   │
//！│  │        │               │ MenuMsg   │             ▼    │            │   │
//！│  │   ┌─────────┐          │ ContentMsg│      ┌──────────┐│            │   │
//！│  │   │  View   │          │ Intent    │ ┌─── │  Model   ││            │   │
//！│  │   │   层    │          │ ResultMsg │ │    │    层    ││            │   │
//！│  │   └────┬────┘ ◀─ 读取 ─└─────▲─────┘─┘    └──────────┘│            │   │
//！│  │        │                     │ mpsc                   │            │   │
//！│  └────────│─────────────────────│────────────────────────│────────────┘   │
//！│           │                     │                        ▼                │
//！│           ▼                     │                  ┌──────────┐           │
//！│      ┌─────────┐                └───────────────── │ Backend  │           │
//！│      │  终端   │                     ResultMessage │ Executor │           │
//！│      │ (Util)  │                                   └────┬─────┘           │
//！│      └─────────┘                                        │ tokio::spawn    │
//！│                                                         ▼                 │
//！│                                              ┌───────────────────┐        │
//！│                                              │  multiflexi-core  │        │
//！│                                              │ (cache / listing) │        │
//！│                                              └───────────────────┘        │
//！└─────────────────────────────────────────────────────────────────────────────┘

//!
//! src/update/mod.rs
//! Update 层：状态更新逻辑
//!
//! Update 层负责处理 Message，更新 Model 状态，是唯一可以修改 Model 的地方。
//! 它从不直接执行 I/O：需要后台工作时返回 `Command`，由主循环交给 Backend 执行。
//!
//!
//! 有模块结构：
//!     src/update/mod.rs
//!         mod menu;               // 菜单栏子消息处理
//!         mod content;            // 内容区子消息处理：各页面的输入 → Intent
//!         mod results;            // 后台结果处理
//!
//!         pub fn update(app: &mut App, msg: AppMessage) -> Command {...}
//!         pub fn apply_intent(app: &mut App, intent: Intent) -> Command {...}
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 页面切换
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     Listing ──OpenDetail──▶ Detail ──Delete──▶ ConfirmDelete
//!        ▲                      │  ▲                │      │
//!        │                      │  └───── No ───────┘      │
//!        │                     Edit                        │
//!        │                      ▼                          │
//!        ├──── Back / Save ── Editor                       │
//!        └──────────────────────────────── Yes ────────────┘
//!
//!     · 进入类弹窗页面时，只有从类列表页面进入才更新 previous
//!     · Detail → ConfirmDelete 不更新 previous，确认后回到原列表
//!     · 类弹窗页面中焦点固定在内容区，菜单栏按键无效
//!     · F10 从任意页面进入命令菜单，焦点移到菜单栏
//!

mod content;
mod menu;
mod results;

use multiflexi_core::{Action, CoreError, EntityKind, RefreshMode};

use crate::message::{AppMessage, Command, Intent};
use crate::model::state::{DetailState, EditorState, ListingState, PendingDelete, SchedulerState};
use crate::model::{App, FocusMode, MenuEntry, Page};

/// 启动时的初始命令：加载系统状态并预热常用列表
pub fn init(prefetch: Vec<EntityKind>) -> Command {
    let prefetch = if prefetch.is_empty() {
        Command::None
    } else {
        Command::Prefetch(prefetch)
    };
    Command::batch([Command::LoadStatus, prefetch])
}

/// 处理应用消息，更新状态
pub fn update(app: &mut App, msg: AppMessage) -> Command {
    match msg {
        AppMessage::Quit => {
            app.should_quit = true;
            Command::None
        }

        AppMessage::ToggleFocus => {
            // 类弹窗页面中焦点固定在内容区
            if !app.page.is_modal_like() {
                app.focus = app.focus.toggle();
            }
            Command::None
        }

        AppMessage::OpenMenu => apply_intent(app, Intent::ShowMenu),

        AppMessage::FocusContent => {
            app.focus = FocusMode::Content;
            Command::None
        }

        AppMessage::Resize { width, height } => {
            app.width = width;
            app.height = height;
            app.menu.ensure_visible(width);
            content::resize(app);
            Command::None
        }

        AppMessage::Menu(menu_msg) => {
            if app.page.is_modal_like() {
                Command::None
            } else {
                menu::update(app, menu_msg)
            }
        }

        AppMessage::Content(content_msg) => content::update(app, content_msg),

        AppMessage::Result(result) => results::update(app, result),

        AppMessage::Noop => Command::None,
    }
}

/// 执行页面意图
pub fn apply_intent(app: &mut App, intent: Intent) -> Command {
    match intent {
        Intent::OpenDetail(item) => {
            if !app.page.is_listing_like() {
                return Command::None;
            }
            let kind = item.kind();
            let detail = DetailState::new(item, app.spec(kind));
            app.detail = Some(detail);
            enter_modal(app, Page::Detail);
            Command::None
        }

        Intent::Edit(item) => {
            if !matches!(app.page, Page::Detail | Page::Listing(_)) {
                return Command::None;
            }
            let kind = item.kind();
            if !app.spec(kind).is_some_and(|spec| spec.editable) {
                report_unsupported(app, "Edit", kind);
                return Command::None;
            }
            app.editor = Some(EditorState::new(item));
            enter_modal(app, Page::Editor(kind));
            Command::None
        }

        Intent::Schedule(item) => {
            if !matches!(app.page, Page::Detail | Page::Listing(_)) {
                return Command::None;
            }
            let kind = item.kind();
            if !app.spec(kind).is_some_and(|spec| spec.schedulable) {
                report_unsupported(app, "Schedule", kind);
                return Command::None;
            }
            app.scheduler = Some(SchedulerState::new(item));
            enter_modal(app, Page::Scheduler);
            Command::None
        }

        Intent::Delete(item) => {
            if app.page != Page::Detail {
                return Command::None;
            }
            let kind = item.kind();
            if !app.spec(kind).is_some_and(|spec| spec.deletable) {
                report_unsupported(app, "Delete", kind);
                return Command::None;
            }
            // previous 保持为打开详情前的列表
            app.pending_delete = Some(PendingDelete::from_item(&item));
            app.page = Page::ConfirmDelete;
            app.focus = FocusMode::Content;
            Command::None
        }

        Intent::ConfirmDelete(confirmed) => {
            if app.page != Page::ConfirmDelete {
                return Command::None;
            }
            let pending = app.pending_delete.take();
            match pending {
                Some(pending) if confirmed => {
                    app.set_status(format!("Deleting {}...", pending.label));
                    let back = return_to_previous(app, false);
                    Command::batch([Command::RunAction(pending.action()), back])
                }
                _ => {
                    app.page = Page::Detail;
                    app.focus = FocusMode::Content;
                    Command::None
                }
            }
        }

        Intent::Save(item) => {
            if !matches!(app.page, Page::Editor(_) | Page::Scheduler) {
                return Command::None;
            }
            app.set_status(format!("Saving {}...", item.label()));
            let back = return_to_previous(app, false);
            Command::batch([Command::RunAction(Action::Update(item)), back])
        }

        Intent::Back => go_back(app),

        Intent::ShowMenu => {
            clear_modal_states(app);
            app.page = Page::Menu;
            app.focus = FocusMode::Menu;
            app.menu.select_entry(MenuEntry::Commands);
            app.menu.ensure_visible(app.width);
            load_commands(app)
        }

        Intent::ShowHelp(command) => {
            app.help.begin(command.clone());
            app.help.set_viewport(app.content_rows());
            app.page = Page::Help;
            app.focus = FocusMode::Content;
            Command::LoadHelp(command)
        }

        Intent::Run(action) => Command::RunAction(action),
    }
}

/// 进入类弹窗页面
///
/// 只有从类列表页面进入时才记录返回目标。
fn enter_modal(app: &mut App, page: Page) {
    if app.page.is_listing_like() {
        app.previous = app.page;
    }
    app.page = page;
    app.focus = FocusMode::Content;
}

/// 返回 previous 页面，`reload` 为真时软刷新列表
fn return_to_previous(app: &mut App, reload: bool) -> Command {
    clear_modal_states(app);
    app.page = app.previous;
    app.focus = FocusMode::Content;
    match app.page {
        Page::Listing(kind) if reload => resume_listing(app, kind),
        Page::Listing(kind) if !app.listings.contains_key(&kind) => enter_listing(app, kind),
        _ => Command::None,
    }
}

fn go_back(app: &mut App) -> Command {
    match app.page {
        Page::Detail | Page::Editor(_) | Page::Scheduler => return_to_previous(app, true),
        Page::ConfirmDelete => apply_intent(app, Intent::ConfirmDelete(false)),
        Page::Help => {
            app.page = Page::Menu;
            app.focus = FocusMode::Content;
            load_commands(app)
        }
        Page::Home | Page::Listing(_) | Page::Encryption | Page::Prune | Page::Menu => {
            app.focus = FocusMode::Menu;
            Command::None
        }
    }
}

fn clear_modal_states(app: &mut App) {
    app.detail = None;
    app.editor = None;
    app.scheduler = None;
    app.pending_delete = None;
}

fn report_unsupported(app: &mut App, operation: &str, kind: EntityKind) {
    let error = CoreError::UnsupportedItemKind {
        operation: operation.to_string(),
        kind: kind.to_string(),
    };
    log::warn!("[ui] {error}");
    app.set_status(error.to_string());
}

/// 以全新状态进入某个列表：光标与 offset 归零
pub(crate) fn enter_listing(app: &mut App, kind: EntityKind) -> Command {
    let Some(page_size) = app.spec(kind).map(|spec| spec.page_size) else {
        let error = CoreError::UnknownEntity(kind.to_string());
        log::error!("[ui] {error}");
        app.set_status(error.to_string());
        return Command::None;
    };
    let session = app.next_session();
    app.listings
        .insert(kind, ListingState::new(kind, page_size, session));
    app.page = Page::Listing(kind);
    Command::LoadPage {
        kind,
        limit: page_size,
        offset: 0,
        mode: RefreshMode::Soft,
        session,
    }
}

/// 回到已有列表：保留光标，软刷新当前页
fn resume_listing(app: &mut App, kind: EntityKind) -> Command {
    let Some(state) = app.listing_mut(kind) else {
        return enter_listing(app, kind);
    };
    reload_page(state, RefreshMode::Soft)
}

/// 重新加载列表当前页
pub(crate) fn reload_page(state: &mut ListingState, mode: RefreshMode) -> Command {
    let offset = state.begin_refresh();
    Command::LoadPage {
        kind: state.kind,
        limit: state.limit,
        offset,
        mode,
        session: state.session,
    }
}

fn load_commands(app: &mut App) -> Command {
    if app.commands.needs_load() {
        app.commands.loading = true;
        app.commands.error = None;
        Command::LoadCommands
    } else {
        Command::None
    }
}
