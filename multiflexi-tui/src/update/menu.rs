//! 菜单栏消息处理

use crate::message::{Command, Intent, MenuMessage};
use crate::model::state::{EncryptionState, PruneState};
use crate::model::{App, FocusMode, MenuEntry, Page};

use super::{apply_intent, clear_modal_states, enter_listing, load_commands};

/// 处理菜单栏消息
pub fn update(app: &mut App, msg: MenuMessage) -> Command {
    match msg {
        MenuMessage::SelectPrevious => app.menu.select_previous(),
        MenuMessage::SelectNext => app.menu.select_next(),
        MenuMessage::SelectFirst => app.menu.select_first(),
        MenuMessage::SelectLast => app.menu.select_last(),
        MenuMessage::Confirm => return select_current(app),
        MenuMessage::Click(column) => {
            let Some(index) = app.menu.item_at(column) else {
                return Command::None;
            };
            app.menu.select(index);
            app.menu.ensure_visible(app.width);
            return select_current(app);
        }
    }
    app.menu.ensure_visible(app.width);
    Command::None
}

/// 进入当前选中的菜单项
fn select_current(app: &mut App) -> Command {
    let Some(entry) = app.menu.current().map(|item| item.entry) else {
        return Command::None;
    };
    log::debug!("[menu] select {entry:?}");
    clear_modal_states(app);

    match entry {
        MenuEntry::Status => {
            app.page = Page::Home;
            Command::LoadStatus
        }
        MenuEntry::Listing(kind) => {
            app.focus = FocusMode::Content;
            enter_listing(app, kind)
        }
        MenuEntry::Encryption => {
            app.page = Page::Encryption;
            app.focus = FocusMode::Content;
            app.encryption = EncryptionState::new();
            Command::LoadStatus
        }
        MenuEntry::Prune => {
            app.page = Page::Prune;
            app.focus = FocusMode::Content;
            app.prune = PruneState::new();
            Command::None
        }
        MenuEntry::Commands => {
            app.page = Page::Menu;
            app.focus = FocusMode::Content;
            load_commands(app)
        }
        MenuEntry::Help => apply_intent(app, Intent::ShowHelp(String::new())),
        MenuEntry::Quit => {
            app.should_quit = true;
            Command::None
        }
    }
}
