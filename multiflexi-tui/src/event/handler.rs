//! 事件处理器

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::event::keymap::DefaultKeymap;
use crate::message::{AppMessage, ContentMessage, MenuMessage};
use crate::model::{App, Page};

/// 菜单栏所在行
const MENU_ROW: u16 = 0;

/// 轮询事件
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// 处理事件，返回对应的消息
pub fn handle_event(event: Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, app), // 键盘事件
        Event::Mouse(mouse_event) => handle_mouse_event(mouse_event, app), // 鼠标事件
        Event::Resize(width, height) => AppMessage::Resize { width, height },
        _ => AppMessage::Noop,
    }
}

/// 处理键盘事件
fn handle_key_event(key: KeyEvent, app: &App) -> AppMessage {
    // 重要：只处理 Press 事件，忽略 Release 和 Repeat
    // 避免 Windows 终端上按键重复问题的发生
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    let modal = app.page.is_modal_like();

    // 全局快捷键（无论焦点在哪里）
    if DefaultKeymap::FORCE_QUIT.matches(&key) {
        return AppMessage::Quit;
    }
    if DefaultKeymap::OPEN_MENU.matches(&key) {
        return AppMessage::OpenMenu;
    }

    // 类弹窗页面中 Tab 与 q 交给页面自己处理
    if !modal {
        if DefaultKeymap::TOGGLE_FOCUS.matches(&key) {
            return AppMessage::ToggleFocus;
        }
        if DefaultKeymap::QUIT.matches(&key) {
            return AppMessage::Quit;
        }
    }

    if app.focus.is_menu() && !modal {
        if let Some(msg) = handle_menu_keys(key) {
            return AppMessage::Menu(msg);
        }
    }

    handle_content_keys(key, app)
        .map_or(AppMessage::Noop, AppMessage::Content)
}

/// 处理菜单栏的按键，其余按键交给内容区
fn handle_menu_keys(key: KeyEvent) -> Option<MenuMessage> {
    if !key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
        return None;
    }
    let msg = match key.code {
        // ← 或 h: 左移
        KeyCode::Left | KeyCode::Char('h') => MenuMessage::SelectPrevious,
        // → 或 l: 右移
        KeyCode::Right | KeyCode::Char('l') => MenuMessage::SelectNext,
        KeyCode::Home => MenuMessage::SelectFirst,
        KeyCode::End => MenuMessage::SelectLast,
        // Enter 或空格: 进入菜单项
        KeyCode::Enter | KeyCode::Char(' ') => MenuMessage::Confirm,
        _ => return None,
    };
    Some(msg)
}

/// 处理内容区的按键
fn handle_content_keys(key: KeyEvent, app: &App) -> Option<ContentMessage> {
    if DefaultKeymap::BACK.matches(&key) {
        return Some(ContentMessage::Back);
    }

    match app.page {
        Page::Listing(_) => handle_listing_keys(key),
        Page::Detail => handle_detail_keys(key),
        Page::Editor(_) => handle_editor_keys(key),
        Page::Scheduler => handle_text_keys(key),
        Page::ConfirmDelete => handle_confirm_keys(key),
        Page::Help => handle_help_keys(key),
        Page::Prune => handle_prune_keys(key),
        Page::Home | Page::Encryption | Page::Menu => handle_list_keys(key),
    }
}

/// 通用列表移动与刷新
fn handle_list_keys(key: KeyEvent) -> Option<ContentMessage> {
    if DefaultKeymap::REFRESH.matches(&key) {
        return Some(ContentMessage::Refresh);
    }
    if DefaultKeymap::RELOAD.matches(&key) {
        return Some(ContentMessage::Reload);
    }
    let msg = match key.code {
        // ↑ 或 k: 上一项
        KeyCode::Up | KeyCode::Char('k') => ContentMessage::SelectPrevious,
        // ↓ 或 j: 下一项
        KeyCode::Down | KeyCode::Char('j') => ContentMessage::SelectNext,
        KeyCode::Home | KeyCode::Char('g') => ContentMessage::SelectFirst,
        KeyCode::End | KeyCode::Char('G') => ContentMessage::SelectLast,
        KeyCode::Enter | KeyCode::Char(' ') => ContentMessage::Confirm,
        _ => return None,
    };
    Some(msg)
}

/// 分页列表的按键
fn handle_listing_keys(key: KeyEvent) -> Option<ContentMessage> {
    if DefaultKeymap::ACTION_EDIT.matches(&key) {
        return Some(ContentMessage::Edit);
    }
    if DefaultKeymap::ACTION_SCHEDULE.matches(&key) {
        return Some(ContentMessage::Schedule);
    }
    if DefaultKeymap::ACTION_TRUNCATE.matches(&key) {
        return Some(ContentMessage::Truncate);
    }
    match key.code {
        // ← / h / PgUp: 上一页
        KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => Some(ContentMessage::PreviousPage),
        // → / l / PgDn: 下一页
        KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => Some(ContentMessage::NextPage),
        _ => handle_list_keys(key),
    }
}

fn handle_detail_keys(key: KeyEvent) -> Option<ContentMessage> {
    if DefaultKeymap::ACTION_EDIT.matches(&key) {
        return Some(ContentMessage::Edit);
    }
    if DefaultKeymap::ACTION_SCHEDULE.matches(&key) {
        return Some(ContentMessage::Schedule);
    }
    if DefaultKeymap::ACTION_DELETE.matches(&key) {
        return Some(ContentMessage::Delete);
    }
    if DefaultKeymap::QUIT.matches(&key) {
        return Some(ContentMessage::Back);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(ContentMessage::SelectPrevious),
        KeyCode::Down | KeyCode::Char('j') => Some(ContentMessage::SelectNext),
        _ => None,
    }
}

/// 编辑器：Tab/↑↓ 切换字段，其余为文本输入
fn handle_editor_keys(key: KeyEvent) -> Option<ContentMessage> {
    match key.code {
        KeyCode::Tab | KeyCode::Down => Some(ContentMessage::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(ContentMessage::PreviousField),
        _ => handle_text_keys(key),
    }
}

/// 文本输入
fn handle_text_keys(key: KeyEvent) -> Option<ContentMessage> {
    match key.code {
        KeyCode::Enter => Some(ContentMessage::Confirm),
        KeyCode::Backspace => Some(ContentMessage::Backspace),
        KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
            Some(ContentMessage::Input(c))
        }
        _ => None,
    }
}

fn handle_confirm_keys(key: KeyEvent) -> Option<ContentMessage> {
    if DefaultKeymap::CONFIRM_YES.matches(&key) {
        return Some(ContentMessage::Answer(true));
    }
    if DefaultKeymap::CONFIRM_NO.matches(&key) || DefaultKeymap::QUIT.matches(&key) {
        return Some(ContentMessage::Answer(false));
    }
    None
}

fn handle_help_keys(key: KeyEvent) -> Option<ContentMessage> {
    match key.code {
        KeyCode::PageUp => Some(ContentMessage::PreviousPage),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(ContentMessage::NextPage),
        _ => handle_list_keys(key),
    }
}

/// 清理页：↑↓ 切换字段，空格切换开关，数字编辑保留条数
fn handle_prune_keys(key: KeyEvent) -> Option<ContentMessage> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(ContentMessage::PreviousField),
        KeyCode::Down | KeyCode::Char('j') => Some(ContentMessage::NextField),
        KeyCode::Char(c) if c == ' ' || c.is_ascii_digit() => Some(ContentMessage::Input(c)),
        KeyCode::Backspace => Some(ContentMessage::Backspace),
        KeyCode::Enter => Some(ContentMessage::Confirm),
        _ => None,
    }
}

/// 处理鼠标事件
///
/// 滚轮转换为 ↑/↓ 按键后走键盘处理路径。
fn handle_mouse_event(mouse: MouseEvent, app: &App) -> AppMessage {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            handle_key_event(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE), app)
        }
        MouseEventKind::ScrollDown => {
            handle_key_event(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE), app)
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if mouse.row == MENU_ROW {
                if app.page.is_modal_like() {
                    AppMessage::Noop
                } else {
                    AppMessage::Menu(MenuMessage::Click(mouse.column))
                }
            } else {
                AppMessage::FocusContent
            }
        }
        _ => AppMessage::Noop,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyEventState;
    use multiflexi_core::{EntityKind, EntityRegistry};

    use super::*;
    use crate::model::FocusMode;

    fn app_on(page: Page, focus: FocusMode) -> App {
        let mut app = App::new(Arc::new(EntityRegistry::with_defaults()));
        app.page = page;
        app.focus = focus;
        app
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn content(msg: ContentMessage) -> AppMessage {
        AppMessage::Content(msg)
    }

    fn same(a: &AppMessage, b: &AppMessage) -> bool {
        format!("{a:?}") == format!("{b:?}")
    }

    #[test]
    fn only_key_presses_are_handled() {
        let app = app_on(Page::Home, FocusMode::Menu);
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert!(same(&handle_event(release, &app), &AppMessage::Noop));
        assert!(same(&handle_event(press(KeyCode::Char('q')), &app), &AppMessage::Quit));
    }

    #[test]
    fn global_keys_work_everywhere() {
        for page in [Page::Home, Page::Detail, Page::Editor(EntityKind::Job), Page::ConfirmDelete] {
            let app = app_on(page, FocusMode::Content);
            let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
            assert!(same(&handle_event(ctrl_c, &app), &AppMessage::Quit), "{page:?}");
            assert!(same(&handle_event(press(KeyCode::F(10)), &app), &AppMessage::OpenMenu));
        }
    }

    #[test]
    fn q_means_back_or_text_in_modal_views() {
        let detail = app_on(Page::Detail, FocusMode::Content);
        assert!(same(
            &handle_event(press(KeyCode::Char('q')), &detail),
            &content(ContentMessage::Back)
        ));

        let editor = app_on(Page::Editor(EntityKind::Job), FocusMode::Content);
        assert!(same(
            &handle_event(press(KeyCode::Char('q')), &editor),
            &content(ContentMessage::Input('q'))
        ));

        let confirm = app_on(Page::ConfirmDelete, FocusMode::Content);
        assert!(same(
            &handle_event(press(KeyCode::Char('q')), &confirm),
            &content(ContentMessage::Answer(false))
        ));
    }

    #[test]
    fn tab_toggles_focus_outside_modal_views() {
        let listing = app_on(Page::Listing(EntityKind::Job), FocusMode::Content);
        assert!(same(&handle_event(press(KeyCode::Tab), &listing), &AppMessage::ToggleFocus));

        let editor = app_on(Page::Editor(EntityKind::Job), FocusMode::Content);
        assert!(same(
            &handle_event(press(KeyCode::Tab), &editor),
            &content(ContentMessage::NextField)
        ));
    }

    #[test]
    fn menu_focus_routes_arrows_to_menu() {
        let app = app_on(Page::Listing(EntityKind::Job), FocusMode::Menu);
        assert!(same(
            &handle_event(press(KeyCode::Right), &app),
            &AppMessage::Menu(MenuMessage::SelectNext)
        ));
        // 非菜单按键交给当前页面
        assert!(same(
            &handle_event(press(KeyCode::Down), &app),
            &content(ContentMessage::SelectNext)
        ));

        let content_focus = app_on(Page::Listing(EntityKind::Job), FocusMode::Content);
        assert!(same(
            &handle_event(press(KeyCode::Right), &content_focus),
            &content(ContentMessage::NextPage)
        ));
    }

    #[test]
    fn listing_action_keys() {
        let app = app_on(Page::Listing(EntityKind::Job), FocusMode::Content);
        let reload = Event::Key(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT));
        assert!(same(&handle_event(reload, &app), &content(ContentMessage::Reload)));
        assert!(same(
            &handle_event(press(KeyCode::Char('r')), &app),
            &content(ContentMessage::Refresh)
        ));
        assert!(same(
            &handle_event(press(KeyCode::PageDown), &app),
            &content(ContentMessage::NextPage)
        ));
    }

    #[test]
    fn mouse_wheel_acts_like_arrow_keys() {
        let app = app_on(Page::Listing(EntityKind::Job), FocusMode::Content);
        let wheel = Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 10,
            row: 5,
            modifiers: KeyModifiers::NONE,
        });
        assert!(same(&handle_event(wheel, &app), &content(ContentMessage::SelectNext)));
    }

    #[test]
    fn clicks_on_menu_row_and_content() {
        let app = app_on(Page::Home, FocusMode::Menu);
        assert!(same(
            &handle_event(click(12, 0), &app),
            &AppMessage::Menu(MenuMessage::Click(12))
        ));
        assert!(same(&handle_event(click(12, 6), &app), &AppMessage::FocusContent));

        let detail = app_on(Page::Detail, FocusMode::Content);
        assert!(same(&handle_event(click(12, 0), &detail), &AppMessage::Noop));
    }

    #[test]
    fn resize_is_forwarded() {
        let app = app_on(Page::Home, FocusMode::Menu);
        assert!(same(
            &handle_event(Event::Resize(100, 40), &app),
            &AppMessage::Resize {
                width: 100,
                height: 40
            }
        ));
    }
}
