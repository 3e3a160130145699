//! 主布局渲染

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
    Frame,
};

use crate::model::{App, Page};

use super::components;
use super::pages;
use super::theme::Styles;

/// 渲染主布局
pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();

    // 四层布局：菜单栏 + 提示行 + 主内容区 + 状态栏
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 菜单栏
            Constraint::Length(1), // 当前菜单项说明
            Constraint::Min(1),    // 主内容区
            Constraint::Length(1), // 状态栏
        ])
        .split(size);

    components::menubar::render(app, frame, main_layout[0]);
    components::menubar::render_hint(app, frame, main_layout[1]);
    render_content(app, frame, main_layout[2]);
    components::statusbar::render(app, frame, main_layout[3]);
}

/// 渲染内容区：带边框的页面
fn render_content(app: &App, frame: &mut Frame, area: Rect) {
    match app.page {
        // 对话框叠加在它们来源的页面上
        Page::ConfirmDelete => {
            render_framed(app, Page::Detail, frame, area);
            pages::confirm::render(app, frame, area);
        }
        Page::Scheduler => {
            render_framed(app, app.previous, frame, area);
            pages::editor::render_scheduler(app, frame, area);
        }
        page => render_framed(app, page, frame, area),
    }
}

fn render_framed(app: &App, page: Page, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", page_title(app, page)))
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border(app.focus.is_content()));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    match page {
        Page::Home => pages::home::render(app, frame, inner_area),
        Page::Listing(kind) => pages::listing::render(app, kind, frame, inner_area),
        Page::Encryption => pages::admin::render_encryption(app, frame, inner_area),
        Page::Prune => pages::admin::render_prune(app, frame, inner_area),
        Page::Menu => pages::commands::render(app, frame, inner_area),
        Page::Help => pages::commands::render_help(app, frame, inner_area),
        Page::Detail => pages::detail::render(app, frame, inner_area),
        Page::Editor(_) => pages::editor::render(app, frame, inner_area),
        Page::Scheduler | Page::ConfirmDelete => {}
    }
}

/// 内容区标题
fn page_title(app: &App, page: Page) -> String {
    match page {
        Page::Listing(kind) => app
            .spec(kind)
            .map_or_else(|| kind.to_string(), |spec| spec.title.to_string()),
        Page::Detail => app
            .detail
            .as_ref()
            .map_or_else(|| page.title().to_string(), |d| d.item.label()),
        Page::Editor(kind) => app
            .spec(kind)
            .map_or_else(|| page.title().to_string(), |spec| format!("Edit {}", spec.title)),
        Page::Help => app.help.title(),
        _ => page.title().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use multiflexi_core::types::Job;
    use multiflexi_core::{EntityKind, EntityRegistry, Item};
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::model::state::DetailState;
    use crate::model::FocusMode;

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(usize::from(width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn new_app() -> App {
        App::new(Arc::new(EntityRegistry::with_defaults()))
    }

    #[test]
    fn home_shows_menu_and_loading_status() {
        let app = new_app();
        let text = screen(&app, 100, 20);
        assert!(text.contains("Status"));
        assert!(text.contains("RunTemplates"));
        assert!(text.contains("System Status"));
        assert!(text.contains("Loading"));
    }

    #[test]
    fn confirm_dialog_overlays_detail() {
        let mut app = new_app();
        let item = Item::Job(Job {
            id: 12,
            command: "backup".to_string(),
            ..Job::default()
        });
        let spec = app.spec(EntityKind::Job).cloned();
        app.detail = Some(DetailState::new(item.clone(), spec.as_ref()));
        app.pending_delete = Some(crate::model::state::PendingDelete::from_item(&item));
        app.page = Page::ConfirmDelete;
        app.focus = FocusMode::Content;

        let text = screen(&app, 100, 24);
        assert!(text.contains("Confirm Deletion"));
        assert!(text.contains("backup"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut app = new_app();
        app.set_status("Saved");
        for (width, height) in [(1, 1), (10, 3), (20, 5)] {
            screen(&app, width, height);
        }
    }
}
