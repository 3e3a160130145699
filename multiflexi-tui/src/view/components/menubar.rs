//! 顶部菜单栏组件

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::{App, ITEM_GAP};
use crate::view::theme::Styles;

/// 渲染菜单栏
///
/// 只绘制 `visible` 范围内的项，列位置与 `MenuBar::item_at` 的计算一致。
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let menu = &app.menu;
    let focused = app.focus.is_menu() && !app.page.is_modal_like();
    let gap = " ".repeat(usize::from(ITEM_GAP));

    let mut spans = Vec::new();
    for index in menu.visible(area.width) {
        let item = &menu.items[index];
        if index > menu.offset {
            spans.push(Span::raw(gap.clone()));
        }
        let label = format!(" {} ", item.label);
        if index == menu.cursor {
            spans.push(Span::styled(label, Styles::menu_cursor(focused)));
        } else {
            spans.push(Span::raw(label));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Styles::menubar());
    frame.render_widget(paragraph, area);
}

/// 渲染当前菜单项的说明
pub fn render_hint(app: &App, frame: &mut Frame, area: Rect) {
    let hint = app.menu.current().map_or("", |item| item.hint);
    let paragraph = Paragraph::new(Line::styled(format!(" {hint}"), Styles::muted()));
    frame.render_widget(paragraph, area);
}
