//! 底部状态栏组件

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use multiflexi_core::EntityKind;

use crate::model::{App, FocusMode, Page};
use crate::view::theme::Styles;

/// 渲染状态栏
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    // 根据当前焦点和页面生成快捷键提示
    let hints = get_hints(app);

    let mut spans = Vec::new();

    // 状态消息优先显示在左侧
    if let Some(ref msg) = app.status_message {
        spans.push(Span::styled(format!(" {msg}"), Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
    }

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Styles::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, Styles::hint_desc()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Styles::statusbar());
    frame.render_widget(paragraph, area);
}

/// 根据当前状态生成快捷键提示
fn get_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let mut hints = Vec::new();

    if app.page.is_modal_like() {
        match app.page {
            Page::Detail => {
                hints.push(("↑↓", "Scroll"));
                if let Some(detail) = app.detail.as_ref() {
                    hints.extend(detail.actions());
                }
            }
            Page::Editor(_) => {
                hints.push(("Tab/↑↓", "Field"));
                hints.push(("Enter", "Save"));
                hints.push(("Esc", "Cancel"));
            }
            Page::Scheduler => {
                hints.push(("n/h/d/w/m", "Interval"));
                hints.push(("Enter", "Save"));
                hints.push(("Esc", "Cancel"));
            }
            _ => {
                hints.push(("y", "Delete"));
                hints.push(("n/Esc", "Cancel"));
            }
        }
        hints.push(("F10", "Menu"));
        return hints;
    }

    match app.focus {
        FocusMode::Menu => {
            hints.push(("←→", "Menu"));
            hints.push(("Enter", "Open"));
        }
        FocusMode::Content => match app.page {
            Page::Listing(kind) => {
                hints.push(("↑↓", "Select"));
                hints.push(("←→", "Page"));
                hints.push(("Enter", "Detail"));
                hints.push(("r/R", "Refresh/Reload"));
                if kind == EntityKind::Queue {
                    hints.push(("t", "Truncate"));
                }
            }
            Page::Menu => {
                hints.push(("↑↓", "Select"));
                hints.push(("Enter", "Help"));
            }
            Page::Help => {
                hints.push(("↑↓/PgUp/PgDn", "Scroll"));
                hints.push(("Esc", "Commands"));
            }
            Page::Prune => {
                hints.push(("↑↓", "Field"));
                hints.push(("Space", "Toggle"));
                hints.push(("Enter", "Run"));
            }
            Page::Encryption => {
                hints.push(("Enter", "Initialize"));
                hints.push(("r", "Refresh"));
            }
            _ => {
                hints.push(("r", "Refresh"));
            }
        },
    }

    hints.push(("Tab", "Focus"));
    hints.push(("q", "Quit"));
    hints
}
