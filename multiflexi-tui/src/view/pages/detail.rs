//! 记录详情页面视图

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::model::App;
use crate::view::theme::Styles;

/// 渲染详情页面
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let Some(detail) = app.detail.as_ref() else {
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let fields = detail.fields();
    let label_width = fields
        .iter()
        .map(|field| field.label.width())
        .max()
        .unwrap_or(0)
        + 2;

    let lines: Vec<Line> = fields
        .into_iter()
        .skip(detail.scroll)
        .map(|field| {
            let pad = label_width.saturating_sub(field.label.width());
            Line::from(vec![
                Span::styled(format!(" {}{}", field.label, " ".repeat(pad)), Styles::muted()),
                Span::styled(field.value, Styles::text()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), layout[0]);

    let actions: Vec<Span> = detail
        .actions()
        .into_iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!(" [{key}]"), Styles::hint_key()),
                Span::styled(format!(" {desc}"), Styles::hint_desc()),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(actions)), layout[1]);
}
