//! 首页视图：系统状态

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::App;
use crate::view::theme::Styles;

/// 标签列宽度
const LABEL_WIDTH: usize = 14;

/// 渲染首页
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    // 首页布局：欢迎信息 + 状态信息
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // 欢迎区域
            Constraint::Min(1),    // 状态区域
        ])
        .split(area);

    let welcome = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  MultiFlexi",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  Run templates, jobs and companies at a glance",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(welcome), layout[0]);

    let block = Block::default()
        .title(" System ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(status) = app.system_status.as_ref() else {
        let loading = Paragraph::new(Line::styled("  Loading system status...", Styles::muted()))
            .block(block);
        frame.render_widget(loading, layout[1]);
        return;
    };

    let value_style = if status.is_placeholder() {
        Styles::error()
    } else {
        Styles::text()
    };
    let lines: Vec<Line> = status
        .rows()
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("  {label:<LABEL_WIDTH$}"), Styles::muted()),
                Span::styled(value, value_style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), layout[1]);
}
