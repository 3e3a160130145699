//! 编辑器与调度对话框视图

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use multiflexi_core::types::INTERVAL_CODES;

use crate::model::App;
use crate::view::components::dialog;
use crate::view::theme::Styles;

/// 渲染编辑器
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let Some(editor) = app.editor.as_ref() else {
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let mut lines = vec![
        Line::styled(format!(" {} #{}", editor.item.label(), editor.item.id()), Styles::title()),
        Line::from(""),
    ];
    for (index, field) in editor.fields.iter().enumerate() {
        let focused = index == editor.focused;
        lines.push(Line::styled(format!(" {}", field.label), Styles::muted()));
        // 焦点字段显示光标
        let value = if focused {
            format!("   {}▎", field.value)
        } else {
            format!("   {}", field.value)
        };
        lines.push(Line::styled(
            value,
            if focused {
                Styles::selected()
            } else {
                Styles::text()
            },
        ));
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(lines), layout[0]);

    if let Some(error) = editor.error.as_deref() {
        let line = Line::styled(format!(" {error}"), Styles::error());
        frame.render_widget(Paragraph::new(line), layout[1]);
    }
}

/// 渲染运行模板调度对话框
pub fn render_scheduler(app: &App, frame: &mut Frame, area: Rect) {
    let Some(scheduler) = app.scheduler.as_ref() else {
        return;
    };

    let codes: Vec<Span> = INTERVAL_CODES
        .iter()
        .map(|(code, name)| Span::styled(format!("  {code}={name}"), Styles::hint_desc()))
        .collect();

    let mut lines = vec![
        Line::styled(format!("  {}", scheduler.item.label()), Styles::title()),
        Line::from(""),
        Line::styled("  Interval", Styles::muted()),
        Line::styled(format!("    {}▎", scheduler.interval), Styles::selected()),
        Line::from(codes),
    ];
    if let Some(error) = scheduler.error.as_deref() {
        lines.push(Line::styled(format!("  {error}"), Styles::error()));
    }
    dialog::render(frame, area, "Schedule", lines, 60);
}
