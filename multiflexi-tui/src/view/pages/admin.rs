//! 清理与加密页面视图

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::state::PruneField;
use crate::model::App;
use crate::view::theme::Styles;

/// 渲染清理页面
pub fn render_prune(app: &App, frame: &mut Frame, area: Rect) {
    let prune = &app.prune;
    let focused = |field: PruneField| app.focus.is_content() && prune.focused == field;
    let row_style = |field: PruneField| {
        if focused(field) {
            Styles::selected()
        } else {
            Styles::text()
        }
    };
    let checkbox = |checked: bool| if checked { "[x]" } else { "[ ]" };

    let keep = if focused(PruneField::Keep) {
        format!("{}▎", prune.keep)
    } else {
        prune.keep.clone()
    };
    let run = if prune.running { " Running... " } else { " Run prune " };

    let mut lines = vec![
        Line::from(""),
        Line::styled(
            format!("  {} Prune logs", checkbox(prune.logs)),
            row_style(PruneField::Logs),
        ),
        Line::styled(
            format!("  {} Prune jobs", checkbox(prune.jobs)),
            row_style(PruneField::Jobs),
        ),
        Line::from(vec![
            Span::styled("  Keep newest ", Styles::muted()),
            Span::styled(keep, row_style(PruneField::Keep)),
        ]),
        Line::from(""),
        Line::from(vec![Span::raw("  "), Span::styled(run, row_style(PruneField::Run))]),
        Line::from(""),
    ];

    if let Some(result) = prune.result.as_deref() {
        lines.push(Line::styled(format!("  {result}"), Styles::success()));
    }
    if let Some(error) = prune.error.as_deref() {
        lines.push(Line::styled(format!("  {error}"), Styles::error()));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// 渲染加密页面
pub fn render_encryption(app: &App, frame: &mut Frame, area: Rect) {
    let encryption = &app.encryption;
    let status = app
        .system_status
        .as_ref()
        .map_or_else(|| "loading...".to_string(), |s| s.encryption.clone());

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Encryption status: ", Styles::muted()),
            Span::styled(status, Styles::title()),
        ]),
        Line::from(""),
        Line::styled(
            if encryption.running {
                "  Initializing keys..."
            } else {
                "  Press Enter to initialize encryption keys"
            },
            Styles::hint_desc(),
        ),
        Line::from(""),
    ];

    if let Some(result) = encryption.result.as_deref() {
        lines.push(Line::styled(format!("  {result}"), Styles::success()));
    }
    if let Some(error) = encryption.error.as_deref() {
        lines.push(Line::styled(format!("  {error}"), Styles::error()));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
