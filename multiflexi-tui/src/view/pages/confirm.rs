//! 删除确认对话框

use ratatui::{layout::Rect, text::Line, Frame};

use crate::model::App;
use crate::view::components::dialog;
use crate::view::theme::Styles;

/// 渲染删除确认对话框
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let Some(pending) = app.pending_delete.as_ref() else {
        return;
    };

    let lines = vec![
        Line::from(""),
        Line::styled(
            format!("  Delete {} #{} \"{}\"?", pending.kind, pending.id, pending.label),
            Styles::text(),
        ),
        Line::styled("  This cannot be undone.", Styles::warning()),
        Line::from(""),
        Line::styled("  [y] Delete    [n] Cancel", Styles::hint_key()),
    ];
    dialog::render(frame, area, "Confirm Deletion", lines, 56);
}
