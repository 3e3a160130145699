//! 命令列表与帮助文本视图

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::model::App;
use crate::view::theme::Styles;

/// 命令名列宽
const NAME_WIDTH: usize = 18;

/// 渲染命令列表
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let commands = &app.commands;

    if commands.commands.is_empty() {
        let text = if commands.loading {
            Line::styled("  Loading commands...", Styles::muted())
        } else if let Some(error) = commands.error.as_deref() {
            Line::styled(format!("  Error: {error}"), Styles::error())
        } else {
            Line::styled("  No commands available", Styles::muted())
        };
        frame.render_widget(Paragraph::new(vec![Line::from(""), text]), area);
        return;
    }

    let items: Vec<ListItem> = commands
        .commands
        .iter()
        .map(|command| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("  {:<NAME_WIDTH$}", command.name), Styles::title()),
                Span::styled(command.description.clone(), Styles::hint_desc()),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(if app.focus.is_content() {
        Styles::selected()
    } else {
        Styles::muted()
    });

    let mut state = ListState::default();
    state.select(Some(commands.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

/// 渲染帮助文本
pub fn render_help(app: &App, frame: &mut Frame, area: Rect) {
    let help = &app.help;

    if help.loading {
        let line = Line::styled(format!("  Loading help for {}...", help.title()), Styles::muted());
        frame.render_widget(Paragraph::new(line), area);
        return;
    }
    if let Some(error) = help.error.as_deref() {
        let lines = vec![
            Line::styled(format!("  Error: {error}"), Styles::error()),
            Line::from(""),
            Line::styled("  Press r to retry or Esc to go back", Styles::muted()),
        ];
        frame.render_widget(Paragraph::new(lines), area);
        return;
    }

    let lines: Vec<Line> = help
        .lines
        .iter()
        .skip(help.scroll)
        .take(usize::from(area.height))
        .map(|line| Line::styled(format!(" {line}"), Styles::text()))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}
