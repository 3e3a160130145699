//! 分页列表页面视图

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use multiflexi_core::{EntityKind, EntitySpec};

use crate::model::state::ListingState;
use crate::model::App;
use crate::view::theme::Styles;

/// 渲染列表页面
pub fn render(app: &App, kind: EntityKind, frame: &mut Frame, area: Rect) {
    let (Some(state), Some(spec)) = (app.listing(kind), app.spec(kind)) else {
        let empty = Paragraph::new(Line::styled("  Nothing loaded yet", Styles::muted()));
        frame.render_widget(empty, area);
        return;
    };

    // 表格 + 错误行 + 页脚
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(u16::from(state.error.is_some())),
            Constraint::Length(1),
        ])
        .split(area);

    if state.items.is_empty() {
        render_empty(state, frame, layout[0]);
    } else {
        render_table(app, state, spec, frame, layout[0]);
    }

    if let Some(error) = state.error.as_deref() {
        let line = Line::styled(format!(" Error: {error}"), Styles::error());
        frame.render_widget(Paragraph::new(line), layout[1]);
    }

    frame.render_widget(Paragraph::new(footer(state)), layout[2]);
}

/// 渲染空状态
fn render_empty(state: &ListingState, frame: &mut Frame, area: Rect) {
    let text = if state.loading {
        "  Loading..."
    } else if state.error.is_some() {
        "  No data"
    } else {
        "  No records found"
    };
    let content = vec![Line::from(""), Line::styled(text, Styles::muted())];
    frame.render_widget(Paragraph::new(content), area);
}

/// 渲染记录表格
fn render_table(app: &App, state: &ListingState, spec: &EntitySpec, frame: &mut Frame, area: Rect) {
    let header = Row::new(
        spec.columns
            .iter()
            .map(|column| Cell::from(column.header)),
    )
    .style(Styles::header());

    let rows = state.items.iter().map(|item| {
        Row::new(
            spec.columns
                .iter()
                .map(|column| Cell::from(item.value(column.key).unwrap_or_default())),
        )
    });

    let widths = spec
        .columns
        .iter()
        .map(|column| Constraint::Length(column.width));

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .style(Styles::text())
        .row_highlight_style(if app.focus.is_content() {
            Styles::selected()
        } else {
            Styles::muted()
        });

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// 页脚：页码、加载来源与耗时、缓存统计
fn footer(state: &ListingState) -> Line<'static> {
    let separator = || Span::styled(" │ ", Styles::muted());
    let mut spans = vec![Span::styled(
        format!(
            " {} Page {} {}",
            if state.has_prev { "◀" } else { " " },
            state.page,
            if state.has_more { "▶" } else { " " }
        ),
        Styles::title(),
    )];

    spans.push(separator());
    spans.push(Span::raw(format!("{} rows", state.items.len())));

    if state.loading {
        spans.push(separator());
        spans.push(Span::styled("loading...", Styles::warning()));
    } else if state.loaded_at.is_some() {
        spans.push(separator());
        let source = if state.cached { "cached" } else { "fetched" };
        spans.push(Span::styled(
            format!("{source} in {} ms", state.elapsed.as_millis()),
            if state.cached {
                Styles::success()
            } else {
                Styles::text()
            },
        ));
    }

    if let Some(stats) = state.cache_stats {
        spans.push(separator());
        spans.push(Span::styled(
            format!(
                "cache {}/{} active, {} expired",
                stats.active, stats.total, stats.expired
            ),
            Styles::muted(),
        ));
    }

    if let Some(loaded_at) = state.loaded_at {
        spans.push(separator());
        spans.push(Span::styled(
            format!("updated {}", loaded_at.format("%H:%M:%S")),
            Styles::muted(),
        ));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use multiflexi_core::types::Job;
    use multiflexi_core::{CacheStats, Item, LoadedPage, PageState};

    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn footer_reports_source_and_cache_stats() {
        let mut state = ListingState::new(EntityKind::Job, 10, 1);
        assert!(line_text(&footer(&state)).contains("loading..."));

        state.apply(LoadedPage {
            kind: EntityKind::Job,
            items: vec![Item::Job(Job::default())],
            state: PageState::derive(10, 0, 1, true, Duration::from_millis(12)),
        });
        state.cache_stats = Some(CacheStats {
            total: 3,
            expired: 1,
            active: 2,
        });
        let text = line_text(&footer(&state));
        assert!(text.contains("Page 1"));
        assert!(text.contains("cached in 12 ms"));
        assert!(text.contains("cache 2/3 active, 1 expired"));
    }
}
