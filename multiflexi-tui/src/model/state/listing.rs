//! 分页列表状态（每个实体类型一份）

use std::time::Duration;

use chrono::{DateTime, Local};
use multiflexi_core::{CacheStats, EntityKind, Item, LoadedPage};

/// 列表页面状态
#[derive(Debug, Clone)]
pub struct ListingState {
    /// 实体类型
    pub kind: EntityKind,
    /// 会话号：每次进入列表重新分配，用于丢弃过期的加载结果
    pub session: u64,
    /// 当前页的记录
    pub items: Vec<Item>,
    /// 当前选中的索引
    pub selected: usize,
    /// 每页条数（固定）
    pub limit: usize,
    pub offset: usize,
    /// 页码，从 1 开始
    pub page: usize,
    pub has_more: bool,
    pub has_prev: bool,
    /// 是否正在加载
    pub loading: bool,
    /// 错误信息
    pub error: Option<String>,
    /// 最近一次是否命中缓存
    pub cached: bool,
    /// 最近一次加载耗时
    pub elapsed: Duration,
    pub loaded_at: Option<DateTime<Local>>,
    pub cache_stats: Option<CacheStats>,
    /// 是否已安排自动刷新
    pub refresh_pending: bool,
    /// `items` 所属页的 offset
    items_offset: Option<usize>,
}

impl ListingState {
    /// 创建新的列表状态，初始即处于加载中
    pub fn new(kind: EntityKind, page_size: usize, session: u64) -> Self {
        Self {
            kind,
            session,
            items: Vec::new(),
            selected: 0,
            limit: page_size.max(1),
            offset: 0,
            page: 1,
            has_more: false,
            has_prev: false,
            loading: true,
            error: None,
            cached: false,
            elapsed: Duration::ZERO,
            loaded_at: None,
            cache_stats: None,
            refresh_pending: false,
            items_offset: None,
        }
    }

    /// 选择上一项
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// 选择下一项
    pub fn select_next(&mut self) {
        if !self.items.is_empty() && self.selected < self.items.len() - 1 {
            self.selected += 1;
        }
    }

    /// 选择第一项
    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    /// 选择最后一项
    pub fn select_last(&mut self) {
        if !self.items.is_empty() {
            self.selected = self.items.len() - 1;
        }
    }

    /// 获取当前选中的记录
    pub fn selected_item(&self) -> Option<&Item> {
        self.items.get(self.selected)
    }

    /// 翻到下一页，返回要加载的 offset
    ///
    /// 仅在 `has_more` 且没有进行中的加载时生效。
    pub fn next_page(&mut self) -> Option<usize> {
        if self.loading || !self.has_more {
            return None;
        }
        let offset = self.offset + self.limit;
        self.begin_page(offset);
        Some(offset)
    }

    /// 翻到上一页，返回要加载的 offset
    pub fn prev_page(&mut self) -> Option<usize> {
        if self.loading || !self.has_prev {
            return None;
        }
        let offset = self.offset.saturating_sub(self.limit);
        self.begin_page(offset);
        Some(offset)
    }

    fn begin_page(&mut self, offset: usize) {
        self.offset = offset;
        self.selected = 0;
        self.loading = true;
    }

    /// 刷新当前页：保留记录与光标，避免闪烁
    pub fn begin_refresh(&mut self) -> usize {
        self.loading = true;
        self.offset
    }

    /// 应用加载结果
    pub fn apply(&mut self, page: LoadedPage) {
        let state = page.state;
        self.items = page.items;
        self.items_offset = Some(state.offset);
        self.limit = state.limit;
        self.offset = state.offset;
        self.page = state.page;
        self.has_more = state.has_more;
        self.has_prev = state.has_prev;
        self.cached = state.cached;
        self.elapsed = state.elapsed;
        self.loaded_at = Some(state.loaded_at);
        self.loading = false;
        self.error = None;
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }

    /// 记录加载失败
    ///
    /// 失败的请求若是另一页，旧记录不再属于当前 offset，一并清空。
    pub fn fail(&mut self, error: String) {
        self.loading = false;
        self.error = Some(error);
        if self.items_offset != Some(self.offset) {
            self.items.clear();
            self.items_offset = None;
            self.selected = 0;
            self.has_more = false;
        }
        self.has_prev = self.offset > 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiflexi_core::types::Job;
    use multiflexi_core::PageState;

    fn page(kind: EntityKind, limit: usize, offset: usize, count: usize) -> LoadedPage {
        let items = (0..count)
            .map(|i| {
                Item::Job(Job {
                    id: i64::try_from(offset + i + 1).unwrap(),
                    ..Job::default()
                })
            })
            .collect();
        LoadedPage {
            kind,
            items,
            state: PageState::derive(limit, offset, count, false, Duration::from_millis(3)),
        }
    }

    #[test]
    fn paging_is_gated_by_flags() {
        let mut state = ListingState::new(EntityKind::Job, 10, 1);
        assert!(state.next_page().is_none(), "still loading");

        state.apply(page(EntityKind::Job, 10, 0, 10));
        assert!(state.has_more);
        assert!(state.prev_page().is_none());
        state.select_last();
        assert_eq!(state.next_page(), Some(10));
        assert_eq!(state.selected, 0);
        assert!(state.loading);
        assert!(state.next_page().is_none(), "one request at a time");

        state.apply(page(EntityKind::Job, 10, 10, 4));
        assert!(!state.has_more);
        assert!(state.has_prev);
        assert_eq!(state.page, 2);
        assert_eq!(state.prev_page(), Some(0));
    }

    #[test]
    fn refresh_keeps_cursor_when_rows_remain() {
        let mut state = ListingState::new(EntityKind::Job, 10, 1);
        state.apply(page(EntityKind::Job, 10, 0, 10));
        state.select_next();
        state.select_next();
        assert_eq!(state.begin_refresh(), 0);
        assert_eq!(state.items.len(), 10);
        state.apply(page(EntityKind::Job, 10, 0, 1));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn failed_next_page_drops_stale_rows() {
        let mut state = ListingState::new(EntityKind::Job, 10, 1);
        state.apply(page(EntityKind::Job, 10, 0, 10));
        state.next_page();
        state.fail("timed out".to_string());
        assert!(state.items.is_empty());
        assert!(!state.has_more);
        assert!(state.has_prev);
        assert_eq!(state.error.as_deref(), Some("timed out"));
    }

    #[test]
    fn failed_refresh_keeps_rows() {
        let mut state = ListingState::new(EntityKind::Job, 10, 1);
        state.apply(page(EntityKind::Job, 10, 0, 3));
        state.begin_refresh();
        state.fail("exited with status 1".to_string());
        assert_eq!(state.items.len(), 3);
        assert!(!state.loading);
    }
}
