//! 顶部菜单栏状态
//!
//! 菜单项水平排列，每项渲染为 ` 标签 `，项与项之间留 `ITEM_GAP` 列空隙。
//! 当终端宽度不足以显示全部菜单项时，通过 `offset` 水平滚动，
//! 始终保证 `offset <= cursor`，且光标所在项完整可见。

use std::ops::Range;

use multiflexi_core::EntityKind;
use unicode_width::UnicodeWidthStr;

/// 菜单项之间的空隙（列）
pub const ITEM_GAP: u16 = 1;

/// 菜单项 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Status,
    Listing(EntityKind),
    Encryption,
    Prune,
    Commands,
    Help,
    Quit,
}

/// 菜单项
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub entry: MenuEntry,
    pub label: &'static str,
    /// 菜单栏下方的说明
    pub hint: &'static str,
}

impl MenuItem {
    const fn new(entry: MenuEntry, label: &'static str, hint: &'static str) -> Self {
        Self { entry, label, hint }
    }

    /// 渲染宽度（含左右各一列内边距）
    pub fn width(&self) -> u16 {
        u16::try_from(self.label.width())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
    }
}

/// 菜单栏状态
#[derive(Debug, Clone)]
pub struct MenuBar {
    /// 菜单项列表
    pub items: Vec<MenuItem>,
    /// 当前选中的索引
    pub cursor: usize,
    /// 第一个可见项的索引
    pub offset: usize,
}

impl MenuBar {
    /// 创建默认菜单栏
    pub fn new() -> Self {
        use MenuEntry::{Commands, Encryption, Help, Listing, Prune, Quit, Status};

        Self {
            items: vec![
                MenuItem::new(Status, "Status", "View system dashboard with status information"),
                MenuItem::new(
                    Listing(EntityKind::RunTemplate),
                    "RunTemplates",
                    "View and manage run templates with pagination controls",
                ),
                MenuItem::new(
                    Listing(EntityKind::Job),
                    "Jobs",
                    "View and manage running jobs with pagination controls",
                ),
                MenuItem::new(
                    Listing(EntityKind::Application),
                    "Applications",
                    "Browse available MultiFlexi applications and their status",
                ),
                MenuItem::new(
                    Listing(EntityKind::Company),
                    "Companies",
                    "View registered companies and their configuration",
                ),
                MenuItem::new(
                    Listing(EntityKind::Credential),
                    "Credentials",
                    "Browse credentials assigned to companies",
                ),
                MenuItem::new(Listing(EntityKind::Token), "Tokens", "Browse API tokens"),
                MenuItem::new(Listing(EntityKind::User), "Users", "Browse MultiFlexi users"),
                MenuItem::new(
                    Listing(EntityKind::Artifact),
                    "Artifacts",
                    "Browse files produced by jobs",
                ),
                MenuItem::new(
                    Listing(EntityKind::CredType),
                    "CredTypes",
                    "Browse credential types",
                ),
                MenuItem::new(
                    Listing(EntityKind::CompanyApp),
                    "CompanyApps",
                    "Browse applications assigned to companies",
                ),
                MenuItem::new(
                    Listing(EntityKind::CrPrototype),
                    "CrPrototypes",
                    "Browse credential prototypes",
                ),
                MenuItem::new(Encryption, "Encryption", "Show encryption status and initialize keys"),
                MenuItem::new(
                    Listing(EntityKind::Queue),
                    "Queue",
                    "Inspect the job queue, press t to truncate it",
                ),
                MenuItem::new(Prune, "Prune", "Remove old log entries and jobs"),
                MenuItem::new(
                    Commands,
                    "Commands",
                    "Browse available MultiFlexi commands and their documentation",
                ),
                MenuItem::new(Help, "Help", "View help and documentation for using this interface"),
                MenuItem::new(Quit, "Quit", "Exit the MultiFlexi TUI application"),
            ],
            cursor: 0,
            offset: 0,
        }
    }

    /// 选择上一项
    pub fn select_previous(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// 选择下一项
    pub fn select_next(&mut self) {
        if self.cursor < self.items.len().saturating_sub(1) {
            self.cursor += 1;
        }
    }

    /// 跳转到第一项
    pub fn select_first(&mut self) {
        self.cursor = 0;
    }

    /// 跳转到最后一项
    pub fn select_last(&mut self) {
        self.cursor = self.items.len().saturating_sub(1);
    }

    /// 选中指定索引，越界时忽略
    pub fn select(&mut self, index: usize) {
        if index < self.items.len() {
            self.cursor = index;
        }
    }

    /// 选中指定菜单项
    pub fn select_entry(&mut self, entry: MenuEntry) {
        if let Some(index) = self.items.iter().position(|item| item.entry == entry) {
            self.cursor = index;
        }
    }

    /// 获取当前选中的菜单项
    pub fn current(&self) -> Option<&MenuItem> {
        self.items.get(self.cursor)
    }

    /// `from..=to` 项占用的总宽度
    fn span(&self, from: usize, to: usize) -> u32 {
        let widths: u32 = self.items[from..=to]
            .iter()
            .map(|item| u32::from(item.width()))
            .sum();
        let gaps = u32::try_from(to - from).unwrap_or(u32::MAX);
        widths.saturating_add(gaps.saturating_mul(u32::from(ITEM_GAP)))
    }

    /// 调整 `offset`，使光标项在 `width` 列内可见
    pub fn ensure_visible(&mut self, width: u16) {
        if self.items.is_empty() {
            self.cursor = 0;
            self.offset = 0;
            return;
        }
        self.cursor = self.cursor.min(self.items.len() - 1);
        if self.offset > self.cursor {
            self.offset = self.cursor;
        }
        while self.offset < self.cursor && self.span(self.offset, self.cursor) > u32::from(width) {
            self.offset += 1;
        }
    }

    /// 从 `offset` 开始能完整放进 `width` 列的项
    ///
    /// 第一项即使超宽也会被返回（渲染时截断）。
    pub fn visible(&self, width: u16) -> Range<usize> {
        let width = u32::from(width);
        let mut used = 0u32;
        let mut end = self.offset;
        for (index, item) in self.items.iter().enumerate().skip(self.offset) {
            let gap = if index > self.offset { u32::from(ITEM_GAP) } else { 0 };
            let needed = used + gap + u32::from(item.width());
            if needed > width && index > self.offset {
                break;
            }
            used = needed;
            end = index + 1;
        }
        self.offset..end
    }

    /// 将菜单栏行内的列号解析为菜单项索引
    ///
    /// 从 `offset` 开始自左向右累加各项宽度；落在空隙上返回 `None`。
    pub fn item_at(&self, column: u16) -> Option<usize> {
        let column = u32::from(column);
        let mut x = 0u32;
        for (index, item) in self.items.iter().enumerate().skip(self.offset) {
            let width = u32::from(item.width());
            if column < x + width {
                return Some(index);
            }
            x += width;
            if column < x + u32::from(ITEM_GAP) {
                return None;
            }
            x += u32::from(ITEM_GAP);
        }
        None
    }
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_within_bounds() {
        let mut menu = MenuBar::new();
        menu.select_previous();
        assert_eq!(menu.cursor, 0);
        menu.select_last();
        menu.select_next();
        assert_eq!(menu.cursor, menu.items.len() - 1);
        assert_eq!(menu.current().map(|item| item.entry), Some(MenuEntry::Quit));
    }

    #[test]
    fn offset_keeps_cursor_visible_for_every_width() {
        for width in [1u16, 8, 20, 40, 80, 200] {
            let mut menu = MenuBar::new();
            for _ in 0..menu.items.len() {
                menu.select_next();
                menu.ensure_visible(width);
                assert!(menu.offset <= menu.cursor);
                assert!(menu.offset <= menu.items.len());
                assert!(menu.visible(width).contains(&menu.cursor), "width {width}");
            }
            for _ in 0..menu.items.len() {
                menu.select_previous();
                menu.ensure_visible(width);
                assert!(menu.offset <= menu.cursor);
                assert!(menu.visible(width).contains(&menu.cursor), "width {width}");
            }
        }
    }

    #[test]
    fn wide_terminal_never_scrolls() {
        let mut menu = MenuBar::new();
        menu.select_last();
        menu.ensure_visible(u16::MAX);
        assert_eq!(menu.offset, 0);
        assert_eq!(menu.visible(u16::MAX), 0..menu.items.len());
    }

    #[test]
    fn click_columns_resolve_to_items() {
        let menu = MenuBar::new();
        // " Status " = 8 列, 空隙 1 列, 然后 " RunTemplates "
        assert_eq!(menu.item_at(0), Some(0));
        assert_eq!(menu.item_at(7), Some(0));
        assert_eq!(menu.item_at(8), None);
        assert_eq!(menu.item_at(9), Some(1));
        assert_eq!(menu.item_at(u16::MAX), None);
    }

    #[test]
    fn click_columns_respect_scroll_offset() {
        let mut menu = MenuBar::new();
        menu.offset = 2;
        assert_eq!(menu.item_at(0), Some(2));
        let jobs = menu.items[2].width();
        assert_eq!(menu.item_at(jobs + ITEM_GAP), Some(3));
    }

    #[test]
    fn select_entry_moves_cursor() {
        let mut menu = MenuBar::new();
        menu.select_entry(MenuEntry::Commands);
        assert_eq!(menu.current().map(|item| item.label), Some("Commands"));
    }
}
