//! 记录详情状态

use multiflexi_core::types::Field;
use multiflexi_core::{EntitySpec, Item};

/// 详情页面状态
#[derive(Debug, Clone)]
pub struct DetailState {
    /// 正在查看的记录
    pub item: Item,
    pub editable: bool,
    pub deletable: bool,
    pub schedulable: bool,
    /// 首个可见字段
    pub scroll: usize,
}

impl DetailState {
    /// 根据实体注册信息创建详情状态
    pub fn new(item: Item, spec: Option<&EntitySpec>) -> Self {
        Self {
            item,
            editable: spec.is_some_and(|s| s.editable),
            deletable: spec.is_some_and(|s| s.deletable),
            schedulable: spec.is_some_and(|s| s.schedulable),
            scroll: 0,
        }
    }

    pub fn fields(&self) -> Vec<Field> {
        self.item.fields()
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll + 1 < self.item.fields().len() {
            self.scroll += 1;
        }
    }

    /// 详情页底部可用操作 `(按键, 说明)`
    pub fn actions(&self) -> Vec<(&'static str, &'static str)> {
        let mut actions = Vec::new();
        if self.editable {
            actions.push(("e", "Edit"));
        }
        if self.schedulable {
            actions.push(("s", "Schedule"));
        }
        if self.deletable {
            actions.push(("d", "Delete"));
        }
        actions.push(("Esc", "Back"));
        actions
    }
}
