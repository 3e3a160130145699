//! 待确认的删除

use multiflexi_core::{Action, EntityKind, Item};

/// 待删除记录的上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub kind: EntityKind,
    pub id: i64,
    /// 显示名称
    pub label: String,
}

impl PendingDelete {
    pub fn from_item(item: &Item) -> Self {
        Self {
            kind: item.kind(),
            id: item.id(),
            label: item.label(),
        }
    }

    /// 确认后执行的操作
    pub fn action(&self) -> Action {
        Action::Delete {
            kind: self.kind,
            id: self.id,
        }
    }
}
