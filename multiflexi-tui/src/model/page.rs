//! 视图标识

use multiflexi_core::EntityKind;

/// 页面枚举
///
/// 任意时刻只有一个页面是"当前"页面。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// 系统状态首页
    #[default]
    Home,
    /// 某一实体类型的分页列表
    Listing(EntityKind),
    /// 加密状态与初始化
    Encryption,
    /// 清理日志与任务
    Prune,
    /// 外部命令列表
    Menu,
    /// 帮助文本
    Help,
    /// 单条记录详情
    Detail,
    /// 某一可编辑类型的编辑器
    Editor(EntityKind),
    /// 运行模板调度
    Scheduler,
    /// 删除确认
    ConfirmDelete,
}

impl Page {
    /// 获取页面标题
    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "System Status",
            Page::Listing(_) => "Listing",
            Page::Encryption => "Encryption",
            Page::Prune => "Prune Logs and Jobs",
            Page::Menu => "Commands",
            Page::Help => "Help",
            Page::Detail => "Detail",
            Page::Editor(_) => "Editor",
            Page::Scheduler => "Scheduler",
            Page::ConfirmDelete => "Confirm Deletion",
        }
    }

    /// 类弹窗页面：强制内容焦点，支持单层返回
    pub fn is_modal_like(self) -> bool {
        matches!(
            self,
            Page::Detail | Page::Editor(_) | Page::Scheduler | Page::ConfirmDelete
        )
    }

    /// 类列表页面：可作为返回目标
    pub fn is_listing_like(self) -> bool {
        !self.is_modal_like()
    }

    /// 列表页面对应的实体类型
    pub fn listing_kind(self) -> Option<EntityKind> {
        match self {
            Page::Listing(kind) => Some(kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modal_like_pages() {
        for page in [Page::Detail, Page::Editor(EntityKind::Job), Page::Scheduler, Page::ConfirmDelete] {
            assert!(page.is_modal_like(), "{page:?}");
        }
        for page in [Page::Home, Page::Listing(EntityKind::Job), Page::Menu, Page::Help, Page::Prune] {
            assert!(page.is_listing_like(), "{page:?}");
        }
    }
}
