//! 焦点模式：菜单栏 / 内容区

/// 焦点模式枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusMode {
    /// 顶部菜单栏
    #[default]
    Menu,
    /// 内容区
    Content,
}

impl FocusMode {
    /// 切换到另一侧
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            FocusMode::Menu => FocusMode::Content,
            FocusMode::Content => FocusMode::Menu,
        }
    }

    /// 是否是菜单栏
    pub fn is_menu(self) -> bool {
        matches!(self, FocusMode::Menu)
    }

    /// 是否是内容区
    pub fn is_content(self) -> bool {
        matches!(self, FocusMode::Content)
    }
}
