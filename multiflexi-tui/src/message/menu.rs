//! 菜单栏消息

/// 菜单栏消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuMessage {
    /// 选择左侧一项
    SelectPrevious,
    /// 选择右侧一项
    SelectNext,
    /// 跳转到第一项
    SelectFirst,
    /// 跳转到最后一项
    SelectLast,
    /// 确认选择（进入选中的页面）
    Confirm,
    /// 鼠标点击菜单栏的某一列
    Click(u16),
}
