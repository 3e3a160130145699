//! 应用主消息

use super::{ContentMessage, MenuMessage, ResultMessage};

/// 应用主消息
#[derive(Debug)]
pub enum AppMessage {
    /// 退出应用
    Quit,

    /// 切换焦点（菜单栏 / 内容区）
    ToggleFocus,

    /// 打开命令菜单
    OpenMenu,

    /// 鼠标点击内容区：焦点移到内容区
    FocusContent,

    /// 终端窗口大小改变
    Resize { width: u16, height: u16 },

    /// 菜单栏相关消息
    Menu(MenuMessage),

    /// 内容区相关消息
    Content(ContentMessage),

    /// 后台任务结果
    Result(ResultMessage),

    /// 无操作（用于忽略未处理的事件）
    Noop,
}
