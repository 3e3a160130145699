//! 内容区消息：由按键翻译而来，交给当前页面处理

/// 内容区消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMessage {
    // ========== 列表导航 ==========
    /// 选择上一项
    SelectPrevious,
    /// 选择下一项
    SelectNext,
    /// 跳转到第一项
    SelectFirst,
    /// 跳转到最后一项
    SelectLast,
    /// 上一页
    PreviousPage,
    /// 下一页
    NextPage,
    /// 确认选择（进入详情或执行操作）
    Confirm,

    // ========== 记录操作 ==========
    /// 编辑
    Edit,
    /// 调度
    Schedule,
    /// 删除
    Delete,
    /// 刷新：清理过期缓存后重新加载
    Refresh,
    /// 重载：清空缓存后重新加载
    Reload,
    /// 清空队列
    Truncate,

    // ========== 确认弹窗 ==========
    /// 回答是 / 否
    Answer(bool),

    // ========== 文本输入 ==========
    Input(char),
    Backspace,
    NextField,
    PreviousField,

    /// 返回
    Back,
}
