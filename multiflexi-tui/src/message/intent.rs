//! 页面意图
//!
//! 页面处理输入后不直接产生副作用，而是返回意图，
//! 由 `update` 统一完成页面切换与后台命令调度。

use multiflexi_core::{Action, Item};

/// 页面意图
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// 打开详情
    OpenDetail(Item),
    /// 打开编辑器
    Edit(Item),
    /// 打开调度器
    Schedule(Item),
    /// 请求删除（进入确认）
    Delete(Item),
    /// 确认 / 取消删除
    ConfirmDelete(bool),
    /// 保存编辑结果
    Save(Item),
    /// 返回上一页面
    Back,
    /// 打开命令菜单
    ShowMenu,
    /// 查看命令帮助
    ShowHelp(String),
    /// 执行管理操作（不切换页面）
    Run(Action),
}
