//! 后台命令
//!
//! `update` 只返回命令描述，由 `backend::Executor` 在 tokio 运行时上执行，
//! 结果以 `ResultMessage` 的形式回到主循环。

use std::time::Duration;

use multiflexi_core::{Action, EntityKind, RefreshMode};

/// 后台命令
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Command {
    /// 无操作
    #[default]
    None,
    /// 多个命令
    Batch(Vec<Command>),
    /// 加载一页列表
    LoadPage {
        kind: EntityKind,
        limit: usize,
        offset: usize,
        mode: RefreshMode,
        session: u64,
    },
    /// 并发预热多个列表的首页
    Prefetch(Vec<EntityKind>),
    /// 加载系统状态
    LoadStatus,
    /// 加载命令列表
    LoadCommands,
    /// 加载帮助文本
    LoadHelp(String),
    /// 执行管理操作
    RunAction(Action),
    /// 延迟后发出自动刷新
    ScheduleRefresh {
        kind: EntityKind,
        session: u64,
        after: Duration,
    },
}

impl Command {
    /// 合并多个命令，忽略 `None`
    pub fn batch(commands: impl IntoIterator<Item = Command>) -> Self {
        let mut flat: Vec<Command> = Vec::new();
        for command in commands {
            match command {
                Command::None => {}
                Command::Batch(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Command::None,
            1 => flat.pop().unwrap_or_default(),
            _ => Command::Batch(flat),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Command::None)
    }

    /// 展开为单个命令列表
    pub fn into_vec(self) -> Vec<Command> {
        match self {
            Command::None => Vec::new(),
            Command::Batch(commands) => commands,
            other => vec![other],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_flattens_and_drops_none() {
        assert_eq!(Command::batch([Command::None, Command::None]), Command::None);
        assert_eq!(
            Command::batch([Command::None, Command::LoadStatus]),
            Command::LoadStatus
        );
        let nested = Command::batch([
            Command::Batch(vec![Command::LoadStatus, Command::LoadCommands]),
            Command::LoadHelp("job".to_string()),
        ]);
        assert_eq!(nested.into_vec().len(), 3);
    }
}
