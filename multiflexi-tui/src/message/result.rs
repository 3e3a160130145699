//! 后台任务结果
//!
//! 每个后台命令完成后恰好产生一条结果消息，经通道回到主循环。

use multiflexi_core::types::{CommandInfo, StatusInfo};
use multiflexi_core::{Action, CacheStats, CoreError, CoreResult, EntityKind, ListingOutcome};

/// 后台结果消息
#[derive(Debug)]
pub enum ResultMessage {
    /// 一页列表加载完成
    PageLoaded {
        session: u64,
        outcome: ListingOutcome,
        stats: CacheStats,
    },
    /// 启动预热完成
    Prefetched(Vec<ListingOutcome>),
    /// 系统状态加载完成（失败时为占位快照）
    StatusLoaded(StatusInfo),
    /// 命令列表
    CommandsLoaded(CoreResult<Vec<CommandInfo>>),
    /// 帮助文本
    HelpLoaded { command: String, content: String },
    HelpFailed { command: String, error: CoreError },
    /// 管理操作完成
    ActionFinished {
        action: Action,
        result: CoreResult<String>,
    },
    /// 自动刷新到期
    RefreshDue { kind: EntityKind, session: u64 },
}
