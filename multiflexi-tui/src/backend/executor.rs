//! 命令执行器
//!
//! 把 update 层返回的 `Command` 交给 tokio 运行时执行，
//! 完成后通过 mpsc 通道把 `ResultMessage` 送回主循环。

use std::future::Future;
use std::sync::Arc;

use multiflexi_core::ServiceContext;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::message::{AppMessage, Command, ResultMessage};

/// 后台命令执行器
pub struct Executor {
    /// 服务上下文
    ctx: Arc<ServiceContext>,
    /// tokio 运行时句柄
    handle: Handle,
    /// 结果回传通道
    tx: UnboundedSender<AppMessage>,
}

impl Executor {
    /// 创建执行器
    pub fn new(ctx: Arc<ServiceContext>, handle: Handle, tx: UnboundedSender<AppMessage>) -> Self {
        Self { ctx, handle, tx }
    }

    /// 执行命令（不阻塞）
    pub fn execute(&self, command: Command) {
        let ctx = Arc::clone(&self.ctx);
        match command {
            Command::None => {}

            Command::Batch(commands) => {
                for command in commands {
                    self.execute(command);
                }
            }

            Command::LoadPage {
                kind,
                limit,
                offset,
                mode,
                session,
            } => {
                log::debug!("[backend] load {kind} limit={limit} offset={offset} mode={mode:?}");
                self.spawn(async move {
                    let outcome = ctx.listing.refresh(kind, limit, offset, mode).await;
                    let stats = ctx.listing.cache_stats().await;
                    ResultMessage::PageLoaded {
                        session,
                        outcome,
                        stats,
                    }
                });
            }

            Command::Prefetch(kinds) => {
                self.spawn(async move { ResultMessage::Prefetched(ctx.listing.load_batch(&kinds).await) });
            }

            Command::LoadStatus => {
                self.spawn(async move { ResultMessage::StatusLoaded(ctx.system.status_or_placeholder().await) });
            }

            Command::LoadCommands => {
                self.spawn(async move { ResultMessage::CommandsLoaded(ctx.system.commands().await) });
            }

            Command::LoadHelp(command) => {
                self.spawn(async move {
                    match ctx.system.help(&command).await {
                        Ok(content) => ResultMessage::HelpLoaded { command, content },
                        Err(error) => ResultMessage::HelpFailed { command, error },
                    }
                });
            }

            Command::RunAction(action) => {
                log::info!("[backend] run {action}");
                self.spawn(async move {
                    let result = ctx.actions.run(&action).await;
                    // 修改成功后丢弃该类型的缓存页，重新加载时拿到新数据
                    if result.is_ok() {
                        if let Some(kind) = action.affected_kind() {
                            ctx.listing.invalidate(kind).await;
                        }
                    }
                    ResultMessage::ActionFinished { action, result }
                });
            }

            Command::ScheduleRefresh {
                kind,
                session,
                after,
            } => {
                self.spawn(async move {
                    tokio::time::sleep(after).await;
                    ResultMessage::RefreshDue { kind, session }
                });
            }
        }
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ResultMessage> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let result = task.await;
            if tx.send(AppMessage::Result(result)).is_err() {
                log::debug!("[backend] main loop gone, dropping result");
            }
        });
    }
}
