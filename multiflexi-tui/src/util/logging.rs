//! 日志初始化
//!
//! 终端被界面占用，日志写入按天滚动的文件。
//! `log` 宏的记录经 tracing-subscriber 桥接到同一个输出。

use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日志级别环境变量（EnvFilter 语法）
pub const LOG_ENV: &str = "MULTIFLEXI_TUI_LOG";

/// 日志文件名前缀
const LOG_FILE: &str = "multiflexi-tui.log";

/// 初始化日志，返回的 guard 需要保持到程序退出，否则缓冲中的日志会丢失
pub fn init_logging(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .try_init()?;

    Ok(guard)
}
