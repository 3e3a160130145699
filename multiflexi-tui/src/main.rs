//! MultiFlexi TUI
//!
//! ## 架构
//!
//! 采用 Elm Architecture (TEA) 模式：
//! - **Model**: 应用状态 (`model/`)
//! - **Message**: 事件消息与副作用命令 (`message/`)
//! - **Update**: 状态更新 (`update/`)
//! - **View**: UI 渲染 (`view/`)
//! - **Event**: 输入处理 (`event/`)
//! - **Backend**: 配置与命令执行 (`backend/`)
//!
//!
//! main.rs
//! MultiFlexi TUI 的程序入口
//!
//! 其执行：
//! fn `main()` {
//!
//!     load_config()           // 读取 config.json 与 MULTIFLEXI_TUI_* 环境变量
//!     init_logging()          // 日志写入文件，终端留给界面
//!     Runtime::new()          // tokio 运行时，后台取数都在这里跑
//!     ServiceContext          // 数据源 + 缓存 + 列表控制器 + 服务
//!     init_terminal()         // 初始化终端
//!     app::run()              // 运行 app.rs 主循环
//!     restore_terminal()      // 无论成功与否，都恢复终端
//!
//! }
//!
//!
//! 配置错误在接管终端之前报告，直接打印到 stderr。

mod app;
mod backend;
mod event;
mod message;
mod model;
mod update;
mod util;
mod view;

use std::sync::Arc;

use anyhow::{Context, Result};
use multiflexi_core::source::CliDataSource;
use multiflexi_core::ServiceContext;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use backend::{get_log_dir, load_config, Executor};
use message::AppMessage;
use util::{init_logging, init_terminal, restore_terminal};

fn main() -> Result<()> {
    // 1. 加载配置
    let config = load_config().context("failed to load configuration")?;
    let prefetch = config.prefetch_kinds()?;

    // 2. 初始化日志（guard 存活期间后台写线程保持运行）
    let _log_guard = init_logging(&get_log_dir())?;
    tracing::info!(program = %config.cli_program, "starting multiflexi-tui");

    // 3. 组装服务
    let runtime = Runtime::new().context("failed to start tokio runtime")?;
    let source = CliDataSource::new(config.cli_program.clone())
        .with_base_args(config.cli_args.clone());
    let ctx = Arc::new(ServiceContext::from_config(Arc::new(source), &config)?);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let executor = Executor::new(Arc::clone(&ctx), runtime.handle().clone(), tx);

    // 4. 创建应用实例
    let mut app = model::App::new(ctx.listing.registry_handle());

    // 5. 初始化终端
    let mut terminal = init_terminal(config.mouse)?;
    let size = terminal.size()?;
    let command = update::update(
        &mut app,
        AppMessage::Resize {
            width: size.width,
            height: size.height,
        },
    );
    executor.execute(command);
    executor.execute(update::init(prefetch));

    // 6. 运行主循环
    let result = app::run(&mut terminal, &mut app, &executor, &mut rx);

    // 7. 恢复终端（无论成功失败都执行）
    restore_terminal(&mut terminal)?;

    if let Err(ref error) = result {
        tracing::error!("exited with error: {error:#}");
    } else {
        tracing::info!("bye");
    }

    // 8. 返回结果
    result
}
