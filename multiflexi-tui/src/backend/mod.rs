//！┌─────────────────────────────────────────────────────────────────────────────┐
//！│                              主循环 (app.rs)                               │
//！│                                                                            │
//！│  ┌────────────────────────────── UI 层 ───────────────────────────────┐   │
//！│  │                                                                     │   │
//！│  │   ┌─────────┐          ┌───────────┐          ┌──────────┐         │   │
//！│  │   │  Event  │ ───────▶ │  Message  │ ───────▶ │  Update  │         │   │
//！│  │   │   层    │   翻译    │    层     │   消费    │    层    │         │   │
//！│  │   └─────────┘          │           │          └──┬────┬──┘         │   │
//！│  │        ▲               │ AppMessage│        修改 │    │ Command    │   │
//！│  │        │               │ MenuMsg   │             ▼    │            │   │
//！│  │   ┌─────────┐          │ ContentMsg│      ┌──────────┐│            │   │
//！│  │   │  View   │          │ Intent    │ ┌─── │  Model   ││            │   │
//！│  │   │   层    │          │ ResultMsg │ │    │    层    ││            │   │
//！│  │   └────┬────┘ ◀─ 读取 ─└─────▲─────┘─┘    └──────────┘│            │   │
//！│  │        │                     │ mpsc                   │            │   │
//！│  └────────│─────────────────────│────────────────────────│────────────┘   │
//！│           │                     │                        ▼                │
//！│           ▼                     │                  ┌──────────┐           │
//！│      ┌─────────┐                └───────────────── │ Backend  │           │
//！│      │  终端   │                     ResultMessage │ Executor │           │
//！│      │ (Util)  │                                   └────┬─────┘           │
//！│      └─────────┘                                        │ tokio::spawn    │
//！│                                                         ▼                 │
//！│                                              ┌───────────────────┐        │
//！│                                              │  multiflexi-core  │        │
//！│                                              │ (cache / listing) │        │
//！│                                              └───────────────────┘        │
//！└─────────────────────────────────────────────────────────────────────────────┘
//!
//!
//! src/backend/mod.rs
//! Backend 层：业务服务
//!
//! Backend 层与 UI 完全解耦，负责所有的 I/O。
//! 通过 multiflexi-core 库访问 multiflexi-cli。
//!
//!
//! 有模块结构：
//!     src/backend/mod.rs
//!         mod config;             // 配置文件与日志目录
//!         mod executor;           // 后台命令执行器
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 一、命令执行器（Executor）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     在 src/backend/executor.rs 中定义：
//!
//!         update 层从不直接执行 I/O，而是返回 Command。
//!         主循环把 Command 交给 Executor：
//!
//!             Command::LoadPage      → ListingController::refresh  → PageLoaded
//!             Command::Prefetch      → ListingController::load_batch → Prefetched
//!             Command::LoadStatus    → SystemService::status_or_placeholder
//!             Command::LoadCommands  → SystemService::commands
//!             Command::LoadHelp      → SystemService::help
//!             Command::RunAction     → ActionService::run（成功后失效缓存）
//!             Command::ScheduleRefresh → 延迟后发出 RefreshDue
//!
//!         每个命令在 tokio 运行时上独立执行，结果经 mpsc 通道回到主循环，
//!         主循环每次迭代按顺序取出并交给 update 处理。
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 二、配置（config）
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     在 src/backend/config.rs 中定义：
//!
//!         配置文件：<config_dir>/multiflexi-tui/config.json（缺失时使用默认值）
//!         日志目录：<data_dir>/multiflexi-tui/logs
//!         环境变量 MULTIFLEXI_CLI 覆盖 cli_program
//!

mod config;
mod executor;

pub use config::{get_log_dir, load_config};
pub use executor::Executor;
