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
//! src/message/mod.rs
//! Message 层：事件消息定义
//!
//! 作为 Event —→ Update 之间的桥梁，也是后台任务回到主循环的唯一入口。
//! 所有的用户操作和状态变更都通过 Message 来表达，Update 层根据 Message 来更新 Model。
//!
//!
//! 有模块结构：
//!     src/message/mod.rs
//!         mod app;        // AppMessage       主消息，主循环每次处理一条
//!         mod menu;       // MenuMessage      菜单栏移动 / 选择 / 点击
//!         mod content;    // ContentMessage   交给当前页面的输入
//!         mod intent;     // Intent           页面处理输入后返回的意图
//!         mod result;     // ResultMessage    后台命令完成后的结果
//!         mod command;    // Command          Update 返回、由 Backend 执行的命令
//!
//!
//! 一次按键的旅程：
//!
//!     KeyEvent(Enter)
//!         └─▶ AppMessage::Content(ContentMessage::Confirm)        // event/handler.rs
//!                 └─▶ Intent::OpenDetail(item)                    // update/content.rs
//!                         └─▶ page = Detail, previous = Listing   // update/mod.rs
//!
//! 一次加载的旅程：
//!
//!     Command::LoadPage { .. }                                    // update 返回
//!         └─▶ Executor::execute                                   // backend/executor.rs
//!                 └─▶ ListingController::refresh(..).await        // multiflexi-core
//!                         └─▶ AppMessage::Result(PageLoaded { .. })
//!                                 └─▶ update/results.rs
//!

mod app;
mod command;
mod content;
mod intent;
mod menu;
mod result;

pub use app::AppMessage;
pub use command::Command;
pub use content::ContentMessage;
pub use intent::Intent;
pub use menu::MenuMessage;
pub use result::ResultMessage;
