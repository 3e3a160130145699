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
//! src/view/mod.rs
//! View 层：UI 渲染
//!
//! View 层只读取 Model，从不修改状态，也不产生消息。
//!
//!
//! 有模块结构：
//!     src/view/mod.rs
//!         mod layout;         // 主布局：菜单栏 / 提示行 / 内容区 / 状态栏
//!         mod theme;          // 颜色与常用样式
//!         mod components;     // 菜单栏、状态栏、对话框
//!         mod pages;          // 各页面内容
//!
//!         pub use layout::render;
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 屏幕布局
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     ┌──────────────────────────────────────────────────────────────┐
//!     │  Status   RunTemplates   Jobs   Applications   ...        │ ← 菜单栏（第 0 行，可水平滚动）
//!     │  View and manage running jobs with pagination controls      │ ← 当前菜单项说明
//!     │ ┌─ Jobs ───────────────────────────────────────────────────┐ │
//!     │ │ ID     App   Command                      Begin          │ │
//!     │ │ 1042   12    backup --company=3           2025-03-01 ... │ │ ← 内容区（页面）
//!     │ │ ...                                                      │ │
//!     │ │ ◀ Page 2 ▶ │ 10 rows │ cached in 3 ms │ cache 4/5 active │ │ ← 列表页脚
//!     │ └──────────────────────────────────────────────────────────┘ │
//!     │  Deleted job #12 │ ↑↓ Select │ ←→ Page │ Enter Detail │ ...  │ ← 状态栏
//!     └──────────────────────────────────────────────────────────────┘
//!
//!     · Detail / Editor 占用整个内容区
//!     · Scheduler / ConfirmDelete 以对话框叠加在来源页面之上
//!

mod components;
mod layout;
mod pages;
mod theme;

pub use layout::render;
