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
//! src/event/mod.rs
//! Event 层：事件处理
//!
//! 负责将键盘/鼠标等输入事件转换为 Message。
//!
//!
//! 有模块结构：
//!     src/event/mod.rs
//!         mod handler;        // 事件处理器
//!         mod keymap;         // 快捷键映射
//!
//!         pub use handler::{handle_event, poll_event};
//!
//!
//!     其中有：
//!         · poll_event      事件轮询，受 ~/app.rs 调用，最长等待 timeout
//!
//!         · handle_event    事件分发
//!
//!         接收以下 Event 类型：
//!             Event::Key(KeyEvent)                // 键盘事件
//!             Event::Mouse(MouseEvent)            // 鼠标事件：滚轮转换为 ↑/↓，点击菜单行或内容区
//!             Event::Resize(width, height)        // 终端窗口大小变化 → AppMessage::Resize
//!
//!
//! ═══════════════════════════════════════════════════════════════════════════
//! 按键路由
//! ═══════════════════════════════════════════════════════════════════════════
//!
//!     每个按键依次判断：
//!
//!         1. 全局快捷键
//!             Ctrl+C      → Quit（任意页面）
//!             F10         → OpenMenu（任意页面）
//!             Tab / q     → ToggleFocus / Quit（仅非类弹窗页面）
//!
//!         2. 焦点在菜单栏且不是类弹窗页面
//!             ←/→ h/l  Home/End  Enter/空格   → MenuMessage
//!             其余按键继续向下传递
//!
//!         3. 当前页面自己的按键表 → ContentMessage
//!             Esc 在所有页面都是 Back，由 update 层决定含义
//!
//!     类弹窗页面（Detail / Editor / Scheduler / ConfirmDelete）中，
//!     q 是返回、取消或普通输入字符，不会退出程序。
//!

mod handler;
mod keymap;

pub use handler::{handle_event, poll_event};
