//!
//! app.rs
//! 应用主循环
//!
//!
//!
//! 在应用启动时，创建终端并初始化为以下状态：
//!
//! App {
//!
//!     should_quit: bool = false,                      // 决定应用是否应该退出
//!     focus: FocusMode::Menu,                         // 焦点在顶部菜单栏
//!     menu: MenuBar {
//!         items: [Status, RunTemplates, Jobs, ..., Commands, Help, Quit],
//!         cursor = 0,                                     // 当前高亮第几项
//!         offset = 0,                                     // 窄终端下的水平滚动偏移
//!     },
//!     page = Page::Home,                              // 首页显示系统状态
//!     listings = {},                                  // 各实体的列表状态，进入时创建
//!     status_message = None,                          // 状态栏消息
//!
//! }
//!
//!
//! 主循环大约每 100 ms 执行一次（取决于有无事件）
//! 应用的主循环中有：
//! loop {
//!
//!     if dirty { terminal.draw(...); app.on_rendered() }  // 仅在状态变化后重绘
//!     if app.should_quit { break }                        // 检查 APP 是否应该退出
//!     if let Some(event) = poll_event() {                 // 轮询获取输入，在此等待 100ms
//!         let msg = handle_event(event, &app);                // 翻译为消息
//!         let cmd = update::update(&mut app, msg);            // 更新状态，得到副作用命令
//!         executor.execute(cmd);                              // 交给后台执行
//!     }
//!     while let Ok(msg) = rx.try_recv() {                 // 收集后台任务的结果
//!         let cmd = update::update(&mut app, msg);
//!         executor.execute(cmd);
//!     }
//! }
//!
//! 状态消息只保留一次渲染（见 App::on_rendered），
//! 所以只有真正画过一帧之后才清除它。

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::backend::Executor;
use crate::event;
use crate::message::AppMessage;
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// 运行应用主循环
pub fn run(
    terminal: &mut Term,
    app: &mut App,
    executor: &Executor,
    rx: &mut UnboundedReceiver<AppMessage>,
) -> Result<()> {
    let mut dirty = true;

    loop {
        // 1. 渲染 UI
        if dirty {
            terminal.draw(|frame| {
                view::render(app, frame);
            })?;
            app.on_rendered();
            dirty = false;
        }

        // 2. 检查是否应该退出
        if app.should_quit {
            break;
        }

        // 3. 轮询事件（100ms 超时）
        if let Some(event) = event::poll_event(POLL_INTERVAL)? {
            // 4. 处理事件，获取消息
            let msg = event::handle_event(event, app);
            dirty |= dispatch(app, executor, msg);
        }

        // 5. 处理后台结果
        while let Ok(msg) = rx.try_recv() {
            dirty |= dispatch(app, executor, msg);
        }
    }

    Ok(())
}

/// 更新状态并执行副作用，返回是否需要重绘
fn dispatch(app: &mut App, executor: &Executor, msg: AppMessage) -> bool {
    if matches!(msg, AppMessage::Noop) {
        return false;
    }
    let command = update::update(app, msg);
    executor.execute(command);
    true
}
