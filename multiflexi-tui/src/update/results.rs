//! 后台结果处理
//!
//! 结果消息只更新状态栏或对应页面的状态；列表的加载失败写入该列表自己的错误槽，
//! 不会切换页面。

use multiflexi_core::{Action, CoreError, CoreResult, EntityKind, ListingOutcome, RefreshMode};

use crate::message::{Command, ResultMessage};
use crate::model::{App, Page};

use super::reload_page;

/// 处理后台结果
pub fn update(app: &mut App, msg: ResultMessage) -> Command {
    match msg {
        ResultMessage::PageLoaded {
            session,
            outcome,
            stats,
        } => {
            let kind = outcome.kind();
            let Some(state) = app.listing_mut(kind) else {
                return Command::None;
            };
            if state.session != session {
                log::debug!("[listing] dropping stale page of {kind} (session {session})");
                return Command::None;
            }
            state.cache_stats = Some(stats);
            match outcome {
                ListingOutcome::Loaded(page) => state.apply(page),
                ListingOutcome::Failed { error, .. } => {
                    log_error("listing", &error);
                    state.fail(error.to_string());
                }
            }
            schedule_refresh(app, kind)
        }

        ResultMessage::Prefetched(outcomes) => {
            let total = outcomes.len();
            let mut warmed = 0;
            for outcome in outcomes {
                match outcome {
                    ListingOutcome::Loaded(_) => warmed += 1,
                    ListingOutcome::Failed { kind, error } => {
                        log::warn!("[prefetch] {kind}: {error}");
                    }
                }
            }
            log::info!("[prefetch] warmed {warmed}/{total} listings");
            Command::None
        }

        ResultMessage::StatusLoaded(status) => {
            if status.is_placeholder() {
                log::warn!("[status] using placeholder snapshot: {}", status.user);
            }
            app.system_status = Some(status);
            Command::None
        }

        ResultMessage::CommandsLoaded(result) => {
            match result {
                Ok(commands) => app.commands.set_commands(commands),
                Err(error) => {
                    log_error("commands", &error);
                    app.commands.loading = false;
                    app.commands.error = Some(error.to_string());
                }
            }
            Command::None
        }

        ResultMessage::HelpLoaded { command, content } => {
            if app.help.command == command {
                app.help.set_content(&content);
            }
            Command::None
        }

        ResultMessage::HelpFailed { command, error } => {
            log_error("help", &error);
            if app.help.command == command {
                app.help.set_error(error.to_string());
            }
            Command::None
        }

        ResultMessage::ActionFinished { action, result } => action_finished(app, &action, result),

        ResultMessage::RefreshDue { kind, session } => {
            let on_listing = app.page == Page::Listing(kind);
            let Some(state) = app.listing_mut(kind) else {
                return Command::None;
            };
            if state.session != session {
                return Command::None;
            }
            state.refresh_pending = false;
            // 不在该列表上时停止自动刷新，返回列表时重新安排
            if !on_listing || state.loading {
                return Command::None;
            }
            reload_page(state, RefreshMode::Soft)
        }
    }
}

/// 需要自动刷新的列表在每次加载完成后安排下一次刷新
fn schedule_refresh(app: &mut App, kind: EntityKind) -> Command {
    let Some(after) = app.spec(kind).and_then(|spec| spec.auto_refresh()) else {
        return Command::None;
    };
    let Some(state) = app.listing_mut(kind) else {
        return Command::None;
    };
    if state.refresh_pending {
        return Command::None;
    }
    state.refresh_pending = true;
    Command::ScheduleRefresh {
        kind,
        session: state.session,
        after,
    }
}

fn action_finished(app: &mut App, action: &Action, result: CoreResult<String>) -> Command {
    let message = match &result {
        Ok(output) => {
            log::info!("[action] {action} succeeded");
            match output.lines().map(str::trim).find(|line| !line.is_empty()) {
                Some(line) => format!("{action}: {line}"),
                None => format!("{action}: done"),
            }
        }
        Err(error) => {
            log_error("action", error);
            error.to_string()
        }
    };

    match action {
        Action::Prune { .. } => {
            app.prune.running = false;
            match result {
                Ok(_) => app.prune.result = Some(message.clone()),
                Err(_) => app.prune.error = Some(message.clone()),
            }
            app.set_status(message);
            Command::None
        }
        Action::InitEncryption => {
            app.encryption.running = false;
            let succeeded = result.is_ok();
            if succeeded {
                app.encryption.result = Some(message.clone());
            } else {
                app.encryption.error = Some(message.clone());
            }
            app.set_status(message);
            if succeeded {
                Command::LoadStatus
            } else {
                Command::None
            }
        }
        Action::Delete { .. } | Action::Update(_) | Action::TruncateQueue => {
            app.set_status(message);
            let Some(kind) = action.affected_kind() else {
                return Command::None;
            };
            if app.page != Page::Listing(kind) {
                return Command::None;
            }
            match app.listing_mut(kind) {
                Some(state) => reload_page(state, RefreshMode::Soft),
                None => Command::None,
            }
        }
    }
}

fn log_error(scope: &str, error: &CoreError) {
    if error.is_expected() {
        log::warn!("[{scope}] {error}");
    } else {
        log::error!("[{scope}] {error}");
    }
}
