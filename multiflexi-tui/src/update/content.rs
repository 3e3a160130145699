//! 内容区消息处理
//!
//! 每个页面只修改自己的视图状态，需要切换页面或产生副作用时返回 `Intent`，
//! 由 `apply_intent` 统一处理。

use multiflexi_core::{Action, EntityKind, RefreshMode};

use crate::message::{Command, ContentMessage, Intent};
use crate::model::state::PruneField;
use crate::model::{App, Page};

use super::{apply_intent, enter_listing, reload_page};

/// 页面对输入的反应
enum Reaction {
    Idle,
    Intent(Intent),
    Command(Command),
}

/// 处理内容区消息
pub fn update(app: &mut App, msg: ContentMessage) -> Command {
    let reaction = match app.page {
        Page::Home => handle_home(msg),
        Page::Listing(kind) => handle_listing(app, kind, msg),
        Page::Encryption => handle_encryption(app, msg),
        Page::Prune => handle_prune(app, msg),
        Page::Menu => handle_commands(app, msg),
        Page::Help => handle_help(app, msg),
        Page::Detail => handle_detail(app, msg),
        Page::Editor(_) => handle_editor(app, msg),
        Page::Scheduler => handle_scheduler(app, msg),
        Page::ConfirmDelete => handle_confirm(msg),
    };

    match reaction {
        Reaction::Idle => Command::None,
        Reaction::Intent(intent) => apply_intent(app, intent),
        Reaction::Command(command) => command,
    }
}

/// 窗口大小变化后转发给当前页面
pub fn resize(app: &mut App) {
    let rows = app.content_rows();
    match app.page {
        Page::Help => app.help.set_viewport(rows),
        Page::Detail => {
            if let Some(detail) = app.detail.as_mut() {
                let max = detail.item.fields().len().saturating_sub(rows.max(1));
                detail.scroll = detail.scroll.min(max);
            }
        }
        _ => {}
    }
}

fn handle_home(msg: ContentMessage) -> Reaction {
    match msg {
        ContentMessage::Refresh | ContentMessage::Reload => Reaction::Command(Command::LoadStatus),
        ContentMessage::Back => Reaction::Intent(Intent::Back),
        _ => Reaction::Idle,
    }
}

fn handle_listing(app: &mut App, kind: EntityKind, msg: ContentMessage) -> Reaction {
    let Some(state) = app.listing_mut(kind) else {
        return Reaction::Command(enter_listing(app, kind));
    };

    match msg {
        ContentMessage::SelectPrevious => state.select_previous(),
        ContentMessage::SelectNext => state.select_next(),
        ContentMessage::SelectFirst => state.select_first(),
        ContentMessage::SelectLast => state.select_last(),

        ContentMessage::NextPage => {
            if let Some(offset) = state.next_page() {
                return Reaction::Command(page_command(state.kind, state.limit, offset, state.session));
            }
        }
        ContentMessage::PreviousPage => {
            if let Some(offset) = state.prev_page() {
                return Reaction::Command(page_command(state.kind, state.limit, offset, state.session));
            }
        }

        ContentMessage::Confirm => {
            if let Some(item) = state.selected_item() {
                return Reaction::Intent(Intent::OpenDetail(item.clone()));
            }
        }
        ContentMessage::Edit => {
            if let Some(item) = state.selected_item() {
                return Reaction::Intent(Intent::Edit(item.clone()));
            }
        }
        ContentMessage::Schedule => {
            if let Some(item) = state.selected_item() {
                return Reaction::Intent(Intent::Schedule(item.clone()));
            }
        }

        ContentMessage::Refresh => return Reaction::Command(reload_page(state, RefreshMode::Sweep)),
        ContentMessage::Reload => return Reaction::Command(reload_page(state, RefreshMode::Reload)),

        ContentMessage::Truncate if kind == EntityKind::Queue => {
            app.set_status("Truncating queue...");
            return Reaction::Intent(Intent::Run(Action::TruncateQueue));
        }

        ContentMessage::Back => return Reaction::Intent(Intent::Back),
        _ => {}
    }
    Reaction::Idle
}

fn page_command(kind: EntityKind, limit: usize, offset: usize, session: u64) -> Command {
    Command::LoadPage {
        kind,
        limit,
        offset,
        mode: RefreshMode::Soft,
        session,
    }
}

fn handle_detail(app: &mut App, msg: ContentMessage) -> Reaction {
    let Some(detail) = app.detail.as_mut() else {
        return Reaction::Intent(Intent::Back);
    };
    match msg {
        ContentMessage::SelectPrevious => detail.scroll_up(),
        ContentMessage::SelectNext => detail.scroll_down(),
        ContentMessage::Edit => return Reaction::Intent(Intent::Edit(detail.item.clone())),
        ContentMessage::Schedule => return Reaction::Intent(Intent::Schedule(detail.item.clone())),
        ContentMessage::Delete => return Reaction::Intent(Intent::Delete(detail.item.clone())),
        ContentMessage::Back => return Reaction::Intent(Intent::Back),
        _ => {}
    }
    Reaction::Idle
}

fn handle_editor(app: &mut App, msg: ContentMessage) -> Reaction {
    let Some(editor) = app.editor.as_mut() else {
        return Reaction::Intent(Intent::Back);
    };
    match msg {
        ContentMessage::Input(c) => editor.input(c),
        ContentMessage::Backspace => editor.backspace(),
        ContentMessage::NextField | ContentMessage::SelectNext => editor.next_field(),
        ContentMessage::PreviousField | ContentMessage::SelectPrevious => editor.previous_field(),
        ContentMessage::Confirm => match editor.build() {
            Ok(item) => return Reaction::Intent(Intent::Save(item)),
            Err(err) => editor.error = Some(err.to_string()),
        },
        ContentMessage::Back => return Reaction::Intent(Intent::Back),
        _ => {}
    }
    Reaction::Idle
}

fn handle_scheduler(app: &mut App, msg: ContentMessage) -> Reaction {
    let Some(scheduler) = app.scheduler.as_mut() else {
        return Reaction::Intent(Intent::Back);
    };
    match msg {
        ContentMessage::Input(c) => scheduler.input(c),
        ContentMessage::Backspace => scheduler.backspace(),
        ContentMessage::Confirm => match scheduler.build() {
            Ok(item) => return Reaction::Intent(Intent::Save(item)),
            Err(err) => scheduler.error = Some(err.to_string()),
        },
        ContentMessage::Back => return Reaction::Intent(Intent::Back),
        _ => {}
    }
    Reaction::Idle
}

fn handle_confirm(msg: ContentMessage) -> Reaction {
    match msg {
        ContentMessage::Answer(answer) => Reaction::Intent(Intent::ConfirmDelete(answer)),
        ContentMessage::Back => Reaction::Intent(Intent::ConfirmDelete(false)),
        _ => Reaction::Idle,
    }
}

fn handle_commands(app: &mut App, msg: ContentMessage) -> Reaction {
    let commands = &mut app.commands;
    match msg {
        ContentMessage::SelectPrevious => commands.select_previous(),
        ContentMessage::SelectNext => commands.select_next(),
        ContentMessage::SelectFirst => commands.select_first(),
        ContentMessage::SelectLast => commands.select_last(),
        ContentMessage::Confirm => {
            if let Some(command) = commands.selected_command() {
                return Reaction::Intent(Intent::ShowHelp(command.name.clone()));
            }
        }
        ContentMessage::Refresh | ContentMessage::Reload => {
            if !commands.loading {
                commands.loading = true;
                commands.error = None;
                return Reaction::Command(Command::LoadCommands);
            }
        }
        ContentMessage::Back => return Reaction::Intent(Intent::Back),
        _ => {}
    }
    Reaction::Idle
}

fn handle_help(app: &mut App, msg: ContentMessage) -> Reaction {
    let page = app.content_rows().max(1);
    let help = &mut app.help;
    match msg {
        ContentMessage::SelectPrevious => help.scroll_up(1),
        ContentMessage::SelectNext => help.scroll_down(1),
        ContentMessage::PreviousPage => help.scroll_up(page),
        ContentMessage::NextPage => help.scroll_down(page),
        ContentMessage::SelectFirst => help.scroll_to_top(),
        ContentMessage::SelectLast => help.scroll_to_bottom(),
        ContentMessage::Refresh | ContentMessage::Reload => {
            let command = help.command.clone();
            return Reaction::Intent(Intent::ShowHelp(command));
        }
        ContentMessage::Back => return Reaction::Intent(Intent::Back),
        _ => {}
    }
    Reaction::Idle
}

fn handle_prune(app: &mut App, msg: ContentMessage) -> Reaction {
    let prune = &mut app.prune;
    match msg {
        ContentMessage::SelectPrevious | ContentMessage::PreviousField => {
            prune.focused = prune.focused.previous();
        }
        ContentMessage::SelectNext | ContentMessage::NextField => {
            prune.focused = prune.focused.next();
        }
        ContentMessage::Input(' ') => prune.toggle(),
        ContentMessage::Input(c) => prune.input(c),
        ContentMessage::Backspace => prune.backspace(),
        ContentMessage::Confirm => match prune.focused {
            PruneField::Logs | PruneField::Jobs => prune.toggle(),
            PruneField::Keep | PruneField::Run => {
                if prune.running {
                    return Reaction::Idle;
                }
                match prune.action() {
                    Ok(action) => {
                        prune.running = true;
                        prune.result = None;
                        prune.error = None;
                        return Reaction::Intent(Intent::Run(action));
                    }
                    Err(err) => prune.error = Some(err),
                }
            }
        },
        ContentMessage::Back => return Reaction::Intent(Intent::Back),
        _ => {}
    }
    Reaction::Idle
}

fn handle_encryption(app: &mut App, msg: ContentMessage) -> Reaction {
    let encryption = &mut app.encryption;
    match msg {
        ContentMessage::Confirm => {
            if !encryption.running {
                encryption.running = true;
                encryption.result = None;
                encryption.error = None;
                return Reaction::Intent(Intent::Run(Action::InitEncryption));
            }
        }
        ContentMessage::Refresh | ContentMessage::Reload => {
            return Reaction::Command(Command::LoadStatus);
        }
        ContentMessage::Back => return Reaction::Intent(Intent::Back),
        _ => {}
    }
    Reaction::Idle
}
