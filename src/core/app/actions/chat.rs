use super::{AppAction, AppActionContext, AppCommand};
use crate::core::app::App;
use crate::core::transport::TransportError;

pub(super) fn handle_chat_action(
    app: &mut App,
    action: AppAction,
    ctx: AppActionContext,
) -> Option<AppCommand> {
    match action {
        AppAction::SubmitInput => submit_input(app, ctx),
        AppAction::TurnCompleted {
            generation,
            turn_id,
            result,
        } => {
            complete_turn(app, generation, turn_id, result);
            None
        }
        AppAction::ScrollUp { .. }
        | AppAction::ScrollDown { .. }
        | AppAction::PageUp
        | AppAction::PageDown
        | AppAction::ScrollToTop
        | AppAction::ScrollToLatest => {
            scroll(app, action, ctx);
            None
        }
        _ => unreachable!("non-chat action routed to chat handler"),
    }
}

fn submit_input(app: &mut App, ctx: AppActionContext) -> Option<AppCommand> {
    let chat = app.chat_mut()?;
    let text = chat.input_text();
    chat.session.set_input(text);

    match chat.session.begin_turn() {
        Ok(pending) => {
            chat.clear_input();
            let total = chat.transcript_line_count(ctx.transcript_width);
            chat.scroll.scroll_to_bottom(total, ctx.transcript_height);
            if let Some(message) = chat.session.messages().last().cloned() {
                app.log_message(&message);
            }
            Some(app.turn_command(pending))
        }
        Err(rejected) => {
            tracing::debug!(%rejected, "submission ignored");
            None
        }
    }
}

fn complete_turn(
    app: &mut App,
    generation: u64,
    turn_id: u64,
    result: Result<String, TransportError>,
) {
    if generation != app.generation() {
        tracing::debug!(generation, turn_id, "dropping completion from a closed chat");
        return;
    }
    let Some(chat) = app.chat_mut() else {
        return;
    };
    let Some(outcome) = chat.session.complete_turn(turn_id, result) else {
        return;
    };
    tracing::debug!(turn_id, replied = outcome.is_replied(), "turn completed");
    if let Some(message) = chat.session.messages().last().cloned() {
        app.log_message(&message);
    }
}

fn scroll(app: &mut App, action: AppAction, ctx: AppActionContext) {
    let Some(chat) = app.chat_mut() else {
        return;
    };
    let total = chat.transcript_line_count(ctx.transcript_width);
    let height = ctx.transcript_height;
    let scroll = &mut chat.scroll;
    scroll.sync(total, height);

    match action {
        AppAction::ScrollUp { lines } => scroll.scroll_up(lines, total, height),
        AppAction::ScrollDown { lines } => scroll.scroll_down(lines, total, height),
        AppAction::PageUp => scroll.page_up(total, height),
        AppAction::PageDown => scroll.page_down(total, height),
        AppAction::ScrollToTop => scroll.scroll_to_top(total, height),
        AppAction::ScrollToLatest => scroll.scroll_to_bottom(total, height),
        _ => {}
    }
}
