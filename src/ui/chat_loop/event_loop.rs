//! Event polling, dispatching, and UI rendering loop.
//!
//! Terminal events are read on a background task and turned into
//! [`AppAction`]s; turn requests run on spawned tasks that report back through
//! the same dispatcher. Only this loop mutates the [`App`].

use std::{error::Error, sync::Arc, time::Duration};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::core::app::{
    apply_actions, App, AppAction, AppActionContext, AppActionDispatcher, AppActionEnvelope,
    AppCommand, TurnTask,
};
use crate::core::route::Route;
use crate::core::transport::ReplyTransport;
use crate::ui::layout::transcript_context;
use crate::ui::renderer::ui;
use crate::ui::theme::Theme;

use super::keybindings::{handle_key, handle_mouse, handle_paste};
use super::lifecycle::{restore_terminal, setup_terminal, SharedTerminal};
use super::AppHandle;

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => continue,
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

pub(super) fn spawn_turn(
    transport: Arc<dyn ReplyTransport>,
    dispatcher: AppActionDispatcher,
    task: TurnTask,
) {
    tokio::spawn(async move {
        let TurnTask {
            generation,
            turn_id,
            request,
        } = task;
        let result = transport.send_turn(&request).await;
        dispatcher.dispatch(
            AppAction::TurnCompleted {
                generation,
                turn_id,
                result,
            },
            AppActionContext::default(),
        );
    });
}

pub(super) async fn drain_action_queue(
    app: &AppHandle,
    dispatcher: &AppActionDispatcher,
    transport: &Arc<dyn ReplyTransport>,
    action_rx: &mut mpsc::UnboundedReceiver<AppActionEnvelope>,
) -> bool {
    let mut pending = Vec::new();
    while let Ok(envelope) = action_rx.try_recv() {
        pending.push(envelope);
    }

    if pending.is_empty() {
        return false;
    }

    let commands = app.update(|app| apply_actions(app, pending)).await;
    for cmd in commands {
        match cmd {
            AppCommand::SpawnTurn(task) => {
                spawn_turn(transport.clone(), dispatcher.clone(), task);
            }
        }
    }
    true
}

fn action_context(app: &App, area: Rect) -> AppActionContext {
    let input_rows = app
        .chat()
        .map(|chat| chat.textarea.lines().len())
        .unwrap_or(1);
    transcript_context(area, input_rows)
}

/// Feed queued terminal events to the keybindings. Returns whether any
/// event was seen.
async fn process_ui_events(
    app: &AppHandle,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    dispatcher: &AppActionDispatcher,
    area: Rect,
) -> bool {
    let mut processed = false;
    while let Ok(UiEvent::Crossterm(event)) = event_rx.try_recv() {
        processed = true;
        let (actions, ctx) = app
            .update(|app| {
                let actions = match &event {
                    Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, *key),
                    Event::Mouse(mouse) => handle_mouse(app, *mouse),
                    Event::Paste(text) => {
                        handle_paste(app, text);
                        Vec::new()
                    }
                    _ => Vec::new(),
                };
                (actions, action_context(app, area))
            })
            .await;
        dispatcher.dispatch_many(actions, ctx);
    }
    processed
}

async fn draw_frame(
    app: &AppHandle,
    terminal: &SharedTerminal,
    theme: &Theme,
) -> Result<Rect, Box<dyn Error>> {
    let mut guard = terminal.lock().await;
    let size = guard.size()?;
    app.update(|app| guard.draw(|f| ui(f, app, theme)).map(|_| ()))
        .await?;
    Ok(Rect::new(0, 0, size.width, size.height))
}

/// Run the interactive UI until the user quits. `initial_route` picks the
/// first screen; the catalog is shown when it is [`Route::Catalog`].
pub async fn run_chat(
    app: App,
    transport: Arc<dyn ReplyTransport>,
    initial_route: Route,
) -> Result<(), Box<dyn Error>> {
    let app = AppHandle::new(Arc::new(tokio::sync::Mutex::new(app)));
    let theme = Theme::dark_default();

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppActionEnvelope>();
    let dispatcher = AppActionDispatcher::new(action_tx);
    if initial_route != Route::Catalog {
        dispatcher.dispatch(
            AppAction::Navigate {
                route: initial_route,
            },
            AppActionContext::default(),
        );
    }

    let terminal = setup_terminal()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);

    let mut request_redraw = true;
    let mut area = Rect::default();

    let result = loop {
        if app.read(|app| app.should_exit()).await {
            break Ok(());
        }

        if request_redraw {
            match draw_frame(&app, &terminal, &theme).await {
                Ok(drawn) => area = drawn,
                Err(err) => break Err(err),
            }
            request_redraw = false;
        }

        let events_processed = process_ui_events(&app, &mut event_rx, &dispatcher, area).await;
        let actions_applied =
            drain_action_queue(&app, &dispatcher, &transport, &mut action_rx).await;

        if events_processed || actions_applied {
            request_redraw = true;
        } else {
            tokio::time::sleep(Duration::from_millis(16)).await;
        }
    };

    event_reader_handle.abort();
    restore_terminal(&terminal).await?;
    result
}
