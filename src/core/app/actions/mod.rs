mod catalog;
mod chat;

use tokio::sync::mpsc;

use super::App;
use crate::api::TurnRequest;
use crate::catalog::CharacterId;
use crate::core::route::Route;
use crate::core::transport::TransportError;

pub enum AppAction {
    Navigate {
        route: Route,
    },
    CatalogMoveLeft,
    CatalogMoveRight,
    CatalogMoveUp,
    CatalogMoveDown,
    CatalogSelect {
        id: CharacterId,
    },
    CatalogToggleCursor,
    CatalogCollapse,
    /// Proceed from the expanded card to its chat.
    StartRoleplay,
    SubmitInput,
    TurnCompleted {
        generation: u64,
        turn_id: u64,
        result: Result<String, TransportError>,
    },
    ScrollUp {
        lines: u16,
    },
    ScrollDown {
        lines: u16,
    },
    PageUp,
    PageDown,
    ScrollToTop,
    ScrollToLatest,
    Quit,
}

/// Size of the transcript area when the action was raised; scroll actions
/// need it to count wrapped lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppActionContext {
    pub transcript_width: u16,
    pub transcript_height: u16,
}

pub struct AppActionEnvelope {
    pub action: AppAction,
    pub context: AppActionContext,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppActionEnvelope>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppActionEnvelope>) -> Self {
        Self { tx }
    }

    pub fn dispatch(&self, action: AppAction, ctx: AppActionContext) {
        self.dispatch_many([action], ctx);
    }

    pub fn dispatch_many<I>(&self, actions: I, ctx: AppActionContext)
    where
        I: IntoIterator<Item = AppAction>,
    {
        for action in actions.into_iter() {
            let _ = self.tx.send(AppActionEnvelope {
                action,
                context: ctx,
            });
        }
    }
}

/// A turn request to run on the transport, tagged with the chat generation
/// it belongs to.
#[derive(Debug, Clone)]
pub struct TurnTask {
    pub generation: u64,
    pub turn_id: u64,
    pub request: TurnRequest,
}

#[derive(Debug)]
pub enum AppCommand {
    SpawnTurn(TurnTask),
}

pub fn apply_actions(
    app: &mut App,
    envelopes: impl IntoIterator<Item = AppActionEnvelope>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for envelope in envelopes {
        if let Some(cmd) = apply_action(app, envelope.action, envelope.context) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction, ctx: AppActionContext) -> Option<AppCommand> {
    match action {
        AppAction::Navigate { route } => app.navigate(route),
        AppAction::Quit => {
            app.request_exit();
            None
        }

        AppAction::CatalogMoveLeft
        | AppAction::CatalogMoveRight
        | AppAction::CatalogMoveUp
        | AppAction::CatalogMoveDown
        | AppAction::CatalogSelect { .. }
        | AppAction::CatalogToggleCursor
        | AppAction::CatalogCollapse
        | AppAction::StartRoleplay => catalog::handle_catalog_action(app, action),

        AppAction::SubmitInput
        | AppAction::TurnCompleted { .. }
        | AppAction::ScrollUp { .. }
        | AppAction::ScrollDown { .. }
        | AppAction::PageUp
        | AppAction::PageDown
        | AppAction::ScrollToTop
        | AppAction::ScrollToLatest => chat::handle_chat_action(app, action, ctx),
    }
}
