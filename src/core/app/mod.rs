use crate::catalog::{Catalog, CharacterId};
use crate::core::catalog_view::CatalogView;
use crate::core::chat::{ChatSession, PendingTurn, SessionState};
use crate::core::message::Message;
use crate::core::route::Route;
use crate::utils::logging::LoggingState;
use crate::utils::scroll::ScrollState;
use ratatui::style::Style;
use tui_textarea::TextArea;

pub mod actions;
pub mod transcript;

pub use actions::{
    apply_actions, AppAction, AppActionContext, AppActionDispatcher, AppActionEnvelope, AppCommand,
    TurnTask,
};

/// Everything needed to build an [`App`].
pub struct AppInitConfig {
    pub catalog: Catalog,
    pub grid_columns: u16,
    pub scroll_threshold: u16,
    pub transcript: LoggingState,
}

/// Chat screen state owned by the UI loop.
pub struct ChatScreen {
    pub session: ChatSession,
    pub scroll: ScrollState,
    pub textarea: TextArea<'static>,
    route_id: Option<CharacterId>,
}

impl ChatScreen {
    fn new(session: ChatSession, route_id: Option<CharacterId>, scroll_threshold: u16) -> Self {
        Self {
            session,
            scroll: ScrollState::new(scroll_threshold),
            textarea: new_textarea(),
            route_id,
        }
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn clear_input(&mut self) {
        self.textarea = new_textarea();
    }

    pub fn transcript_line_count(&self, width: u16) -> u16 {
        transcript::transcript_line_count(&self.session, width)
    }
}

fn new_textarea() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text("Type your message…");
    textarea.set_cursor_line_style(Style::default());
    textarea
}

pub enum Screen {
    Catalog(CatalogView),
    Chat(Box<ChatScreen>),
}

pub struct App {
    catalog: Catalog,
    pub screen: Screen,
    grid_columns: u16,
    scroll_threshold: u16,
    transcript: LoggingState,
    /// Bumped every time a chat screen is opened; completions carry the
    /// generation they were spawned under.
    generation: u64,
    exit_requested: bool,
}

impl App {
    pub fn new(init: AppInitConfig) -> Self {
        let screen = Screen::Catalog(catalog_view(&init.catalog, init.grid_columns));
        Self {
            catalog: init.catalog,
            screen,
            grid_columns: init.grid_columns,
            scroll_threshold: init.scroll_threshold,
            transcript: init.transcript,
            generation: 0,
            exit_requested: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn route(&self) -> Route {
        match &self.screen {
            Screen::Catalog(_) => Route::Catalog,
            Screen::Chat(chat) => Route::Chat { id: chat.route_id },
        }
    }

    pub fn chat(&self) -> Option<&ChatScreen> {
        match &self.screen {
            Screen::Chat(chat) => Some(chat),
            Screen::Catalog(_) => None,
        }
    }

    pub fn chat_mut(&mut self) -> Option<&mut ChatScreen> {
        match &mut self.screen {
            Screen::Chat(chat) => Some(chat),
            Screen::Catalog(_) => None,
        }
    }

    pub fn catalog_view(&self) -> Option<&CatalogView> {
        match &self.screen {
            Screen::Catalog(view) => Some(view),
            Screen::Chat(_) => None,
        }
    }

    pub fn catalog_view_mut(&mut self) -> Option<&mut CatalogView> {
        match &mut self.screen {
            Screen::Catalog(view) => Some(view),
            Screen::Chat(_) => None,
        }
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn should_exit(&self) -> bool {
        self.exit_requested
    }

    /// Switch screens. Opening a chat resolves the character and, when that
    /// succeeds, returns the greeting turn to spawn.
    pub fn navigate(&mut self, route: Route) -> Option<AppCommand> {
        tracing::debug!(%route, "navigating");
        match route {
            Route::Catalog => {
                self.screen = Screen::Catalog(catalog_view(&self.catalog, self.grid_columns));
                None
            }
            Route::Chat { id } => {
                self.generation += 1;
                let session = ChatSession::open(&self.catalog, id);
                let mut chat = ChatScreen::new(session, id, self.scroll_threshold);

                let command = if chat.session.state() == SessionState::Greeting {
                    if let Some(character) = chat.session.character() {
                        self.log_result(self.transcript.log_session_start(&character.name));
                    }
                    match chat.session.start_greeting() {
                        Ok(pending) => {
                            if let Some(message) = chat.session.messages().last() {
                                self.log_message(message);
                            }
                            Some(self.turn_command(pending))
                        }
                        Err(rejected) => {
                            tracing::warn!(%rejected, "greeting not sent");
                            None
                        }
                    }
                } else {
                    None
                };

                self.screen = Screen::Chat(Box::new(chat));
                command
            }
        }
    }

    pub(crate) fn turn_command(&self, pending: PendingTurn) -> AppCommand {
        tracing::debug!(
            generation = self.generation,
            turn_id = pending.turn_id,
            greeting = pending.is_greeting,
            "spawning turn"
        );
        AppCommand::SpawnTurn(TurnTask {
            generation: self.generation,
            turn_id: pending.turn_id,
            request: pending.request,
        })
    }

    pub(crate) fn log_message(&self, message: &Message) {
        self.log_result(self.transcript.log_message(message));
    }

    fn log_result(&self, result: std::io::Result<()>) {
        if let Err(err) = result {
            tracing::warn!(error = %err, "failed to write transcript log");
        }
    }
}

fn catalog_view(catalog: &Catalog, columns: u16) -> CatalogView {
    let ids = catalog.characters().iter().map(|c| c.id).collect();
    CatalogView::new(ids, columns as usize)
}

#[cfg(test)]
mod tests;
