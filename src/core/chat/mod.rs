//! Chat session lifecycle.
//!
//! A session moves `Resolving -> {Error, Greeting} -> Ready`. Resolution binds
//! a catalog character from the route id; the greeting is one automatic turn
//! with [`GREETING_PROMPT`]; after it completes the session accepts user turns
//! indefinitely.
//!
//! Turns are split in two so the UI can keep state on its own thread while the
//! request is in flight: [`ChatSession::begin_turn`] validates the input,
//! appends the user message and builds the [`TurnRequest`];
//! [`ChatSession::complete_turn`] appends the reply (or the apology) once the
//! transport answers. [`ChatSession::submit`] runs both halves inline.

use crate::api::{HistoryEntry, TurnRequest};
use crate::catalog::{format_biography, Catalog, Character, CharacterId, ResolveError};
use crate::core::message::{Message, MessageId};
use crate::core::transport::{ReplyTransport, TransportError};


/// Prompt sent automatically to open the conversation.
pub const GREETING_PROMPT: &str = "Hi!";

/// Transcript text appended in place of a reply when a turn fails.
pub const APOLOGY_TEXT: &str =
    "I apologize, but I'm having trouble responding right now. Please try again.";

/// Static notice shown when the route id does not resolve.
pub const RESOLUTION_NOTICE: &str = "Faced some issue, please navigate to home page";

/// Every newline in a reply is followed by this marker so blank lines survive
/// rendering.
pub const LINE_CONTINUATION: &str = "\n \u{a0}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Resolving,
    Greeting,
    Error(ResolveError),
    Ready,
}

/// Why a submission was ignored. None of these change session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRejected {
    EmptyInput,
    NoCharacter,
    /// A reply is still in flight.
    Composing,
}

impl std::fmt::Display for TurnRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnRejected::EmptyInput => write!(f, "message is empty"),
            TurnRejected::NoCharacter => write!(f, "no character is bound to this session"),
            TurnRejected::Composing => write!(f, "a reply is still being composed"),
        }
    }
}

impl std::error::Error for TurnRejected {}

/// A turn whose request has been built but not yet answered.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    pub turn_id: u64,
    pub request: TurnRequest,
    pub is_greeting: bool,
}

/// Result of a completed turn. Both variants append exactly one model message.
#[derive(Debug)]
pub enum TurnOutcome {
    Replied { message_id: MessageId },
    Failed { message_id: MessageId, error: TransportError },
}

impl TurnOutcome {
    pub fn is_replied(&self) -> bool {
        matches!(self, TurnOutcome::Replied { .. })
    }

    pub fn message_id(&self) -> MessageId {
        match self {
            TurnOutcome::Replied { message_id } | TurnOutcome::Failed { message_id, .. } => {
                *message_id
            }
        }
    }
}

#[derive(Debug)]
pub struct ChatSession {
    state: SessionState,
    character: Option<Character>,
    messages: Vec<Message>,
    input: String,
    composing: bool,
    greeting_loading: bool,
    resolution_failed: bool,
    next_message_id: MessageId,
    next_turn_id: u64,
    in_flight: Option<u64>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// A session in `Resolving`, before the route id has been looked at.
    pub fn new() -> Self {
        Self {
            state: SessionState::Resolving,
            character: None,
            messages: Vec::new(),
            input: String::new(),
            composing: false,
            greeting_loading: true,
            resolution_failed: false,
            next_message_id: 1,
            next_turn_id: 1,
            in_flight: None,
        }
    }

    /// Create a session and resolve `id` against `catalog` in one step.
    pub fn open(catalog: &Catalog, id: Option<CharacterId>) -> Self {
        let mut session = Self::new();
        // Failure is recorded in the session state.
        let _ = session.resolve(catalog, id);
        session
    }

    /// `Resolving -> Greeting` with the character bound, or `-> Error`.
    /// Calling this outside `Resolving` leaves the session untouched.
    pub fn resolve(
        &mut self,
        catalog: &Catalog,
        id: Option<CharacterId>,
    ) -> Result<(), ResolveError> {
        if self.state != SessionState::Resolving {
            return match self.state {
                SessionState::Error(err) => Err(err),
                _ => Ok(()),
            };
        }

        match catalog.resolve(id) {
            Ok(character) => {
                tracing::debug!(id = character.id, name = %character.name, "resolved character");
                self.character = Some(character.clone());
                self.state = SessionState::Greeting;
                Ok(())
            }
            Err(err) => {
                tracing::info!(error = %err, "character resolution failed");
                self.resolution_failed = true;
                self.greeting_loading = false;
                self.state = SessionState::Error(err);
                Err(err)
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }

    pub fn is_greeting_loading(&self) -> bool {
        self.greeting_loading
    }

    pub fn resolution_failed(&self) -> bool {
        self.resolution_failed
    }

    /// Notice to render instead of the transcript, if any.
    pub fn notice(&self) -> Option<&'static str> {
        self.resolution_failed.then_some(RESOLUTION_NOTICE)
    }

    /// Issue the automatic greeting turn. Only valid in `Greeting` before the
    /// greeting has been sent.
    pub fn start_greeting(&mut self) -> Result<PendingTurn, TurnRejected> {
        if self.state != SessionState::Greeting {
            return Err(TurnRejected::NoCharacter);
        }
        if self.composing {
            return Err(TurnRejected::Composing);
        }
        self.input = GREETING_PROMPT.to_string();
        self.begin(true)
    }

    /// Start a user turn from the pending input buffer.
    pub fn begin_turn(&mut self) -> Result<PendingTurn, TurnRejected> {
        self.begin(false)
    }

    fn begin(&mut self, is_greeting: bool) -> Result<PendingTurn, TurnRejected> {
        if self.input.trim().is_empty() {
            return Err(TurnRejected::EmptyInput);
        }
        let character = self.character.as_ref().ok_or(TurnRejected::NoCharacter)?;
        if self.composing {
            return Err(TurnRejected::Composing);
        }

        let prompt = std::mem::take(&mut self.input);
        let request = TurnRequest {
            input_prompt: prompt.clone(),
            history: self.messages.iter().map(HistoryEntry::from).collect(),
            user_story: format_biography(character),
            user: character.name.clone(),
        };

        let id = self.allocate_message_id();
        self.messages.push(Message::user(id, prompt));
        self.composing = true;

        let turn_id = self.next_turn_id;
        self.next_turn_id += 1;
        self.in_flight = Some(turn_id);

        Ok(PendingTurn {
            turn_id,
            request,
            is_greeting,
        })
    }

    /// Record the transport's answer for `turn_id`. Returns `None` when the
    /// turn is not the one in flight (already completed or never started).
    pub fn complete_turn(
        &mut self,
        turn_id: u64,
        result: Result<String, TransportError>,
    ) -> Option<TurnOutcome> {
        if self.in_flight != Some(turn_id) {
            tracing::debug!(turn_id, "ignoring completion for a turn that is not in flight");
            return None;
        }
        Some(self.record_reply(result))
    }

    fn record_reply(&mut self, result: Result<String, TransportError>) -> TurnOutcome {
        let id = self.allocate_message_id();
        let outcome = match result {
            Ok(body) => {
                self.messages.push(Message::model(id, format_reply(&body)));
                TurnOutcome::Replied { message_id: id }
            }
            Err(error) => {
                tracing::warn!(error = %error, "turn failed; appending apology");
                self.messages.push(Message::model(id, APOLOGY_TEXT));
                TurnOutcome::Failed {
                    message_id: id,
                    error,
                }
            }
        };

        self.composing = false;
        self.in_flight = None;
        if self.state == SessionState::Greeting {
            self.greeting_loading = false;
            self.state = SessionState::Ready;
        }

        outcome
    }

    /// Send the greeting through `transport` and wait for it.
    pub async fn greet<T>(&mut self, transport: &T) -> Result<TurnOutcome, TurnRejected>
    where
        T: ReplyTransport + ?Sized,
    {
        let pending = self.start_greeting()?;
        Ok(self.finish(pending, transport).await)
    }

    /// Send the pending input through `transport` and wait for the reply.
    pub async fn submit<T>(&mut self, transport: &T) -> Result<TurnOutcome, TurnRejected>
    where
        T: ReplyTransport + ?Sized,
    {
        let pending = self.begin_turn()?;
        Ok(self.finish(pending, transport).await)
    }

    async fn finish<T>(&mut self, pending: PendingTurn, transport: &T) -> TurnOutcome
    where
        T: ReplyTransport + ?Sized,
    {
        // `&mut self` is held across the await, so this turn is still in flight.
        let result = transport.send_turn(&pending.request).await;
        self.record_reply(result)
    }

    fn allocate_message_id(&mut self) -> MessageId {
        let id = self.next_message_id;
        self.next_message_id += 1;
        id
    }
}

/// Reply body as stored in the transcript: verbatim apart from
/// [`LINE_CONTINUATION`] after each newline.
pub fn format_reply(body: &str) -> String {
    body.replace('\n', LINE_CONTINUATION)
}
