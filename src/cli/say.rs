//! TUI-less "say" command

use std::error::Error;
use std::fmt;

use crate::catalog::{Catalog, CharacterId, ResolveError};
use crate::core::chat::{ChatSession, TurnOutcome, TurnRejected, LINE_CONTINUATION};
use crate::core::transport::{ReplyTransport, TransportError};

/// What a one-shot turn produced. `error` is set when the transport failed
/// and `text` holds the apology instead of a reply.
#[derive(Debug)]
pub struct SayReply {
    pub character: String,
    pub text: String,
    pub error: Option<TransportError>,
}

#[derive(Debug)]
pub enum SayError {
    Resolve(ResolveError),
    Rejected(TurnRejected),
}

impl fmt::Display for SayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SayError::Resolve(err) => write!(f, "{err}"),
            SayError::Rejected(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SayError::Resolve(err) => Some(err),
            SayError::Rejected(err) => Some(err),
        }
    }
}

/// Run a single turn against character `id` without the greeting.
pub async fn say<T>(
    catalog: &Catalog,
    id: CharacterId,
    prompt: &str,
    transport: &T,
) -> Result<SayReply, SayError>
where
    T: ReplyTransport + ?Sized,
{
    let mut session = ChatSession::new();
    session.resolve(catalog, Some(id)).map_err(SayError::Resolve)?;
    session.set_input(prompt);

    let outcome = session.submit(transport).await.map_err(SayError::Rejected)?;
    let message_id = outcome.message_id();
    let text = session
        .messages()
        .iter()
        .find(|m| m.id == message_id)
        .map(|m| m.text.replace(LINE_CONTINUATION, "\n"))
        .unwrap_or_default();
    let character = session
        .character()
        .map(|c| c.name.clone())
        .unwrap_or_default();

    let error = match outcome {
        TurnOutcome::Replied { .. } => None,
        TurnOutcome::Failed { error, .. } => Some(error),
    };

    Ok(SayReply {
        character,
        text,
        error,
    })
}

pub async fn run_say<T>(
    catalog: &Catalog,
    id: CharacterId,
    prompt: &str,
    transport: &T,
) -> Result<(), Box<dyn Error>>
where
    T: ReplyTransport + ?Sized,
{
    if prompt.trim().is_empty() {
        eprintln!("Usage: rolechat say -c <id> <message>");
        std::process::exit(1);
    }

    match say(catalog, id, prompt, transport).await {
        Ok(reply) => {
            println!("{}", reply.text);
            if let Some(err) = reply.error {
                eprintln!("\n❌ Error: {err}");
                std::process::exit(1);
            }
            Ok(())
        }
        Err(SayError::Resolve(err)) => {
            eprintln!("❌ {err}");
            eprintln!("💡 List the characters with: rolechat characters");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("❌ Error: {err}");
            std::process::exit(1);
        }
    }
}
