use crate::core::chat::LINE_CONTINUATION;
use crate::core::message::{Message, Role};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Plain-text transcript of the conversation, appended as messages arrive.
pub struct LoggingState {
    file_path: Option<PathBuf>,
}

impl LoggingState {
    /// Validates that `log_file` can be opened for appending before accepting it.
    pub fn new(log_file: Option<PathBuf>) -> io::Result<Self> {
        if let Some(path) = &log_file {
            test_file_access(path)?;
        }
        Ok(LoggingState {
            file_path: log_file,
        })
    }

    pub fn disabled() -> Self {
        LoggingState { file_path: None }
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Section header written when a new chat session starts.
    pub fn log_session_start(&self, character_name: &str) -> io::Result<()> {
        self.write_to_log(&format!("## Roleplay with {character_name}"))
    }

    pub fn log_message(&self, message: &Message) -> io::Result<()> {
        self.write_to_log(&transcript_entry(message))
    }

    fn write_to_log(&self, content: &str) -> io::Result<()> {
        let Some(file_path) = &self.file_path else {
            return Ok(());
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        let mut writer = BufWriter::new(file);

        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }
        // Blank line between entries, as on screen.
        writeln!(writer)?;

        writer.flush()
    }
}

/// User entries carry a `You: ` prefix; replies are written as-is without the
/// on-screen continuation marker.
fn transcript_entry(message: &Message) -> String {
    match message.role {
        Role::User => format!("You: {}", message.text),
        Role::Model => message.text.replace(LINE_CONTINUATION, "\n"),
    }
}

fn test_file_access(path: &Path) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.flush()
}

/// Route `tracing` output to `path`. Without a path diagnostics are dropped,
/// since the terminal belongs to the UI.
pub fn init_debug_log(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::options().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rolechat=debug"));

    // A second initialization (tests, repeated calls) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn disabled_logging_writes_nothing() {
        let logging = LoggingState::new(None).unwrap();
        assert!(logging.file_path().is_none());
        logging.log_message(&Message::user(1, "hello")).unwrap();
    }

    #[test]
    fn new_rejects_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("chat.log");
        assert!(LoggingState::new(Some(path)).is_err());
    }

    #[test]
    fn transcript_prefixes_user_and_strips_continuations() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chat.log");
        let logging = LoggingState::new(Some(path.clone())).unwrap();

        logging.log_session_start("Jun-ho Park").unwrap();
        logging.log_message(&Message::user(1, "Hi!")).unwrap();
        logging
            .log_message(&Message::model(2, "Hello.\n \u{a0}How are you?"))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "## Roleplay with Jun-ho Park\n\nYou: Hi!\n\nHello.\nHow are you?\n\n"
        );
    }

    #[test]
    fn init_debug_log_without_path_is_a_no_op() {
        assert!(init_debug_log(None).is_ok());
    }
}
