//! Width-aware layout of the chat transcript.
//!
//! The renderer draws exactly these lines and the scroll state counts them, so
//! both always agree on how tall the transcript is.

use crate::core::chat::ChatSession;
use crate::core::message::{Message, Role};
use crate::core::text_wrapping::wrap_text;

/// Narrowest bubble, in columns, before bubbles stop shrinking with the area.
const MIN_BUBBLE_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Speaker name and time above a bubble.
    Header(Role),
    Body(Role),
    Typing,
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub kind: LineKind,
    pub text: String,
}

impl TranscriptLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Bubbles take three quarters of the area, like a chat window.
pub fn bubble_width(area_width: u16) -> usize {
    let area = area_width as usize;
    (area * 3 / 4).max(MIN_BUBBLE_WIDTH).min(area)
}

pub fn speaker_label(role: Role, character_name: &str) -> &str {
    match role {
        Role::User => "You",
        Role::Model => character_name,
    }
}

fn push_message(lines: &mut Vec<TranscriptLine>, message: &Message, name: &str, width: usize) {
    let header = format!(
        "{} · {}",
        speaker_label(message.role, name),
        message.display_time()
    );
    lines.push(TranscriptLine::new(LineKind::Header(message.role), header));
    for line in wrap_text(&message.text, width) {
        lines.push(TranscriptLine::new(LineKind::Body(message.role), line));
    }
    lines.push(TranscriptLine::new(LineKind::Spacer, ""));
}

/// Lay out every message of `session`, plus the typing indicator while a
/// reply is pending.
pub fn layout_transcript(session: &ChatSession, area_width: u16) -> Vec<TranscriptLine> {
    let name = session
        .character()
        .map(|character| character.name.as_str())
        .unwrap_or_default();
    let width = bubble_width(area_width);

    let mut lines = Vec::new();
    for message in session.messages() {
        push_message(&mut lines, message, name, width);
    }
    if session.is_composing() {
        lines.push(TranscriptLine::new(
            LineKind::Typing,
            format!("{name} is typing…"),
        ));
    }
    lines
}

pub fn transcript_line_count(session: &ChatSession, area_width: u16) -> u16 {
    layout_transcript(session, area_width)
        .len()
        .try_into()
        .unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn empty_session_has_no_lines() {
        let session = ChatSession::new();
        assert!(layout_transcript(&session, 80).is_empty());
    }

    #[test]
    fn pending_greeting_shows_prompt_and_typing_indicator() {
        let catalog = Catalog::builtin();
        let mut session = ChatSession::open(&catalog, Some(3));
        session.start_greeting().unwrap();

        let lines = layout_transcript(&session, 80);
        let kinds: Vec<LineKind> = lines.iter().map(|line| line.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Header(Role::User),
                LineKind::Body(Role::User),
                LineKind::Spacer,
                LineKind::Typing,
            ]
        );
        assert!(lines[0].text.starts_with("You · "));
        assert_eq!(lines[1].text, "Hi!");
        assert_eq!(lines[3].text, "Jun-ho Park is typing…");
    }

    #[test]
    fn replies_are_headed_by_character_name_and_wrapped() {
        let catalog = Catalog::builtin();
        let mut session = ChatSession::open(&catalog, Some(1));
        let pending = session.start_greeting().unwrap();
        session
            .complete_turn(pending.turn_id, Ok("word ".repeat(20)))
            .unwrap();

        let lines = layout_transcript(&session, 40);
        let reply_header = lines
            .iter()
            .find(|line| line.kind == LineKind::Header(Role::Model))
            .unwrap();
        assert!(reply_header.text.starts_with("Miguel Santos · "));

        let body_lines = lines
            .iter()
            .filter(|line| line.kind == LineKind::Body(Role::Model))
            .count();
        assert!(body_lines > 1);
        assert!(lines
            .iter()
            .all(|line| line.kind == LineKind::Header(Role::Model)
                || unicode_width::UnicodeWidthStr::width(line.text.as_str()) <= 30));
        assert_eq!(
            transcript_line_count(&session, 40) as usize,
            lines.len()
        );
    }

    #[test]
    fn bubble_width_scales_with_area() {
        assert_eq!(bubble_width(100), 75);
        assert_eq!(bubble_width(24), 20);
        assert_eq!(bubble_width(10), 10);
    }
}
