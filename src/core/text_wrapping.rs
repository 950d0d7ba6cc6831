//! Word wrapping for transcript layout.
//!
//! Wrapping is done up front so the renderer and the scroll math agree on the
//! number of visual lines. Only ASCII spaces are break opportunities; other
//! whitespace (tabs excepted) such as the non-breaking space in reply
//! continuations stays glued to its word.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Copy)]
pub struct WrapConfig {
    /// Maximum display width of a line; zero disables wrapping.
    pub width: usize,
}

impl WrapConfig {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

pub struct TextWrapper;

impl TextWrapper {
    /// Wrap `text` into display lines. Explicit newlines always start a new
    /// line; words wider than the line are split by character.
    pub fn wrap_lines(text: &str, config: &WrapConfig) -> Vec<String> {
        let mut lines = Vec::new();
        for raw in text.split('\n') {
            wrap_single_line(raw, config.width, &mut lines);
        }
        lines
    }
}

/// Wrap `text` to `width` columns.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    TextWrapper::wrap_lines(text, &WrapConfig::new(width))
}

fn is_break(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Split into alternating runs of break characters and word characters.
fn tokens(line: &str) -> Vec<(bool, &str)> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut current_is_space = None;

    for (idx, ch) in line.char_indices() {
        let space = is_break(ch);
        match current_is_space {
            Some(prev) if prev != space => {
                out.push((prev, &line[start..idx]));
                start = idx;
                current_is_space = Some(space);
            }
            None => current_is_space = Some(space),
            _ => {}
        }
    }
    if let Some(space) = current_is_space {
        out.push((space, &line[start..]));
    }
    out
}

fn wrap_single_line(line: &str, width: usize, out: &mut Vec<String>) {
    if width == 0 {
        out.push(line.to_string());
        return;
    }

    let mut current = String::new();
    let mut current_width = 0usize;
    let mut pending_space = "";

    for (is_space, token) in tokens(line) {
        if is_space {
            pending_space = token;
            continue;
        }

        let space_width = pending_space.width();
        let word_width = token.width();

        if current_width + space_width + word_width <= width {
            current.push_str(pending_space);
            current.push_str(token);
            current_width += space_width + word_width;
        } else if word_width <= width {
            if current_width > 0 {
                out.push(std::mem::take(&mut current));
            }
            current.push_str(token);
            current_width = word_width;
        } else {
            if current_width > 0 && current_width + space_width < width {
                current.push_str(pending_space);
                current_width += space_width;
            } else if current_width > 0 {
                out.push(std::mem::take(&mut current));
                current_width = 0;
            }
            for ch in token.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && current_width > 0 {
                    out.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }
        pending_space = "";
    }

    out.push(current);
}
