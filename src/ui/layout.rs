//! Screen geometry. Shared by the renderer and by the event loop, which needs
//! the transcript size to interpret scroll keys.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::app::AppActionContext;

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 1;
pub const CARD_HEIGHT: u16 = 6;
/// Input grows with its content up to this many text rows.
pub const MAX_INPUT_ROWS: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatAreas {
    pub header: Rect,
    pub transcript: Rect,
    pub input: Rect,
    pub footer: Rect,
}

pub fn chat_areas(area: Rect, input_rows: usize) -> ChatAreas {
    let rows = (input_rows.max(1) as u16).min(MAX_INPUT_ROWS);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(rows + 2),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    ChatAreas {
        header: chunks[0],
        transcript: chunks[1],
        input: chunks[2],
        footer: chunks[3],
    }
}

/// Action context for a terminal of `area`, matching what the renderer draws.
pub fn transcript_context(area: Rect, input_rows: usize) -> AppActionContext {
    let transcript = chat_areas(area, input_rows).transcript;
    AppActionContext {
        transcript_width: transcript.width,
        transcript_height: transcript.height,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogAreas {
    pub title: Rect,
    pub grid: Rect,
    pub footer: Rect,
}

pub fn catalog_areas(area: Rect) -> CatalogAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    CatalogAreas {
        title: chunks[0],
        grid: chunks[1],
        footer: chunks[2],
    }
}

/// Card rectangles in catalog order. Cards on rows that do not fit in `grid`
/// are omitted.
pub fn card_rects(grid: Rect, count: usize, columns: usize) -> Vec<Rect> {
    let columns = columns.max(1);
    let card_width = grid.width / columns as u16;
    let mut rects = Vec::with_capacity(count);

    for index in 0..count {
        let row = (index / columns) as u16;
        let col = (index % columns) as u16;
        let y = grid.y + row * CARD_HEIGHT;
        if y + CARD_HEIGHT > grid.y + grid.height {
            break;
        }
        rects.push(Rect {
            x: grid.x + col * card_width,
            y,
            width: card_width,
            height: CARD_HEIGHT,
        });
    }
    rects
}

/// A rectangle of `percent_x` by `percent_y` centred in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
