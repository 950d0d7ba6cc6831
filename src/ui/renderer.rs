use crate::catalog::{format_biography, Character};
use crate::core::app::transcript::{layout_transcript, LineKind};
use crate::core::app::{App, ChatScreen, Screen};
use crate::core::catalog_view::CatalogView;
use crate::core::message::Role;
use crate::ui::layout::{card_rects, catalog_areas, centered_rect, chat_areas};
use crate::ui::theme::{accent_color, Theme};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const JUMP_LABEL: &str = " ↓ Latest (End) ";

pub fn ui(f: &mut Frame, app: &mut App, theme: &Theme) {
    let area = f.area();
    let catalog = app.catalog().clone();
    match &mut app.screen {
        Screen::Catalog(view) => render_catalog(f, area, view, catalog.characters(), theme),
        Screen::Chat(chat) => render_chat(f, area, chat, theme),
    }
}

fn render_catalog(
    f: &mut Frame,
    area: Rect,
    view: &CatalogView,
    characters: &[Character],
    theme: &Theme,
) {
    let areas = catalog_areas(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled("Choose a character", theme.title_style)),
        Line::from(Span::styled(
            "Pick someone to talk to and start a roleplay.",
            theme.hint_style,
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, areas.title);

    let rects = card_rects(areas.grid, characters.len(), view.columns());
    for (index, (character, rect)) in characters.iter().zip(rects).enumerate() {
        render_card(f, rect, character, index == view.cursor(), theme);
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        "←↑↓→ move · Enter open · q quit",
        theme.hint_style,
    )));
    f.render_widget(footer, areas.footer);

    if let Some(character) = view
        .expanded()
        .and_then(|id| characters.iter().find(|c| c.id == id))
    {
        render_detail_panel(f, area, character, theme);
    }
}

fn render_card(f: &mut Frame, rect: Rect, character: &Character, focused: bool, theme: &Theme) {
    let accent = accent_color(character.accent);
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    if focused {
        block = block
            .border_type(BorderType::Thick)
            .border_style(theme.selected_border_style.fg(accent));
    }

    let mut details = Vec::new();
    if let Some(age) = character.age {
        details.push(format!("Age {age}"));
    }
    if let Some(nationality) = &character.nationality {
        details.push(nationality.clone());
    }

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("[{}] ", character.initials()),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(character.name.clone(), theme.title_style),
        ]),
        Line::from(character.tagline()),
        Line::from(Span::styled(details.join(" · "), theme.hint_style)),
    ];

    let card = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(card, rect);
}

fn render_detail_panel(f: &mut Frame, area: Rect, character: &Character, theme: &Theme) {
    let accent = accent_color(character.accent);
    let panel = centered_rect(70, 70, area);
    f.render_widget(Clear, panel);

    let mut lines: Vec<Line> = format_biography(character)
        .lines()
        .map(|line| Line::from(line.to_string()))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            " Start Roleplay ",
            Style::default()
                .fg(ratatui::style::Color::Black)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Enter to start · Esc to close", theme.hint_style),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(
            format!(" {} ", character.name),
            theme.title_style.fg(accent),
        ));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, panel);
}

fn render_chat(f: &mut Frame, area: Rect, chat: &mut ChatScreen, theme: &Theme) {
    let areas = chat_areas(area, chat.textarea.lines().len());
    render_chat_header(f, areas.header, chat, theme);

    if let Some(notice) = chat.session.notice() {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(notice, theme.notice_style)),
            Line::from(""),
            Line::from(Span::styled(
                "Press Esc to return to the character list",
                theme.hint_style,
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(paragraph, areas.transcript);
        render_footer(f, areas.footer, "Esc home · Ctrl+C quit", theme);
        return;
    }

    if chat.session.is_greeting_loading() {
        render_greeting_placeholder(f, areas.transcript, chat, theme);
    } else {
        render_transcript(f, areas.transcript, chat, theme);
    }

    let title = if chat.session.is_composing() {
        " Waiting for reply… "
    } else {
        " Message (Enter to send, Alt+Enter for new line) "
    };
    chat.textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.input_border_style)
            .title(title),
    );
    f.render_widget(&chat.textarea, areas.input);

    render_footer(
        f,
        areas.footer,
        "Esc home · ↑↓/PgUp/PgDn scroll · End latest · Ctrl+C quit",
        theme,
    );
}

/// The conversation stays hidden until the greeting reply arrives.
fn render_greeting_placeholder(f: &mut Frame, area: Rect, chat: &ChatScreen, theme: &Theme) {
    let name = chat
        .session
        .character()
        .map(|character| character.name.as_str())
        .unwrap_or_default();
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!("{name} is getting ready…"), theme.typing_style)),
    ])
    .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_chat_header(f: &mut Frame, area: Rect, chat: &ChatScreen, theme: &Theme) {
    let line = match chat.session.character() {
        Some(character) => {
            let accent = accent_color(character.accent);
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", character.initials()),
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                ),
                Span::styled(character.name.clone(), theme.title_style.fg(accent)),
                Span::styled(format!("  {}", character.tagline()), theme.hint_style),
            ])
        }
        None => Line::from(Span::styled("Roleplay", theme.title_style)),
    };

    let header = Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn render_transcript(f: &mut Frame, area: Rect, chat: &mut ChatScreen, theme: &Theme) {
    let accent = chat
        .session
        .character()
        .map(|character| accent_color(character.accent))
        .unwrap_or(ratatui::style::Color::Reset);

    let layout = layout_transcript(&chat.session, area.width);
    let total = u16::try_from(layout.len()).unwrap_or(u16::MAX);
    chat.scroll.sync(total, area.height);

    let lines: Vec<Line> = layout
        .into_iter()
        .map(|line| {
            let (style, alignment) = match line.kind {
                LineKind::Header(Role::User) => (theme.user_header_style, Alignment::Right),
                LineKind::Header(Role::Model) => (
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                    Alignment::Left,
                ),
                LineKind::Body(Role::User) => (theme.user_text_style, Alignment::Right),
                LineKind::Body(Role::Model) => (theme.model_text_style, Alignment::Left),
                LineKind::Typing => (theme.typing_style, Alignment::Left),
                LineKind::Spacer => (Style::default(), Alignment::Left),
            };
            Line::from(Span::styled(line.text, style)).alignment(alignment)
        })
        .collect();

    let paragraph = Paragraph::new(lines).scroll((chat.scroll.offset(), 0));
    f.render_widget(paragraph, area);

    if chat.scroll.shows_jump_to_latest(total, area.height) && area.height > 0 {
        let width = (JUMP_LABEL.chars().count() as u16).min(area.width);
        let button = Rect {
            x: area.x + area.width - width,
            y: area.y + area.height - 1,
            width,
            height: 1,
        };
        f.render_widget(Clear, button);
        f.render_widget(
            Paragraph::new(Span::styled(JUMP_LABEL, theme.jump_button_style)),
            button,
        );
    }
}

fn render_footer(f: &mut Frame, area: Rect, hint: &str, theme: &Theme) {
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(hint.to_string(), theme.hint_style))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::core::app::{AppCommand, AppInitConfig};
    use crate::core::route::Route;
    use crate::utils::logging::LoggingState;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn test_app() -> App {
        App::new(AppInitConfig {
            catalog: Catalog::builtin(),
            grid_columns: 3,
            scroll_threshold: 3,
            transcript: LoggingState::disabled(),
        })
    }

    fn render(app: &mut App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark_default();
        terminal.draw(|f| ui(f, app, &theme)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn catalog_lists_every_character() {
        let mut app = test_app();
        let screen = render(&mut app);
        assert!(screen.contains("Miguel Santos"));
        assert!(screen.contains("Sarah Chen-Williams"));
        assert!(screen.contains("Jun-ho Park"));
        assert!(!screen.contains("Start Roleplay"));
    }

    #[test]
    fn expanded_card_shows_biography_and_action() {
        let mut app = test_app();
        app.catalog_view_mut().unwrap().select(2);
        let screen = render(&mut app);
        assert!(screen.contains("Start Roleplay"));
        assert!(screen.contains("Name: Sarah Chen-Williams"));
    }

    #[test]
    fn resolution_failure_renders_notice() {
        let mut app = test_app();
        app.navigate(Route::chat(999));
        let screen = render(&mut app);
        assert!(screen.contains("Faced some issue, please navigate to home page"));
    }

    #[test]
    fn pending_greeting_hides_the_conversation() {
        let mut app = test_app();
        app.navigate(Route::chat(1));
        let screen = render(&mut app);
        assert!(screen.contains("Miguel Santos is getting ready"));
        assert!(!screen.contains("Hi!"));
        assert!(screen.contains("Waiting for reply"));
    }

    #[test]
    fn pending_user_turn_shows_typing_indicator() {
        let mut app = test_app();
        let greeting = match app.navigate(Route::chat(1)) {
            Some(AppCommand::SpawnTurn(task)) => task,
            None => panic!("greeting should be spawned"),
        };
        let chat = app.chat_mut().unwrap();
        chat.session
            .complete_turn(greeting.turn_id, Ok("Olá! Tudo bem?".to_string()))
            .unwrap();
        chat.session.set_input("Tell me about Lisbon");
        chat.session.begin_turn().unwrap();

        let screen = render(&mut app);
        assert!(screen.contains("Tell me about Lisbon"));
        assert!(screen.contains("Miguel Santos is typing"));
        assert!(screen.contains("Waiting for reply"));
    }
}
