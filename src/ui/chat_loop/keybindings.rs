//! Keyboard and mouse bindings for both screens.
//!
//! Text editing is applied to the chat textarea directly; everything that
//! changes session or navigation state is returned as [`AppAction`]s for the
//! event loop to dispatch.

use crate::core::app::{App, AppAction, ChatScreen, Screen};
use crate::core::route::Route;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use tui_textarea::Input as TAInput;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: u16 = 3;

pub fn handle_key(app: &mut App, key: KeyEvent) -> Vec<AppAction> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return vec![AppAction::Quit];
    }

    match &mut app.screen {
        Screen::Catalog(view) => catalog_key(view.expanded().is_some(), key),
        Screen::Chat(chat) => {
            if chat.session.resolution_failed() {
                return match key.code {
                    KeyCode::Esc | KeyCode::Enter => home(),
                    _ => Vec::new(),
                };
            }
            chat_key(chat, key)
        }
    }
}

fn home() -> Vec<AppAction> {
    vec![AppAction::Navigate {
        route: Route::Catalog,
    }]
}

fn catalog_key(expanded: bool, key: KeyEvent) -> Vec<AppAction> {
    let action = match key.code {
        KeyCode::Left | KeyCode::Char('h') => AppAction::CatalogMoveLeft,
        KeyCode::Right | KeyCode::Char('l') => AppAction::CatalogMoveRight,
        KeyCode::Up | KeyCode::Char('k') => AppAction::CatalogMoveUp,
        KeyCode::Down | KeyCode::Char('j') => AppAction::CatalogMoveDown,
        KeyCode::Char(' ') => AppAction::CatalogToggleCursor,
        KeyCode::Enter if expanded => AppAction::StartRoleplay,
        KeyCode::Enter => AppAction::CatalogToggleCursor,
        KeyCode::Esc if expanded => AppAction::CatalogCollapse,
        KeyCode::Char('q') | KeyCode::Esc => AppAction::Quit,
        _ => return Vec::new(),
    };
    vec![action]
}

fn chat_key(chat: &mut ChatScreen, key: KeyEvent) -> Vec<AppAction> {
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let single_line = chat.textarea.lines().len() <= 1;
    let input_empty = chat.input_text().is_empty();

    match key.code {
        KeyCode::Esc => home(),
        KeyCode::Enter if alt || shift => {
            chat.textarea.insert_newline();
            Vec::new()
        }
        KeyCode::Enter => vec![AppAction::SubmitInput],
        KeyCode::PageUp => vec![AppAction::PageUp],
        KeyCode::PageDown => vec![AppAction::PageDown],
        KeyCode::Up if single_line => vec![AppAction::ScrollUp { lines: 1 }],
        KeyCode::Down if single_line => vec![AppAction::ScrollDown { lines: 1 }],
        KeyCode::Home if input_empty => vec![AppAction::ScrollToTop],
        KeyCode::End if input_empty || !chat.scroll.is_following() => {
            vec![AppAction::ScrollToLatest]
        }
        _ => {
            chat.textarea.input(TAInput::from(key));
            Vec::new()
        }
    }
}

pub fn handle_mouse(app: &App, mouse: MouseEvent) -> Vec<AppAction> {
    if app.chat().is_none() {
        return Vec::new();
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => vec![AppAction::ScrollUp { lines: WHEEL_LINES }],
        MouseEventKind::ScrollDown => vec![AppAction::ScrollDown { lines: WHEEL_LINES }],
        _ => Vec::new(),
    }
}

pub fn handle_paste(app: &mut App, text: &str) {
    if let Some(chat) = app.chat_mut() {
        let sanitized: String = text
            .replace("\r\n", "\n")
            .chars()
            .filter(|c| *c == '\n' || *c == '\t' || !c.is_control())
            .collect();
        chat.textarea.insert_str(sanitized);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::core::app::AppInitConfig;
    use crate::utils::logging::LoggingState;

    fn test_app() -> App {
        App::new(AppInitConfig {
            catalog: Catalog::builtin(),
            grid_columns: 3,
            scroll_threshold: 3,
            transcript: LoggingState::disabled(),
        })
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn is_navigate_home(actions: &[AppAction]) -> bool {
        matches!(
            actions,
            [AppAction::Navigate {
                route: Route::Catalog
            }]
        )
    }

    #[test]
    fn ctrl_c_quits_from_any_screen() {
        let mut app = test_app();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(handle_key(&mut app, ctrl_c).as_slice(), [AppAction::Quit]));

        app.navigate(Route::chat(1));
        assert!(matches!(handle_key(&mut app, ctrl_c).as_slice(), [AppAction::Quit]));
    }

    #[test]
    fn enter_on_catalog_expands_then_starts() {
        let mut app = test_app();
        assert!(matches!(
            handle_key(&mut app, key(KeyCode::Enter)).as_slice(),
            [AppAction::CatalogToggleCursor]
        ));

        app.catalog_view_mut().unwrap().select(1);
        assert!(matches!(
            handle_key(&mut app, key(KeyCode::Enter)).as_slice(),
            [AppAction::StartRoleplay]
        ));
        assert!(matches!(
            handle_key(&mut app, key(KeyCode::Esc)).as_slice(),
            [AppAction::CatalogCollapse]
        ));
    }

    #[test]
    fn typing_edits_the_textarea_and_enter_submits() {
        let mut app = test_app();
        app.navigate(Route::chat(2));

        for ch in "Hey".chars() {
            assert!(handle_key(&mut app, key(KeyCode::Char(ch))).is_empty());
        }
        assert_eq!(app.chat().unwrap().input_text(), "Hey");

        let alt_enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT);
        assert!(handle_key(&mut app, alt_enter).is_empty());
        handle_key(&mut app, key(KeyCode::Char('!')));
        assert_eq!(app.chat().unwrap().input_text(), "Hey\n!");

        assert!(matches!(
            handle_key(&mut app, key(KeyCode::Enter)).as_slice(),
            [AppAction::SubmitInput]
        ));
    }

    #[test]
    fn escape_leaves_chat() {
        let mut app = test_app();
        app.navigate(Route::chat(3));
        assert!(is_navigate_home(&handle_key(&mut app, key(KeyCode::Esc))));
    }

    #[test]
    fn error_screen_only_offers_the_way_home() {
        let mut app = test_app();
        app.navigate(Route::chat(999));
        assert!(handle_key(&mut app, key(KeyCode::Char('x'))).is_empty());
        assert_eq!(app.chat().unwrap().input_text(), "");
        assert!(is_navigate_home(&handle_key(&mut app, key(KeyCode::Enter))));
    }

    #[test]
    fn end_jumps_to_latest_when_input_is_empty() {
        let mut app = test_app();
        app.navigate(Route::chat(1));
        assert!(matches!(
            handle_key(&mut app, key(KeyCode::End)).as_slice(),
            [AppAction::ScrollToLatest]
        ));
    }

    #[test]
    fn paste_strips_control_characters() {
        let mut app = test_app();
        app.navigate(Route::chat(1));
        handle_paste(&mut app, "one\r\ntwo\u{7}");
        assert_eq!(app.chat().unwrap().input_text(), "one\ntwo");
    }

    #[test]
    fn mouse_wheel_scrolls_only_in_chat() {
        let mut app = test_app();
        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert!(handle_mouse(&app, wheel).is_empty());

        app.navigate(Route::chat(1));
        assert!(matches!(
            handle_mouse(&app, wheel).as_slice(),
            [AppAction::ScrollUp { lines: 3 }]
        ));
    }
}
