use super::*;
use crate::core::chat::{APOLOGY_TEXT, GREETING_PROMPT, RESOLUTION_NOTICE};
use crate::core::transport::TransportError;
use crate::utils::logging::LoggingState;
use tempfile::TempDir;

fn ctx() -> AppActionContext {
    AppActionContext {
        transcript_width: 80,
        transcript_height: 10,
    }
}

fn test_app() -> App {
    App::new(AppInitConfig {
        catalog: Catalog::builtin(),
        grid_columns: 3,
        scroll_threshold: 3,
        transcript: LoggingState::disabled(),
    })
}

fn apply(app: &mut App, action: AppAction) -> Option<AppCommand> {
    actions::apply_action(app, action, ctx())
}

fn spawned_turn(command: Option<AppCommand>) -> TurnTask {
    match command {
        Some(AppCommand::SpawnTurn(task)) => task,
        None => panic!("expected a turn to be spawned"),
    }
}

fn complete(app: &mut App, task: &TurnTask, result: Result<String, TransportError>) {
    let command = apply(
        app,
        AppAction::TurnCompleted {
            generation: task.generation,
            turn_id: task.turn_id,
            result,
        },
    );
    assert!(command.is_none());
}

fn type_input(app: &mut App, text: &str) {
    let chat = app.chat_mut().expect("chat screen");
    chat.textarea.insert_str(text);
}

#[test]
fn app_starts_on_catalog_with_nothing_expanded() {
    let app = test_app();
    assert_eq!(app.route(), Route::Catalog);
    assert_eq!(app.catalog_view().unwrap().expanded(), None);
    assert_eq!(app.generation(), 0);
}

#[test]
fn select_proceed_greet_then_ready() {
    let mut app = test_app();

    assert!(apply(&mut app, AppAction::CatalogSelect { id: 2 }).is_none());
    assert_eq!(app.catalog_view().unwrap().expanded(), Some(2));

    let task = spawned_turn(apply(&mut app, AppAction::StartRoleplay));
    assert_eq!(app.route(), Route::chat(2));
    assert_eq!(task.request.input_prompt, GREETING_PROMPT);
    assert_eq!(task.request.user, "Sarah Chen-Williams");

    let chat = app.chat().unwrap();
    assert_eq!(chat.session.state(), SessionState::Greeting);
    assert!(chat.session.is_greeting_loading());
    assert!(chat.session.is_composing());

    complete(&mut app, &task, Ok("Hello! I'm Sarah.".into()));
    let chat = app.chat().unwrap();
    assert_eq!(chat.session.state(), SessionState::Ready);
    assert!(!chat.session.is_greeting_loading());
    assert_eq!(chat.session.messages().len(), 2);
}

#[test]
fn start_roleplay_without_expanded_card_does_nothing() {
    let mut app = test_app();
    assert!(apply(&mut app, AppAction::StartRoleplay).is_none());
    assert_eq!(app.route(), Route::Catalog);
}

#[test]
fn keyboard_toggle_expands_card_under_cursor() {
    let mut app = test_app();
    apply(&mut app, AppAction::CatalogMoveRight);
    apply(&mut app, AppAction::CatalogToggleCursor);
    assert_eq!(app.catalog_view().unwrap().expanded(), Some(2));
    apply(&mut app, AppAction::CatalogToggleCursor);
    assert_eq!(app.catalog_view().unwrap().expanded(), None);
}

#[test]
fn failing_transport_turn_ends_with_apology() {
    let mut app = test_app();
    let greeting = spawned_turn(app.navigate(Route::chat(1)));
    complete(&mut app, &greeting, Ok("Hola!".into()));

    type_input(&mut app, "Hello");
    let task = spawned_turn(apply(&mut app, AppAction::SubmitInput));
    assert_eq!(task.request.input_prompt, "Hello");
    assert_eq!(task.request.history.len(), 2);
    assert_eq!(app.chat().unwrap().input_text(), "");

    complete(
        &mut app,
        &task,
        Err(TransportError::Other("connection refused".into())),
    );
    let chat = app.chat().unwrap();
    assert_eq!(chat.session.messages().len(), 4);
    assert_eq!(chat.session.messages().last().unwrap().text, APOLOGY_TEXT);
    assert!(!chat.session.is_composing());
}

#[test]
fn unknown_character_shows_notice_and_spawns_nothing() {
    let mut app = test_app();
    assert!(app.navigate(Route::chat(999)).is_none());

    let chat = app.chat().unwrap();
    assert!(matches!(chat.session.state(), SessionState::Error(_)));
    assert_eq!(chat.session.notice(), Some(RESOLUTION_NOTICE));

    type_input(&mut app, "Hello");
    assert!(apply(&mut app, AppAction::SubmitInput).is_none());
    assert!(app.chat().unwrap().session.messages().is_empty());
}

#[test]
fn empty_input_is_not_submitted() {
    let mut app = test_app();
    let greeting = spawned_turn(app.navigate(Route::chat(3)));
    complete(&mut app, &greeting, Ok("Annyeong!".into()));

    type_input(&mut app, "   ");
    assert!(apply(&mut app, AppAction::SubmitInput).is_none());
    assert_eq!(app.chat().unwrap().session.messages().len(), 2);
}

#[test]
fn submissions_wait_for_the_pending_reply() {
    let mut app = test_app();
    let greeting = spawned_turn(app.navigate(Route::chat(1)));

    type_input(&mut app, "Are you there?");
    assert!(apply(&mut app, AppAction::SubmitInput).is_none());
    assert_eq!(app.chat().unwrap().input_text(), "Are you there?");

    complete(&mut app, &greeting, Ok("Hi!".into()));
    assert!(apply(&mut app, AppAction::SubmitInput).is_some());
}

#[test]
fn completions_from_a_closed_chat_are_dropped() {
    let mut app = test_app();
    let stale = spawned_turn(app.navigate(Route::chat(1)));

    app.navigate(Route::Catalog);
    let fresh = spawned_turn(app.navigate(Route::chat(2)));
    assert_ne!(stale.generation, fresh.generation);

    complete(&mut app, &stale, Ok("from Miguel".into()));
    let chat = app.chat().unwrap();
    assert_eq!(chat.session.messages().len(), 1);
    assert!(chat.session.is_composing());

    complete(&mut app, &fresh, Ok("from Sarah".into()));
    assert_eq!(app.chat().unwrap().session.messages().len(), 2);
}

#[test]
fn navigating_home_resets_catalog_view() {
    let mut app = test_app();
    apply(&mut app, AppAction::CatalogSelect { id: 3 });
    app.navigate(Route::chat(3));
    apply(&mut app, AppAction::Navigate { route: Route::Catalog });

    assert_eq!(app.route(), Route::Catalog);
    assert_eq!(app.catalog_view().unwrap().expanded(), None);
}

#[test]
fn scroll_actions_stop_and_resume_following() {
    let mut app = test_app();
    let greeting = spawned_turn(app.navigate(Route::chat(1)));
    complete(&mut app, &greeting, Ok("line\n".repeat(30)));

    apply(&mut app, AppAction::PageUp);
    assert!(!app.chat().unwrap().scroll.is_following());

    apply(&mut app, AppAction::ScrollToLatest);
    assert!(app.chat().unwrap().scroll.is_following());
}

#[test]
fn single_line_scrolls_move_the_view_between_frames() {
    let mut app = test_app();
    let greeting = spawned_turn(app.navigate(Route::chat(2)));
    complete(&mut app, &greeting, Ok("line\n".repeat(60)));

    let frame_sync = |app: &mut App| {
        let chat = app.chat_mut().unwrap();
        let total = chat.transcript_line_count(ctx().transcript_width);
        chat.scroll.sync(total, ctx().transcript_height);
        chat.scroll.offset()
    };
    let bottom = frame_sync(&mut app);
    assert!(bottom > 0);

    for _ in 0..3 {
        apply(&mut app, AppAction::ScrollUp { lines: 1 });
        frame_sync(&mut app);
    }
    assert_eq!(frame_sync(&mut app), bottom - 3);

    apply(&mut app, AppAction::ScrollUp { lines: 3 });
    assert_eq!(frame_sync(&mut app), bottom - 6);
    assert!(!app.chat().unwrap().scroll.is_following());
}

#[test]
fn quit_requests_exit() {
    let mut app = test_app();
    assert!(!app.should_exit());
    apply(&mut app, AppAction::Quit);
    assert!(app.should_exit());
}

#[test]
fn transcript_log_records_the_conversation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roleplay.log");
    let mut app = App::new(AppInitConfig {
        catalog: Catalog::builtin(),
        grid_columns: 3,
        scroll_threshold: 3,
        transcript: LoggingState::new(Some(path.clone())).unwrap(),
    });

    let greeting = spawned_turn(app.navigate(Route::chat(2)));
    complete(&mut app, &greeting, Ok("Hello!\nNice to meet you.".into()));

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "## Roleplay with Sarah Chen-Williams\n\nYou: Hi!\n\nHello!\nNice to meet you.\n\n"
    );
}

#[test]
fn dispatcher_delivers_actions_in_order() {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let dispatcher = AppActionDispatcher::new(tx);
    dispatcher.dispatch_many(
        [AppAction::CatalogSelect { id: 1 }, AppAction::StartRoleplay],
        ctx(),
    );

    let mut app = test_app();
    let mut envelopes = Vec::new();
    while let Ok(envelope) = rx.try_recv() {
        envelopes.push(envelope);
    }
    let commands = apply_actions(&mut app, envelopes);
    assert_eq!(commands.len(), 1);
    assert_eq!(app.route(), Route::chat(1));
}
