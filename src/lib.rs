//! rolechat is a terminal roleplay chat client: a grid of character cards,
//! each opening a conversation with an inference endpoint that answers in
//! character.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`catalog`] holds the read-only character records and formats the
//!   biography sent with every turn.
//! - [`core`] owns runtime state: routing, the catalog view, chat sessions,
//!   configuration and the turn transport.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that drives user input and display updates.
//! - [`api`] defines the wire payload of a turn request.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which initializes and dispatches into
//! [`core::app`] and [`ui::chat_loop`] for interactive sessions.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
