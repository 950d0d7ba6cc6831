//! Terminal UI layer.
//!
//! - [`chat_loop`]: terminal lifecycle, key handling and the event loop that
//!   applies [`crate::core::app::AppAction`]s and spawns turn requests.
//! - [`renderer`] and [`layout`]: frame composition for the catalog grid and
//!   the chat screen.
//! - [`theme`]: colours, including the per-character accent palette.
//!
//! This layer presents and captures interaction state; [`crate::core`] owns
//! the session logic.

pub mod chat_loop;
pub mod layout;
pub mod renderer;
pub mod theme;
