//! Main chat event loop and UI rendering
//!
//! This module owns the terminal for the lifetime of the interactive session:
//! it sets the terminal up, drives the event loop and restores it on exit.

mod event_loop;
mod keybindings;
mod lifecycle;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::app::App;

pub use event_loop::{run_chat, UiEvent};

/// Shared handle to the [`App`] for the loop and its helpers.
#[derive(Clone)]
pub struct AppHandle {
    inner: Arc<Mutex<App>>,
}

impl AppHandle {
    pub fn new(inner: Arc<Mutex<App>>) -> Self {
        Self { inner }
    }

    pub async fn read<R>(&self, f: impl FnOnce(&App) -> R) -> R {
        let guard = self.inner.lock().await;
        f(&guard)
    }

    pub async fn update<R>(&self, f: impl FnOnce(&mut App) -> R) -> R {
        let mut guard = self.inner.lock().await;
        f(&mut guard)
    }
}
