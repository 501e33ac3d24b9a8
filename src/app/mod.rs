//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{MenuState, Model, ToastLevel};
pub use update::{Message, update};

use crate::config::Settings;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    settings: Settings,
    system_clipboard: bool,
}

impl App {
    /// Create a new application with the given settings.
    pub const fn new(settings: Settings) -> Self {
        Self {
            settings,
            system_clipboard: true,
        }
    }

    /// Mirror cut and copied text to the terminal's clipboard.
    #[must_use]
    pub const fn with_system_clipboard(mut self, enabled: bool) -> Self {
        self.system_clipboard = enabled;
        self
    }
}
