// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorBuffer)
    clippy::module_name_repetitions
)]

//! # Twezopad
//!
//! A minimal terminal text editor.
//!
//! Twezopad edits one plain-text document at a time with:
//! - A menu bar (File, Edit) and a bottom toolbar
//! - Open, Save, Save As and a Print placeholder
//! - Undo/redo, selection and an in-app clipboard
//! - A window title that follows the current file
//!
//! ## Architecture
//!
//! Twezopad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`actions`]: Menu and toolbar commands
//! - [`editor`]: The text buffer with cursor, selection and history
//! - [`session`]: Which file the document belongs to
//! - [`picker`]: The open/save-as file picker
//! - [`ui`]: Terminal UI components
//! - [`config`]: Built-in settings

pub mod actions;
pub mod app;
pub mod config;
pub mod editor;
pub mod picker;
pub mod session;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::config::Settings;
    pub use crate::editor::EditorBuffer;
    pub use crate::session::DocumentSession;
    pub use crate::ui::viewport::Viewport;
}
