use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::actions::{Action, Menu};
use crate::config::Settings;
use crate::editor::{EditorBuffer, display_width};
use crate::picker::FilePicker;
use crate::session::{DocumentSession, SessionError, read_document, write_document};
use crate::ui::CHROME_ROWS;
use crate::ui::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// An open drop-down menu and its highlighted item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub menu: Menu,
    /// Index into [`Menu::items`]; never a separator.
    pub selected: usize,
}

impl MenuState {
    pub const fn new(menu: Menu) -> Self {
        Self { menu, selected: 0 }
    }

    pub fn selected_action(&self) -> Option<Action> {
        self.menu
            .items()
            .get(self.selected)
            .and_then(|item| item.action())
    }
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug)]
pub struct Model {
    /// Which file the buffer belongs to, if any
    pub session: DocumentSession,
    /// The text widget
    pub buffer: EditorBuffer,
    /// Compiled-in tunables
    pub settings: Settings,
    /// Viewport over the editor surface
    pub viewport: Viewport,
    /// Drop-down menu currently open
    pub menu: Option<MenuState>,
    /// Open or save-as picker, when shown
    pub picker: Option<FilePicker>,
    /// Error dialog text, when shown
    pub dialog: Option<String>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Toolbar button under the mouse pointer
    pub hovered_action: Option<Action>,
    /// Text last cut or copied inside the editor
    pub clipboard: String,
    /// Set when a cut or copy replaced [`Self::clipboard`] and the system
    /// clipboard has not been updated yet
    pub clipboard_pending: bool,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Model {
    /// Create a model for an untitled, empty document.
    pub fn new(settings: Settings, terminal_size: (u16, u16)) -> Self {
        let buffer = EditorBuffer::with_undo_limit("", settings.undo_limit);
        Self {
            viewport: Viewport::new(
                terminal_size.0,
                terminal_size.1.saturating_sub(CHROME_ROWS),
                buffer.line_count(),
            ),
            session: DocumentSession::new(),
            buffer,
            settings,
            menu: None,
            picker: None,
            dialog: None,
            help_visible: false,
            hovered_action: None,
            clipboard: String::new(),
            clipboard_pending: false,
            toast: None,
            should_quit: false,
        }
    }

    /// Window title derived from the session path.
    pub fn title(&self) -> String {
        self.session
            .title(&self.settings.untitled_name, &self.settings.app_name)
    }

    /// Whether a modal (dialog, picker or help) currently owns the input.
    pub const fn modal_active(&self) -> bool {
        self.dialog.is_some() || self.picker.is_some() || self.help_visible
    }

    /// Replace the buffer with the contents of `path` and bind the session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Read`] if the file cannot be read as text;
    /// the model is left untouched in that case.
    pub fn open_path(&mut self, path: &Path) -> Result<(), SessionError> {
        let text = read_document(path)?;
        self.buffer.set_text(&text);
        self.session.bind(path.to_path_buf());
        self.viewport.set_total_lines(self.buffer.line_count());
        self.viewport.go_to_top();
        Ok(())
    }

    /// Write the buffer to `path` without touching the session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Write`] if the file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<(), SessionError> {
        write_document(path, &self.buffer.text())
    }

    /// Write the buffer to `path` and bind the session to it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Write`]; the session keeps its old path.
    pub fn save_as_path(&mut self, path: PathBuf) -> Result<(), SessionError> {
        self.write_to(&path)?;
        self.session.bind(path);
        Ok(())
    }

    /// Show the blocking error dialog.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.menu = None;
        self.dialog = Some(message.into());
    }

    /// Keep the cursor on screen after an edit or movement.
    pub(super) fn ensure_cursor_visible(&mut self) {
        self.viewport.set_total_lines(self.buffer.line_count());
        let cursor = self.buffer.cursor();
        let line = self.buffer.line_at(cursor.line).unwrap_or_default();
        let col = display_width(&line[..cursor.col.min(line.len())]);
        self.viewport.ensure_visible(cursor.line, col);
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + self.settings.toast_duration,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(Settings::default(), (80, 24))
    }
}
