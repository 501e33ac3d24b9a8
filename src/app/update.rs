use crate::actions::{Action, Menu};
use crate::app::Model;
use crate::app::model::MenuState;
use crate::editor::Motion;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Insert pasted text at the cursor
    InsertText(String),
    /// Delete character before cursor (Backspace)
    DeleteBack,
    /// Delete character at cursor (Delete)
    DeleteForward,
    /// Split line at cursor (Enter)
    SplitLine,
    /// Insert spaces up to the next tab stop
    InsertTab,
    /// Move the cursor, dropping the selection
    Move(Motion),
    /// Move the cursor, extending the selection
    Select(Motion),
    /// Move cursor to absolute position (line, byte col) - e.g. from mouse click
    MoveTo(usize, usize),
    /// Extend the selection to (line, byte col) - mouse drag
    SelectTo(usize, usize),
    /// Scroll editor viewport up by n lines
    ScrollUp(usize),
    /// Scroll editor viewport down by n lines
    ScrollDown(usize),

    // Commands
    /// Menu, toolbar or shortcut command
    Action(Action),

    // Menus
    /// Open a drop-down menu (or switch to it)
    OpenMenu(Menu),
    /// Close the open menu
    CloseMenu,
    /// Highlight the previous menu item
    MenuUp,
    /// Highlight the next menu item
    MenuDown,
    /// Highlight a specific menu item (mouse hover)
    MenuSelect(usize),
    /// Toolbar button under the pointer changed
    HoverAction(Option<Action>),

    // File picker
    /// Replace the picker's name input
    PickerInput(String),
    /// Highlight the previous entry
    PickerUp,
    /// Highlight the next entry
    PickerDown,
    /// Highlight an entry by index (mouse click)
    PickerSelect(usize),
    /// Accept the typed name or highlighted entry
    PickerConfirm,
    /// Close the picker without choosing
    PickerCancel,

    // Overlays
    /// Close the error dialog
    DismissDialog,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Filesystem work (open, save, directory listing) happens afterwards in
/// the side-effect handler.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Editing
        Message::InsertChar(ch) => {
            model.buffer.insert_char(ch);
            model.ensure_cursor_visible();
        }
        Message::InsertText(text) => {
            model.buffer.insert_str(&text);
            model.ensure_cursor_visible();
        }
        Message::DeleteBack => {
            model.buffer.delete_back();
            model.ensure_cursor_visible();
        }
        Message::DeleteForward => {
            model.buffer.delete_forward();
            model.ensure_cursor_visible();
        }
        Message::SplitLine => {
            model.buffer.split_line();
            model.ensure_cursor_visible();
        }
        Message::InsertTab => {
            let tab_width = model.settings.tab_width.max(1);
            let cursor = model.buffer.cursor();
            let line = model.buffer.line_at(cursor.line).unwrap_or_default();
            let col = line[..cursor.col.min(line.len())].chars().count();
            let spaces = tab_width - col % tab_width;
            model.buffer.insert_str(&" ".repeat(spaces));
            model.ensure_cursor_visible();
        }
        Message::Move(motion) => {
            model.buffer.apply_motion(motion, false);
            model.ensure_cursor_visible();
        }
        Message::Select(motion) => {
            model.buffer.apply_motion(motion, true);
            model.ensure_cursor_visible();
        }
        Message::MoveTo(line, col) => {
            model.buffer.move_to(line, col);
            model.ensure_cursor_visible();
        }
        Message::SelectTo(line, col) => {
            model.buffer.select_to(line, col);
            model.ensure_cursor_visible();
        }
        Message::ScrollUp(n) => {
            model.viewport.scroll_up(n);
        }
        Message::ScrollDown(n) => {
            model.viewport.scroll_down(n);
        }

        // Commands
        Message::Action(action) => {
            model.menu = None;
            apply_action(&mut model, action);
        }

        // Menus
        Message::OpenMenu(menu) => {
            model.menu = Some(MenuState::new(menu));
        }
        Message::CloseMenu => {
            model.menu = None;
        }
        Message::MenuUp => {
            if let Some(state) = &mut model.menu {
                state.selected = state.menu.prev_item(state.selected);
            }
        }
        Message::MenuDown => {
            if let Some(state) = &mut model.menu {
                state.selected = state.menu.next_item(state.selected);
            }
        }
        Message::MenuSelect(idx) => {
            if let Some(state) = &mut model.menu
                && state
                    .menu
                    .items()
                    .get(idx)
                    .is_some_and(|item| item.action().is_some())
            {
                state.selected = idx;
            }
        }
        Message::HoverAction(action) => {
            model.hovered_action = action;
        }

        // File picker
        Message::PickerInput(input) => {
            if let Some(picker) = &mut model.picker {
                picker.set_input(input);
            }
        }
        Message::PickerUp => {
            if let Some(picker) = &mut model.picker {
                picker.select_prev();
            }
        }
        Message::PickerDown => {
            if let Some(picker) = &mut model.picker {
                picker.select_next();
            }
        }
        Message::PickerSelect(idx) => {
            if let Some(picker) = &mut model.picker {
                picker.select(idx);
            }
        }
        Message::PickerCancel => {
            model.picker = None;
        }
        // Resolved against the filesystem in the side-effect handler.
        Message::PickerConfirm => {}

        // Overlays
        Message::DismissDialog => {
            model.dialog = None;
        }
        Message::ToggleHelp => {
            model.menu = None;
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Window
        Message::Resize(width, height) => {
            model
                .viewport
                .resize(width, height.saturating_sub(crate::ui::CHROME_ROWS));
            model.ensure_cursor_visible();
        }
    }
    model
}

/// In-memory part of a command; file commands finish in the side-effect
/// handler.
fn apply_action(model: &mut Model, action: Action) {
    match action {
        Action::Undo => {
            model.buffer.undo();
            model.ensure_cursor_visible();
        }
        Action::Redo => {
            model.buffer.redo();
            model.ensure_cursor_visible();
        }
        Action::Cut => {
            if let Some(text) = model.buffer.cut() {
                model.clipboard = text;
                model.clipboard_pending = true;
                model.ensure_cursor_visible();
            }
        }
        Action::Copy => {
            if let Some(text) = model.buffer.selected_text() {
                model.clipboard = text;
                model.clipboard_pending = true;
            }
        }
        Action::Paste => {
            if !model.clipboard.is_empty() {
                let text = model.clipboard.clone();
                model.buffer.insert_str(&text);
                model.ensure_cursor_visible();
            }
        }
        Action::SelectAll => {
            model.buffer.select_all();
            model.ensure_cursor_visible();
        }
        Action::Quit => {
            model.should_quit = true;
        }
        Action::Open | Action::Save | Action::SaveAs | Action::Print => {}
    }
}
