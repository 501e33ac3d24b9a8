use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::actions::{Action, Menu};
use crate::app::{Message, Model};
use crate::editor::{Direction, Motion, byte_col_for_display};
use crate::ui::{
    menu_dropdown_rect, menu_title_rects, picker_list_area, picker_rect, picker_scroll_start,
    point_in_rect, screen_layout, toolbar_buttons, window_area,
};

use super::event_loop::ResizeDebouncer;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

pub(super) fn handle_event(
    event: &Event,
    model: &Model,
    now_ms: u64,
    resize_debouncer: &mut ResizeDebouncer,
) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(*key, model),
        Event::Mouse(mouse) => handle_mouse(*mouse, model),
        Event::Paste(text) => {
            if model.dialog.is_some() || model.help_visible {
                None
            } else if let Some(picker) = &model.picker {
                let pasted: String = text.chars().filter(|c| !c.is_control()).collect();
                Some(Message::PickerInput(format!("{}{pasted}", picker.input())))
            } else {
                Some(Message::InsertText(normalize_pasted_breaks(text)))
            }
        }
        Event::Resize(w, h) => {
            tracing::trace!(width = w, height = h, "resize queued");
            resize_debouncer.queue(*w, *h, now_ms);
            None
        }
        _ => None,
    }
}

/// Terminals deliver pasted line breaks as `\r`; the buffer uses `\n`.
fn normalize_pasted_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
    if model.dialog.is_some() {
        return Some(Message::DismissDialog);
    }

    if model.help_visible {
        return Some(Message::HideHelp);
    }

    if let Some(picker) = &model.picker {
        return match key.code {
            KeyCode::Esc => Some(Message::PickerCancel),
            KeyCode::Enter => Some(Message::PickerConfirm),
            KeyCode::Up => Some(Message::PickerUp),
            KeyCode::Down => Some(Message::PickerDown),
            KeyCode::Backspace => {
                let mut next = picker.input().to_string();
                next.pop();
                Some(Message::PickerInput(next))
            }
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                let mut next = picker.input().to_string();
                next.push(c);
                Some(Message::PickerInput(next))
            }
            _ => None,
        };
    }

    if let Some(state) = model.menu {
        return match key.code {
            KeyCode::Esc | KeyCode::F(10) => Some(Message::CloseMenu),
            KeyCode::Left => Some(Message::OpenMenu(state.menu.prev())),
            KeyCode::Right => Some(Message::OpenMenu(state.menu.next())),
            KeyCode::Up => Some(Message::MenuUp),
            KeyCode::Down => Some(Message::MenuDown),
            KeyCode::Enter => state.selected_action().map(Message::Action),
            _ => menu_for_key(key)
                .map(Message::OpenMenu)
                .or_else(|| shortcut_action(key).map(Message::Action)),
        };
    }

    if let Some(action) = shortcut_action(key) {
        return Some(Message::Action(action));
    }
    if let Some(menu) = menu_for_key(key) {
        return Some(Message::OpenMenu(menu));
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let page = usize::from(model.viewport.height().max(1));

    let motion = match key.code {
        KeyCode::Left if ctrl => Some(Motion::WordLeft),
        KeyCode::Right if ctrl => Some(Motion::WordRight),
        KeyCode::Left => Some(Motion::Step(Direction::Left)),
        KeyCode::Right => Some(Motion::Step(Direction::Right)),
        KeyCode::Up => Some(Motion::Step(Direction::Up)),
        KeyCode::Down => Some(Motion::Step(Direction::Down)),
        KeyCode::Home if ctrl => Some(Motion::BufferStart),
        KeyCode::End if ctrl => Some(Motion::BufferEnd),
        KeyCode::Home => Some(Motion::LineStart),
        KeyCode::End => Some(Motion::LineEnd),
        KeyCode::PageUp => Some(Motion::LinesUp(page)),
        KeyCode::PageDown => Some(Motion::LinesDown(page)),
        _ => None,
    };
    if let Some(motion) = motion {
        return Some(if shift {
            Message::Select(motion)
        } else {
            Message::Move(motion)
        });
    }

    match key.code {
        KeyCode::F(1) => Some(Message::ToggleHelp),
        KeyCode::Enter => Some(Message::SplitLine),
        KeyCode::Backspace => Some(Message::DeleteBack),
        KeyCode::Delete => Some(Message::DeleteForward),
        KeyCode::Tab => Some(Message::InsertTab),
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            Some(Message::InsertChar(c))
        }
        _ => None,
    }
}

pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
    let area = window_area(&model.viewport);
    let clicked = matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left));

    if model.dialog.is_some() {
        return clicked.then_some(Message::DismissDialog);
    }
    if model.help_visible {
        return clicked.then_some(Message::HideHelp);
    }

    if let Some(picker) = &model.picker {
        let list = picker_list_area(picker_rect(area));
        return match mouse.kind {
            MouseEventKind::Down(MouseButton::Left)
                if point_in_rect(mouse.column, mouse.row, list) =>
            {
                let rows = usize::from(list.height);
                let start = picker_scroll_start(picker.selected(), picker.entries().len(), rows);
                let idx = start + usize::from(mouse.row - list.y);
                if idx >= picker.entries().len() {
                    None
                } else if idx == picker.selected() {
                    Some(Message::PickerConfirm)
                } else {
                    Some(Message::PickerSelect(idx))
                }
            }
            MouseEventKind::ScrollUp => Some(Message::PickerUp),
            MouseEventKind::ScrollDown => Some(Message::PickerDown),
            _ => None,
        };
    }

    let layout = screen_layout(area);
    let title_hit = menu_title_rects(layout.menu_bar)
        .into_iter()
        .find(|(_, rect)| point_in_rect(mouse.column, mouse.row, *rect))
        .map(|(menu, _)| menu);

    if let Some(state) = model.menu {
        let dropdown = menu_dropdown_rect(state.menu, layout.menu_bar, area);
        let item = menu_item_at(state.menu, dropdown, mouse.column, mouse.row);
        return match mouse.kind {
            MouseEventKind::Moved => item
                .filter(|&idx| idx != state.selected)
                .map(Message::MenuSelect)
                .or_else(|| {
                    title_hit
                        .filter(|&menu| menu != state.menu)
                        .map(Message::OpenMenu)
                }),
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(idx) = item {
                    state.menu.items()[idx].action().map(Message::Action)
                } else if point_in_rect(mouse.column, mouse.row, dropdown) {
                    // Separator or border
                    None
                } else if let Some(menu) = title_hit.filter(|&menu| menu != state.menu) {
                    Some(Message::OpenMenu(menu))
                } else {
                    Some(Message::CloseMenu)
                }
            }
            _ => None,
        };
    }

    if clicked && let Some(menu) = title_hit {
        return Some(Message::OpenMenu(menu));
    }

    if point_in_rect(mouse.column, mouse.row, layout.toolbar) {
        let button = toolbar_buttons(layout.toolbar)
            .into_iter()
            .find(|(_, rect)| point_in_rect(mouse.column, mouse.row, *rect))
            .map(|(action, _)| action);
        return match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => button.map(Message::Action),
            MouseEventKind::Moved if button != model.hovered_action => {
                Some(Message::HoverAction(button))
            }
            _ => None,
        };
    }
    if model.hovered_action.is_some() && matches!(mouse.kind, MouseEventKind::Moved) {
        return Some(Message::HoverAction(None));
    }

    let editor = layout.editor;
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_LINES)),
        MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_LINES)),
        MouseEventKind::Down(MouseButton::Left)
            if point_in_rect(mouse.column, mouse.row, editor) =>
        {
            let (line, col) = buffer_position(model, editor, mouse.column, mouse.row);
            Some(Message::MoveTo(line, col))
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let (line, col) = buffer_position(model, editor, mouse.column, mouse.row);
            Some(Message::SelectTo(line, col))
        }
        _ => None,
    }
}

/// Global command shortcuts.
fn shortcut_action(key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::F(12) {
        return Some(Action::SaveAs);
    }
    if !key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT)
    {
        return None;
    }
    let KeyCode::Char(c) = key.code else {
        return None;
    };
    // Some terminals report Ctrl+Shift+letter as an uppercase char only
    let shifted = key.modifiers.contains(KeyModifiers::SHIFT) || c.is_ascii_uppercase();
    match c.to_ascii_lowercase() {
        'o' => Some(Action::Open),
        's' if shifted => Some(Action::SaveAs),
        's' => Some(Action::Save),
        'p' => Some(Action::Print),
        'z' if shifted => Some(Action::Redo),
        'z' => Some(Action::Undo),
        'y' => Some(Action::Redo),
        'x' => Some(Action::Cut),
        'c' => Some(Action::Copy),
        'v' => Some(Action::Paste),
        'a' => Some(Action::SelectAll),
        'q' => Some(Action::Quit),
        _ => None,
    }
}

/// F10 or Alt+mnemonic.
fn menu_for_key(key: KeyEvent) -> Option<Menu> {
    match key.code {
        KeyCode::F(10) => Some(Menu::File),
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::ALT) => Menu::ALL
            .into_iter()
            .find(|menu| menu.mnemonic() == c.to_ascii_lowercase()),
        _ => None,
    }
}

/// Index of the selectable menu item under the pointer.
fn menu_item_at(menu: Menu, dropdown: ratatui::layout::Rect, col: u16, row: u16) -> Option<usize> {
    if !point_in_rect(col, row, dropdown)
        || col == dropdown.x
        || col + 1 >= dropdown.x + dropdown.width
        || row == dropdown.y
    {
        return None;
    }
    let idx = usize::from(row - dropdown.y - 1);
    menu.items()
        .get(idx)
        .and_then(|item| item.action())
        .map(|_| idx)
}

/// Buffer (line, byte col) under a screen cell of the editor surface.
///
/// Rows above or below the surface clamp to the first or last visible line.
fn buffer_position(
    model: &Model,
    editor: ratatui::layout::Rect,
    column: u16,
    row: u16,
) -> (usize, usize) {
    let rel_row = usize::from(row.saturating_sub(editor.y)).min(
        usize::from(editor.height.saturating_sub(1)),
    );
    let last_line = model.buffer.line_count().saturating_sub(1);
    let line = (model.viewport.offset() + rel_row).min(last_line);
    let display_col =
        usize::from(column.saturating_sub(editor.x)) + model.viewport.col_offset();
    let text = model.buffer.line_at(line).unwrap_or_default();
    (line, byte_col_for_display(&text, display_col))
}
