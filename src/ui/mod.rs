//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - the screen layout shared by rendering and mouse hit-testing
//! - menu bar, editor surface, toolbar, status bar and overlays

pub mod viewport;

mod overlays;
mod render;
mod status;

pub use overlays::{
    menu_dropdown_rect, picker_list_area, picker_rect, picker_scroll_start,
};
pub use render::render;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::actions::{Action, Menu, TOOLBAR};

/// Rows taken by the menu bar, toolbar and status bar.
pub const CHROME_ROWS: u16 = 3;

/// Areas of the main window, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub menu_bar: Rect,
    pub editor: Rect,
    pub toolbar: Rect,
    pub status: Rect,
}

/// Split the window into menu bar, editor surface, toolbar and status bar.
pub fn screen_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
    ScreenLayout {
        menu_bar: chunks[0],
        editor: chunks[1],
        toolbar: chunks[2],
        status: chunks[3],
    }
}

/// Full-window area reconstructed from the viewport, for input handling.
pub const fn window_area(viewport: &viewport::Viewport) -> Rect {
    Rect::new(
        0,
        0,
        viewport.width(),
        viewport.height().saturating_add(CHROME_ROWS),
    )
}

/// Where each menu title sits in the menu bar.
pub fn menu_title_rects(menu_bar: Rect) -> Vec<(Menu, Rect)> {
    let mut x = menu_bar.x.saturating_add(1);
    let mut out = Vec::new();
    for menu in Menu::ALL {
        let width = label_width(menu.title()).saturating_add(2);
        out.push((menu, Rect::new(x, menu_bar.y, width, 1)));
        x = x.saturating_add(width);
    }
    out
}

/// Where each toolbar button sits; buttons that do not fit are dropped.
///
/// Each group starts with its name followed by `": "`, so a group label
/// occupies the `label_width(name) + 2` cells before its first button.
pub fn toolbar_buttons(toolbar: Rect) -> Vec<(Action, Rect)> {
    let mut x = toolbar.x.saturating_add(1);
    let mut out = Vec::new();
    for group in TOOLBAR {
        x = x.saturating_add(label_width(group.name).saturating_add(2));
        for &action in group.actions {
            let width = label_width(action.button_label()).saturating_add(2);
            out.push((action, Rect::new(x, toolbar.y, width, 1)));
            x = x.saturating_add(width.saturating_add(1));
        }
        x = x.saturating_add(2);
    }
    let right = toolbar.x.saturating_add(toolbar.width);
    out.retain(|(_, rect)| rect.x.saturating_add(rect.width) <= right);
    out
}

pub(crate) fn label_width(label: &str) -> u16 {
    u16::try_from(label.len()).unwrap_or(u16::MAX)
}

pub const fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

#[cfg(test)]
mod tests;
