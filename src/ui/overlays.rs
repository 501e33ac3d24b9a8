use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::actions::{Action, Menu, MenuItem};
use crate::app::{MenuState, Model};
use crate::picker::FilePicker;

use super::{label_width, menu_title_rects};

/// Rows of the picker popup below the entry list: error, name, filter.
const PICKER_FOOTER_ROWS: u16 = 3;

pub fn menu_dropdown_rect(menu: Menu, menu_bar: Rect, area: Rect) -> Rect {
    let x = menu_title_rects(menu_bar)
        .into_iter()
        .find(|(m, _)| *m == menu)
        .map_or(menu_bar.x, |(_, rect)| rect.x);
    let inner_width = menu_inner_width(menu);
    // Dropdowns hold a handful of items
    #[allow(clippy::cast_possible_truncation)]
    let height = menu.items().len() as u16 + 2;
    let width = inner_width.saturating_add(2).min(area.width);
    let x = x.min(area.x + area.width.saturating_sub(width));
    let y = menu_bar.y + 1;
    Rect::new(x, y, width, height.min(area.height.saturating_sub(y - area.y)))
}

fn menu_inner_width(menu: Menu) -> u16 {
    let widest = menu
        .items()
        .iter()
        .filter_map(|item| item.action())
        .map(|action| label_width(action.label()) + 3 + label_width(action.shortcut()))
        .max()
        .unwrap_or(0);
    widest + 2
}

pub fn render_menu_dropdown(model: &Model, state: MenuState, frame: &mut Frame, menu_bar: Rect) {
    let area = frame.area();
    let popup = menu_dropdown_rect(state.menu, menu_bar, area);
    let inner_width = usize::from(popup.width.saturating_sub(2));

    let lines: Vec<Line> = state
        .menu
        .items()
        .iter()
        .enumerate()
        .map(|(idx, item)| match item {
            MenuItem::Separator => Line::styled(
                "\u{2500}".repeat(inner_width),
                Style::default().fg(Color::DarkGray),
            ),
            MenuItem::Action(action) => {
                let label = action.label();
                let shortcut = action.shortcut();
                let gap = inner_width
                    .saturating_sub(label.len() + shortcut.len() + 2)
                    .max(1);
                let text = format!(" {label}{}{shortcut} ", " ".repeat(gap));
                let mut style = if action_enabled(model, *action) {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                if idx == state.selected {
                    style = style.reversed();
                }
                Line::styled(text, style)
            }
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Whether an action would currently do anything.
pub fn action_enabled(model: &Model, action: Action) -> bool {
    match action {
        Action::Undo => model.buffer.can_undo(),
        Action::Redo => model.buffer.can_redo(),
        Action::Cut | Action::Copy => model.buffer.has_selection(),
        Action::Paste => !model.clipboard.is_empty(),
        _ => true,
    }
}

pub fn picker_rect(area: Rect) -> Rect {
    let popup_width = area.width.saturating_sub(16).max(44);
    let popup_height = area.height.saturating_sub(4).max(10);
    centered_popup_rect(popup_width, popup_height, area)
}

/// Area of the entry list inside the picker popup.
pub const fn picker_list_area(popup: Rect) -> Rect {
    // 1 row for border + 1 row for the directory line
    Rect::new(
        popup.x + 1,
        popup.y + 2,
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(3 + PICKER_FOOTER_ROWS),
    )
}

/// First entry shown so that `selected` stays inside `rows` visible rows.
pub fn picker_scroll_start(selected: usize, len: usize, rows: usize) -> usize {
    if rows == 0 {
        return selected;
    }
    selected
        .saturating_sub(rows - 1)
        .min(len.saturating_sub(rows))
}

pub fn render_picker_overlay(picker: &FilePicker, frame: &mut Frame, area: Rect) {
    let popup = picker_rect(area);
    let list_area = picker_list_area(popup);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let block = Block::default()
        .title(picker.mode().title())
        .title_bottom(Line::styled(
            " Enter choose \u{2502} Up/Down browse \u{2502} Esc cancel ",
            dim_style,
        ))
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let inner_x = popup.x + 1;
    let inner_width = popup.width.saturating_sub(2);

    let dir_line = Line::from(vec![
        Span::styled(" Look in: ", dim_style),
        Span::raw(picker.dir().display().to_string()),
    ]);
    frame.render_widget(
        Paragraph::new(dir_line),
        Rect::new(inner_x, popup.y + 1, inner_width, 1).intersection(popup),
    );

    let rows = usize::from(list_area.height);
    let entries = picker.entries();
    let start = picker_scroll_start(picker.selected(), entries.len(), rows);
    let items: Vec<Line> = entries
        .iter()
        .enumerate()
        .skip(start)
        .take(rows)
        .map(|(i, entry)| {
            let marker = if picker.selected() == i { ">" } else { " " };
            let display_name = if entry.is_dir && entry.name != ".." {
                format!("{}/", entry.name)
            } else {
                entry.name.clone()
            };
            let style = if entry.is_dir {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let style = if picker.selected() == i {
                style.reversed()
            } else {
                style
            };
            Line::styled(format!("{marker} {display_name}"), style)
        })
        .collect();
    frame.render_widget(Paragraph::new(items), list_area);

    let footer_y = list_area.y + list_area.height;
    if let Some(error) = picker.error() {
        frame.render_widget(
            Paragraph::new(Line::styled(format!(" {error}"), Style::default().fg(Color::Red))),
            Rect::new(inner_x, footer_y, inner_width, 1).intersection(popup),
        );
    }
    let name_line = Line::from(vec![
        Span::styled(" File name: ", dim_style),
        Span::raw(picker.input().to_string()),
        Span::styled(" ", Style::default().bg(Color::White)),
    ]);
    frame.render_widget(
        Paragraph::new(name_line),
        Rect::new(inner_x, footer_y + 1, inner_width, 1).intersection(popup),
    );
    let filter_line = Line::from(vec![
        Span::styled(" Files of type: ", dim_style),
        Span::raw(picker.filter().description()),
    ]);
    frame.render_widget(
        Paragraph::new(filter_line),
        Rect::new(inner_x, footer_y + 2, inner_width, 1).intersection(popup),
    );
}

pub fn render_error_dialog(message: &str, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(8).clamp(20, 70);
    let text_width = usize::from(popup_width.saturating_sub(4)).max(1);
    let wrapped_rows = message
        .lines()
        .map(|line| line.chars().count().div_ceil(text_width).max(1))
        .sum::<usize>()
        .max(1);
    // +2 border, +1 blank, +1 hint
    let popup_height = u16::try_from(wrapped_rows + 4).unwrap_or(u16::MAX);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let mut lines: Vec<Line> = message.lines().map(|l| Line::raw(l.to_string())).collect();
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Press any key to continue",
        Style::default().fg(Color::Indexed(245)),
    ));

    let block = Block::default()
        .title("Error")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}

pub fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("File", section_style));
    for action in [Action::Open, Action::Save, Action::SaveAs, Action::Print, Action::Quit] {
        lines.push(shortcut_line(action));
    }
    lines.push(Line::raw("  F12                 Save File As"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Edit", section_style));
    for action in [
        Action::Undo,
        Action::Redo,
        Action::Cut,
        Action::Copy,
        Action::Paste,
        Action::SelectAll,
    ] {
        lines.push(shortcut_line(action));
    }
    lines.push(Line::raw("  Ctrl+Shift+Z        Redo"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Navigation", section_style));
    lines.push(Line::raw("  Arrows, Home/End    Move cursor"));
    lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    lines.push(Line::raw("  Ctrl+Home/End       Buffer start / end"));
    lines.push(Line::raw("  PageUp/PageDown     Page movement"));
    lines.push(Line::raw("  Shift+movement      Extend selection"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Menus", section_style));
    lines.push(Line::raw("  F10 / Alt+F / Alt+E Open menu"));
    lines.push(Line::raw("  Arrows, Enter, Esc  Navigate, run, close"));
    lines.push(Line::raw("  F1                  Toggle help"));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn shortcut_line(action: Action) -> Line<'static> {
    Line::raw(format!("  {:<20}{}", action.shortcut(), action.label()))
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
