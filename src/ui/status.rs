use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::actions::TOOLBAR;
use crate::app::{Model, ToastLevel};

use super::overlays::action_enabled;
use super::toolbar_buttons;

pub fn render_toolbar(model: &Model, frame: &mut Frame, area: Rect) {
    let bar_style = Style::default().bg(Color::Black).fg(Color::Gray);
    frame.render_widget(Paragraph::new("").style(bar_style), area);

    let buttons = toolbar_buttons(area);
    for group in TOOLBAR {
        let group_buttons: Vec<_> = buttons
            .iter()
            .filter(|(action, _)| group.actions.contains(action))
            .collect();
        let Some((_, first)) = group_buttons.first() else {
            continue;
        };
        let label = format!("{}: ", group.name);
        let label_width = super::label_width(&label);
        let label_area = Rect::new(first.x.saturating_sub(label_width), area.y, label_width, 1);
        frame.render_widget(
            Paragraph::new(label).style(bar_style.add_modifier(Modifier::DIM)),
            label_area.intersection(area),
        );
        for (action, rect) in group_buttons {
            let style = if model.hovered_action == Some(*action) {
                Style::default().bg(Color::Cyan).fg(Color::Black)
            } else if action_enabled(model, *action) {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default().bg(Color::DarkGray).fg(Color::Gray)
            };
            frame.render_widget(
                Paragraph::new(format!(" {} ", action.button_label())).style(style),
                *rect,
            );
        }
    }
}

/// Status bar: item tip while a menu item or toolbar button is
/// highlighted, otherwise the active toast or the cursor position.
pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let tip = model
        .menu
        .and_then(|state| state.selected_action())
        .or(model.hovered_action)
        .map(crate::actions::Action::status_tip);

    if let Some(tip) = tip {
        let bar = Paragraph::new(format!(" {tip}"))
            .style(Style::default().bg(Color::DarkGray).fg(Color::White));
        frame.render_widget(bar, area);
        return;
    }

    if model.active_toast().is_some() {
        render_toast_bar(model, frame, area);
        return;
    }

    let cursor = model.buffer.cursor();
    let line = model.buffer.line_at(cursor.line).unwrap_or_default();
    let col = line[..cursor.col.min(line.len())].chars().count();
    let status = format!(" Ln {}, Col {}", cursor.line + 1, col + 1);
    let hint = "F1:help ";
    let pad = usize::from(area.width).saturating_sub(status.len() + hint.len());

    let status_bar = Paragraph::new(format!("{status}{}{hint}", " ".repeat(pad)))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
    };
    let toast = Paragraph::new(format!(" {prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
