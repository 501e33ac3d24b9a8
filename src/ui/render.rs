use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::Model;
use crate::editor::{TAB_DISPLAY_WIDTH, char_display_width};

use super::{menu_title_rects, overlays, screen_layout, status};

const CURSOR_STYLE: Style = Style::new().bg(Color::White).fg(Color::Black);
const SELECTION_STYLE: Style = Style::new().bg(Color::DarkGray);

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let layout = screen_layout(area);

    render_menu_bar(model, frame, layout.menu_bar);
    render_editor(model, frame, layout.editor);
    status::render_toolbar(model, frame, layout.toolbar);
    status::render_status_bar(model, frame, layout.status);

    if let Some(state) = model.menu {
        overlays::render_menu_dropdown(model, state, frame, layout.menu_bar);
    }
    if let Some(picker) = &model.picker {
        overlays::render_picker_overlay(picker, frame, area);
    }
    if model.help_visible {
        overlays::render_help_overlay(frame, area);
    }
    if let Some(message) = &model.dialog {
        overlays::render_error_dialog(message, frame, area);
    }
}

fn render_menu_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let bar_style = Style::default().bg(Color::Blue).fg(Color::White);
    frame.render_widget(Paragraph::new("").style(bar_style), area);

    let open_menu = model.menu.map(|state| state.menu);
    let mut right_edge = area.x;
    for (menu, rect) in menu_title_rects(area) {
        let style = if open_menu == Some(menu) {
            bar_style.reversed()
        } else {
            bar_style
        };
        let title = menu.title();
        let split = title.chars().next().map_or(0, char::len_utf8);
        let line = Line::from(vec![
            Span::styled(" ", style),
            Span::styled(title[..split].to_string(), style.underlined()),
            Span::styled(format!("{} ", &title[split..]), style),
        ]);
        frame.render_widget(Paragraph::new(line), rect.intersection(area));
        right_edge = rect.x + rect.width;
    }

    // Window title, right-aligned after the menu titles
    let title = model.title();
    let title_area = Rect {
        x: right_edge + 1,
        width: (area.x + area.width).saturating_sub(right_edge + 2),
        ..area
    };
    if title_area.width > 0 {
        frame.render_widget(
            Paragraph::new(title)
                .style(bar_style.add_modifier(Modifier::BOLD))
                .alignment(Alignment::Right),
            title_area,
        );
    }
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let buf = &model.buffer;
    let cursor = buf.cursor();
    let col_offset = model.viewport.col_offset();
    let width = usize::from(area.width);

    let content: Vec<Line> = model
        .viewport
        .visible_range()
        .take(usize::from(area.height))
        .map(|line_idx| {
            let text = buf.line_at(line_idx).unwrap_or_default();
            let cursor_col = (line_idx == cursor.line).then_some(cursor.col);
            editor_line(
                &text,
                buf.selection_on_line(line_idx),
                cursor_col,
                col_offset,
                width,
            )
        })
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

/// Build one screen row of the editor surface.
///
/// `selection` and `cursor_col` are byte offsets into `text`. Tabs are
/// expanded, control characters drawn as `?`, and wide characters cut by
/// the horizontal scroll edge are padded with spaces.
pub(super) fn editor_line(
    text: &str,
    selection: Option<(usize, Option<usize>)>,
    cursor_col: Option<usize>,
    col_offset: usize,
    width: usize,
) -> Line<'static> {
    let mut row = RowBuilder::new(col_offset, width);
    let selected = |idx: usize| {
        selection.is_some_and(|(start, end)| idx >= start && end.is_none_or(|end| idx < end))
    };

    for (idx, ch) in text.char_indices() {
        let style = if cursor_col == Some(idx) {
            CURSOR_STYLE
        } else if selected(idx) {
            SELECTION_STYLE
        } else {
            Style::default()
        };
        match ch {
            '\t' => row.push_cells(&" ".repeat(TAB_DISPLAY_WIDTH), TAB_DISPLAY_WIDTH, style),
            c if c.is_control() => row.push_cells("?", 1, style),
            c => {
                let mut glyph = [0; 4];
                row.push_cells(c.encode_utf8(&mut glyph), char_display_width(c), style);
            }
        }
    }

    // Trailing cell: cursor at end of line or a selected line break
    if cursor_col.is_some_and(|col| col >= text.len()) {
        row.push_cells(" ", 1, CURSOR_STYLE);
    } else if selection.is_some_and(|(start, end)| end.is_none() && start <= text.len()) {
        row.push_cells(" ", 1, SELECTION_STYLE);
    }

    row.finish()
}

/// Accumulates cells for one row, clipped to the horizontal window and
/// merged into as few spans as possible.
struct RowBuilder {
    col_offset: usize,
    width: usize,
    x: usize,
    spans: Vec<Span<'static>>,
    pending: String,
    pending_style: Style,
}

impl RowBuilder {
    fn new(col_offset: usize, width: usize) -> Self {
        Self {
            col_offset,
            width,
            x: 0,
            spans: Vec::new(),
            pending: String::new(),
            pending_style: Style::default(),
        }
    }

    fn push_cells(&mut self, glyph: &str, cells: usize, style: Style) {
        let start = self.x;
        let end = start + cells;
        self.x = end;
        let window_end = self.col_offset + self.width;

        if cells == 0 {
            // Combining marks attach to the previous visible cell
            if start > self.col_offset && start <= window_end && !self.pending.is_empty() {
                self.pending.push_str(glyph);
            }
            return;
        }
        if end <= self.col_offset || start >= window_end {
            return;
        }
        if start >= self.col_offset && end <= window_end {
            self.append(glyph, style);
        } else {
            let visible = end.min(window_end) - start.max(self.col_offset);
            self.append(&" ".repeat(visible), style);
        }
    }

    fn append(&mut self, text: &str, style: Style) {
        if style != self.pending_style && !self.pending.is_empty() {
            self.flush();
        }
        self.pending_style = style;
        self.pending.push_str(text);
    }

    fn flush(&mut self) {
        let text = std::mem::take(&mut self.pending);
        self.spans.push(Span::styled(text, self.pending_style));
    }

    fn finish(mut self) -> Line<'static> {
        if !self.pending.is_empty() {
            self.flush();
        }
        Line::from(self.spans)
    }
}
