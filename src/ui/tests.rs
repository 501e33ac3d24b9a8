use super::*;
use crate::actions::Action;
use crate::app::{Message, Model, update};
use crate::config::{FileFilter, Settings};
use crate::picker::{FilePicker, PickerMode};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use tempfile::tempdir;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn create_test_model() -> Model {
    Model::new(Settings::default(), (80, 24))
}

fn draw(model: &Model) -> Terminal<TestBackend> {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal
}

fn row_text(terminal: &Terminal<TestBackend>, row: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|col| buffer[(col, row)].symbol())
        .collect()
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|row| row_text(terminal, row))
        .collect::<Vec<_>>()
        .join("\n")
}

// --- Layout ---

#[test]
fn test_screen_layout_rows() {
    let layout = screen_layout(Rect::new(0, 0, 80, 24));
    assert_eq!(layout.menu_bar, Rect::new(0, 0, 80, 1));
    assert_eq!(layout.editor, Rect::new(0, 1, 80, 21));
    assert_eq!(layout.toolbar, Rect::new(0, 22, 80, 1));
    assert_eq!(layout.status, Rect::new(0, 23, 80, 1));
}

#[test]
fn test_window_area_matches_terminal_size() {
    let model = create_test_model();
    assert_eq!(window_area(&model.viewport), Rect::new(0, 0, 80, 24));
}

#[test]
fn test_menu_titles_do_not_overlap() {
    let rects = menu_title_rects(Rect::new(0, 0, 80, 1));
    assert_eq!(rects.len(), 2);
    let (_, file) = rects[0];
    let (_, edit) = rects[1];
    assert!(file.x + file.width <= edit.x);
}

#[test]
fn test_toolbar_buttons_in_order_and_within_bar() {
    let bar = Rect::new(0, 22, 80, 1);
    let buttons = toolbar_buttons(bar);
    let actions: Vec<Action> = buttons.iter().map(|(a, _)| *a).collect();
    assert_eq!(
        actions,
        vec![
            Action::Open,
            Action::Save,
            Action::SaveAs,
            Action::Print,
            Action::Undo,
            Action::Redo
        ]
    );
    for pair in buttons.windows(2) {
        assert!(pair[0].1.x + pair[0].1.width < pair[1].1.x);
    }
    assert!(buttons.iter().all(|(_, r)| r.x + r.width <= 80 && r.y == 22));
}

#[test]
fn test_toolbar_drops_buttons_that_do_not_fit() {
    let buttons = toolbar_buttons(Rect::new(0, 0, 20, 1));
    assert!(buttons.len() < 6);
    assert!(buttons.iter().all(|(_, r)| r.x + r.width <= 20));
}

#[test]
fn test_menu_dropdown_fits_longest_item() {
    let area = Rect::new(0, 0, 80, 24);
    let rect = menu_dropdown_rect(Menu::File, Rect::new(0, 0, 80, 1), area);
    assert_eq!(rect.y, 1);
    // Six items plus borders
    assert_eq!(rect.height, 8);
    assert!(rect.width as usize >= "Save File As".len() + "Ctrl+Shift+S".len() + 2);
}

#[test]
fn test_menu_dropdown_clamped_to_small_area() {
    let area = Rect::new(0, 0, 12, 5);
    let rect = menu_dropdown_rect(Menu::Edit, Rect::new(0, 0, 12, 1), area);
    assert!(rect.x + rect.width <= 12);
    assert!(rect.y + rect.height <= 5);
}

#[test]
fn test_picker_scroll_start_keeps_selection_visible() {
    assert_eq!(picker_scroll_start(0, 50, 10), 0);
    assert_eq!(picker_scroll_start(9, 50, 10), 0);
    assert_eq!(picker_scroll_start(10, 50, 10), 1);
    assert_eq!(picker_scroll_start(49, 50, 10), 40);
    assert_eq!(picker_scroll_start(3, 5, 10), 0);
}

#[test]
fn test_picker_list_area_inside_popup() {
    let popup = picker_rect(Rect::new(0, 0, 80, 24));
    let list = picker_list_area(popup);
    assert!(list.x > popup.x && list.y > popup.y);
    assert!(list.y + list.height + 3 < popup.y + popup.height);
}

#[test]
fn test_point_in_rect_edges() {
    let rect = Rect::new(2, 3, 4, 2);
    assert!(point_in_rect(2, 3, rect));
    assert!(point_in_rect(5, 4, rect));
    assert!(!point_in_rect(6, 4, rect));
    assert!(!point_in_rect(2, 5, rect));
}

// --- Rendering ---

#[test]
fn test_render_shows_title_and_menus() {
    let terminal = draw(&create_test_model());
    let top = row_text(&terminal, 0);
    assert!(top.contains("File"));
    assert!(top.contains("Edit"));
    assert!(top.contains("Untitled - TwezopadX"));
}

#[test]
fn test_render_shows_buffer_text() {
    let model = update(
        create_test_model(),
        Message::InsertText("first line\nsecond".to_string()),
    );
    let terminal = draw(&model);
    assert!(row_text(&terminal, 1).starts_with("first line"));
    assert!(row_text(&terminal, 2).starts_with("second"));
}

#[test]
fn test_render_shows_toolbar_groups() {
    let terminal = draw(&create_test_model());
    let toolbar = row_text(&terminal, 22);
    for label in ["File:", "Open", "Save", "Save As", "Print", "Edit:", "Undo", "Redo"] {
        assert!(toolbar.contains(label), "missing {label} in {toolbar:?}");
    }
}

#[test]
fn test_status_bar_shows_cursor_position() {
    let model = update(create_test_model(), Message::InsertText("héllo".to_string()));
    let terminal = draw(&model);
    assert!(row_text(&terminal, 23).contains("Ln 1, Col 6"));
}

#[test]
fn test_status_bar_shows_menu_item_tip() {
    let model = update(create_test_model(), Message::OpenMenu(Menu::File));
    let model = update(model, Message::MenuDown);
    let terminal = draw(&model);
    assert!(row_text(&terminal, 23).contains("Save file"));
    let screen = screen_text(&terminal);
    assert!(screen.contains("Open File"));
    assert!(screen.contains("Ctrl+O"));
}

#[test]
fn test_status_bar_shows_toolbar_hover_tip() {
    let model = update(
        create_test_model(),
        Message::HoverAction(Some(Action::SaveAs)),
    );
    let terminal = draw(&model);
    assert!(row_text(&terminal, 23).contains("Save file as"));
}

#[test]
fn test_render_picker_overlay() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "").unwrap();
    std::fs::write(dir.path().join("image.png"), "").unwrap();

    let mut picker = FilePicker::new(PickerMode::Open, FileFilter::default());
    picker.load_directory(dir.path()).unwrap();
    let mut model = create_test_model();
    model.picker = Some(picker);

    let screen = screen_text(&draw(&model));
    assert!(screen.contains("Open file"));
    assert!(screen.contains("notes.txt"));
    assert!(!screen.contains("image.png"));
    assert!(screen.contains("Files of type: Text Document (*.txt)"));
}

#[test]
fn test_render_error_dialog() {
    let mut model = create_test_model();
    model.show_error("Permission denied (os error 13)");
    let screen = screen_text(&draw(&model));
    assert!(screen.contains("Error"));
    assert!(screen.contains("Permission denied (os error 13)"));
}

#[test]
fn test_render_help_overlay() {
    let model = update(create_test_model(), Message::ToggleHelp);
    let screen = screen_text(&draw(&model));
    assert!(screen.contains("Help"));
    assert!(screen.contains("Ctrl+Shift+S"));
}

#[test]
fn test_render_survives_tiny_terminal() {
    let model = Model::new(Settings::default(), (10, 3));
    let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
    terminal.draw(|frame| render(&model, frame)).unwrap();
}
