//! The text widget: a rope-backed buffer with cursor, selection and
//! undo/redo, designed for integration into the TEA architecture.

mod buffer;
mod history;

pub use buffer::{
    Cursor, DEFAULT_UNDO_LIMIT, Direction, EditorBuffer, Motion, TAB_DISPLAY_WIDTH,
    byte_col_for_display, char_display_width, display_width,
};
pub use history::{Coalesce, TextEdit, UndoHistory, UndoStep};
