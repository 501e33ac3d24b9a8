//! Viewport management for scrolling.
//!
//! The [`Viewport`] struct tracks the visible area of the editor surface
//! and handles all scroll operations.

use std::ops::Range;

/// Manages the visible portion of the buffer.
///
/// The viewport tracks:
/// - Editor surface dimensions (width, height)
/// - Current vertical scroll offset (in lines) and horizontal offset (in
///   display columns)
/// - Total buffer length
///
/// # Example
///
/// ```
/// use twezopad::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 24, 100);
/// assert_eq!(vp.visible_range(), 0..24);
///
/// vp.scroll_down(10);
/// assert_eq!(vp.visible_range(), 10..34);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    col_offset: usize,
    total_lines: usize,
}

impl Viewport {
    /// Create a new viewport.
    ///
    /// # Arguments
    ///
    /// * `width` - Editor surface width in columns
    /// * `height` - Editor surface height in lines
    /// * `total_lines` - Total lines in the buffer
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            col_offset: 0,
            total_lines,
        }
    }

    /// Get the current scroll offset.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// First display column shown on screen.
    pub const fn col_offset(&self) -> usize {
        self.col_offset
    }

    /// Get the viewport width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the viewport height.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of lines in the buffer.
    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Get the range of visible lines.
    ///
    /// Returns a range from the current offset to offset + height,
    /// clamped to the buffer bounds.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset.min(self.total_lines);
        let end = (self.offset + self.height as usize).min(self.total_lines);
        start..end
    }

    /// Check if we can scroll up.
    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    /// Check if we can scroll down.
    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    /// Scroll up by n lines.
    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    /// Scroll down by n lines.
    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    /// Go to the beginning of the buffer.
    pub const fn go_to_top(&mut self) {
        self.offset = 0;
        self.col_offset = 0;
    }

    /// Scroll the minimum amount that brings (`line`, `col`) on screen.
    ///
    /// `col` is a display column; one extra cell is kept for a cursor
    /// sitting past the end of the line.
    pub fn ensure_visible(&mut self, line: usize, col: usize) {
        let height = self.height as usize;
        if height == 0 {
            self.offset = line;
        } else if line < self.offset {
            self.offset = line;
        } else if line >= self.offset + height {
            self.offset = line + 1 - height;
        }

        let width = self.width as usize;
        if width == 0 {
            self.col_offset = col;
        } else if col < self.col_offset {
            self.col_offset = col;
        } else if col >= self.col_offset + width {
            self.col_offset = col + 1 - width;
        }
    }

    /// Resize the viewport.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        // Clamp offset if buffer is now shorter than viewport
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the total number of lines (e.g., after an edit).
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Calculate the maximum valid offset.
    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}
