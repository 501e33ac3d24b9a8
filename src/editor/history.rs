use ropey::Rope;

/// One primitive change: at char offset `start`, `deleted` was replaced by
/// `inserted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub start: usize,
    pub deleted: String,
    pub inserted: String,
}

impl TextEdit {
    fn deleted_len(&self) -> usize {
        self.deleted.chars().count()
    }

    fn inserted_len(&self) -> usize {
        self.inserted.chars().count()
    }

    /// Re-apply the edit to a rope holding the pre-edit text.
    pub(super) fn apply(&self, rope: &mut Rope) {
        let end = self.start + self.deleted_len();
        if end > self.start {
            rope.remove(self.start..end);
        }
        if !self.inserted.is_empty() {
            rope.insert(self.start, &self.inserted);
        }
    }

    /// Undo the edit on a rope holding the post-edit text.
    pub(super) fn revert(&self, rope: &mut Rope) {
        let end = self.start + self.inserted_len();
        if end > self.start {
            rope.remove(self.start..end);
        }
        if !self.deleted.is_empty() {
            rope.insert(self.start, &self.deleted);
        }
    }
}

/// Which kind of run an edit may be merged into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coalesce {
    Typing,
    Deleting,
}

/// A group of edits undone and redone together.
///
/// Cursor positions are char offsets into the whole buffer.
#[derive(Debug, Clone)]
pub struct UndoStep {
    pub edits: Vec<TextEdit>,
    pub cursor_before: usize,
    pub cursor_after: usize,
}

/// Linear undo/redo history with coalescing of consecutive typing.
#[derive(Debug)]
pub struct UndoHistory {
    undo_stack: Vec<UndoStep>,
    redo_stack: Vec<UndoStep>,
    max_steps: usize,
    /// Kind of run the top undo step still accepts, if any.
    open: Option<Coalesce>,
}

impl UndoHistory {
    pub const fn new(max_steps: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_steps,
            open: None,
        }
    }

    pub const fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub const fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub const fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub const fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Record a new edit. Clears the redo stack.
    ///
    /// With a `coalesce` kind, the edit joins the open step of the same kind
    /// (if any) instead of starting a new one, and leaves the step open for
    /// the next edit.
    pub fn record(
        &mut self,
        edit: TextEdit,
        cursor_before: usize,
        cursor_after: usize,
        coalesce: Option<Coalesce>,
    ) {
        self.redo_stack.clear();

        if coalesce.is_some()
            && self.open == coalesce
            && let Some(step) = self.undo_stack.last_mut()
        {
            step.edits.push(edit);
            step.cursor_after = cursor_after;
            return;
        }

        if self.max_steps == 0 {
            self.open = None;
            return;
        }
        if self.undo_stack.len() >= self.max_steps {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(UndoStep {
            edits: vec![edit],
            cursor_before,
            cursor_after,
        });
        self.open = coalesce;
    }

    /// Stop coalescing into the current step.
    pub const fn seal(&mut self) {
        self.open = None;
    }

    /// Move the newest step to the redo stack and return it.
    pub fn undo(&mut self) -> Option<&UndoStep> {
        self.open = None;
        let step = self.undo_stack.pop()?;
        self.redo_stack.push(step);
        self.redo_stack.last()
    }

    /// Move the newest undone step back to the undo stack and return it.
    pub fn redo(&mut self) -> Option<&UndoStep> {
        self.open = None;
        let step = self.redo_stack.pop()?;
        self.undo_stack.push(step);
        self.undo_stack.last()
    }

    /// Forget all history (e.g. after loading a different document).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open = None;
    }
}
