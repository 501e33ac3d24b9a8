//! Modal file picker used by Open and Save As.
//!
//! The picker lists one directory at a time: `..`, sub-directories, then
//! the files matching the active [`FileFilter`]. A free-form input line
//! lets the user type any name, so the filter only narrows the listing.

use std::path::{Path, PathBuf};

use crate::config::FileFilter;

/// What the picker was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Open,
    SaveAs,
}

impl PickerMode {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Open => "Open file",
            Self::SaveAs => "Save file as",
        }
    }
}

/// A directory entry shown in the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Display name (file name or "..")
    pub name: String,
    /// Full path to the entry
    pub path: PathBuf,
    /// Whether this entry is a directory
    pub is_dir: bool,
}

/// Result of confirming the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    /// Enter a directory and keep the picker open.
    Navigate(PathBuf),
    /// A file was chosen; the picker is done.
    Chosen(PathBuf),
    /// Nothing to confirm yet.
    Nothing,
}

#[derive(Debug, Clone)]
pub struct FilePicker {
    mode: PickerMode,
    dir: PathBuf,
    entries: Vec<DirEntry>,
    selected: usize,
    input: String,
    filter: FileFilter,
    error: Option<String>,
}

impl FilePicker {
    /// Create a picker with an empty listing rooted at `.`.
    ///
    /// Call [`FilePicker::load_directory`] to populate it.
    pub fn new(mode: PickerMode, filter: FileFilter) -> Self {
        Self {
            mode,
            dir: PathBuf::from("."),
            entries: Vec::new(),
            selected: 0,
            input: String::new(),
            filter,
            error: None,
        }
    }

    /// Pre-fill the name input.
    #[must_use]
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    pub const fn mode(&self) -> PickerMode {
        self.mode
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    pub const fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&DirEntry> {
        self.entries.get(self.selected)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub const fn filter(&self) -> &FileFilter {
        &self.filter
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn set_input(&mut self, input: String) {
        self.input = input;
    }

    /// Scan a directory and replace the listing.
    ///
    /// On failure the previous listing is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read or an entry's
    /// file type cannot be determined.
    pub fn load_directory(&mut self, dir: &Path) -> std::io::Result<()> {
        let dir = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        let mut entries = Vec::new();

        if let Some(parent) = dir.parent() {
            entries.push(DirEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
            });
        }

        let mut dirs = Vec::new();
        let mut files = Vec::new();

        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            // Skip hidden files/dirs
            if name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            // Follow symlinks so linked directories can be entered
            let is_dir = path.is_dir() || entry.file_type()?.is_dir();
            if is_dir {
                dirs.push(DirEntry { name, path, is_dir });
            } else if self.filter.matches(&name) {
                files.push(DirEntry {
                    name,
                    path,
                    is_dir: false,
                });
            }
        }

        dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        entries.extend(dirs);
        entries.extend(files);
        self.entries = entries;
        self.dir = dir;
        self.selected = 0;
        self.error = None;
        Ok(())
    }

    /// Enter `dir`, clearing the name input on success.
    ///
    /// # Errors
    ///
    /// Propagates the listing error of [`FilePicker::load_directory`].
    pub fn navigate(&mut self, dir: &Path) -> std::io::Result<()> {
        self.load_directory(dir)?;
        self.input.clear();
        Ok(())
    }

    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.select((self.selected + 1).min(self.entries.len() - 1));
    }

    pub fn select_prev(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    /// Highlight an entry. A file's name is copied into the input; a
    /// directory clears it so Enter navigates.
    pub fn select(&mut self, idx: usize) {
        let Some(entry) = self.entries.get(idx) else {
            return;
        };
        if entry.is_dir {
            self.input.clear();
        } else {
            self.input.clone_from(&entry.name);
        }
        self.selected = idx;
    }

    /// Decide what Enter does.
    ///
    /// A typed name wins over the highlighted entry; relative names resolve
    /// against the listed directory.
    pub fn resolve(&self) -> PickerOutcome {
        if !self.input.trim().is_empty() {
            let path = self.dir.join(&self.input);
            if path.is_dir() {
                return PickerOutcome::Navigate(path);
            }
            return PickerOutcome::Chosen(path);
        }
        match self.selected_entry() {
            Some(entry) if entry.is_dir => PickerOutcome::Navigate(entry.path.clone()),
            Some(entry) => PickerOutcome::Chosen(entry.path.clone()),
            None => PickerOutcome::Nothing,
        }
    }
}
