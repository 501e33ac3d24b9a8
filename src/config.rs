use std::path::PathBuf;
use std::time::Duration;

use glob::{MatchOptions, Pattern};

/// A file-picker filter: a human label plus one glob pattern such as
/// `*.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub label: String,
    pub pattern: String,
}

impl FileFilter {
    pub fn new(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: pattern.into(),
        }
    }

    /// Text shown in the picker, e.g. `Text Document (*.txt)`.
    pub fn description(&self) -> String {
        format!("{} ({})", self.label, self.pattern)
    }

    /// Whether a file name matches the pattern, ignoring case.
    ///
    /// A malformed pattern matches nothing.
    pub fn matches(&self, name: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::default()
        };
        Pattern::new(&self.pattern).is_ok_and(|pattern| pattern.matches_with(name, options))
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new("Text Document", "*.txt")
    }
}

/// Application tunables.
///
/// Twezopad reads no configuration file; these defaults are compiled in and
/// handed to [`crate::app::App`] so tests (and embedders) can vary them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Suffix of the window title.
    pub app_name: String,
    /// Title used while the session has no path.
    pub untitled_name: String,
    /// Default filter of the open / save-as picker.
    pub file_filter: FileFilter,
    /// Maximum number of undo steps kept by the text widget.
    pub undo_limit: usize,
    /// Spaces inserted by the Tab key.
    pub tab_width: usize,
    /// How long informational toasts stay visible.
    pub toast_duration: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "TwezopadX".to_string(),
            untitled_name: "Untitled".to_string(),
            file_filter: FileFilter::default(),
            undo_limit: 1_000,
            tab_width: 4,
            toast_duration: Duration::from_secs(4),
        }
    }
}

/// Location of the diagnostic log file.
///
/// Logs never go to the terminal because the UI owns it.
pub fn log_file_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(local) = std::env::var_os("LOCALAPPDATA") {
            return PathBuf::from(local).join("twezopad").join("twezopad.log");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Logs")
                .join("twezopad")
                .join("twezopad.log");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(state) = std::env::var_os("XDG_STATE_HOME") {
            return PathBuf::from(state).join("twezopad").join("twezopad.log");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("twezopad")
                .join("twezopad.log");
        }
    }

    std::env::temp_dir().join("twezopad.log")
}
