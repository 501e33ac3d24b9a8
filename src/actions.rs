//! The action table shared by menus, toolbar, status bar and key bindings.

/// Every user-invokable command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Open,
    Save,
    SaveAs,
    Print,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
    Quit,
}

impl Action {
    /// Label used in menus.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open File",
            Self::Save => "Save File",
            Self::SaveAs => "Save File As",
            Self::Print => "Print File",
            Self::Undo => "Undo",
            Self::Redo => "Redo",
            Self::Cut => "Cut",
            Self::Copy => "Copy",
            Self::Paste => "Paste",
            Self::SelectAll => "Select All",
            Self::Quit => "Quit",
        }
    }

    /// Short label used on toolbar buttons.
    pub const fn button_label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Save => "Save",
            Self::SaveAs => "Save As",
            Self::Print => "Print",
            other => other.label(),
        }
    }

    /// Text shown in the status bar while the action is highlighted.
    pub const fn status_tip(self) -> &'static str {
        match self {
            Self::Open => "Open file",
            Self::Save => "Save file",
            Self::SaveAs => "Save file as",
            Self::Print => "Print file",
            Self::Undo => "Undo",
            Self::Redo => "Redo",
            Self::Cut => "Cut selection",
            Self::Copy => "Copy selection",
            Self::Paste => "Paste",
            Self::SelectAll => "Select all text",
            Self::Quit => "Quit TwezopadX",
        }
    }

    /// Human-readable key binding.
    pub const fn shortcut(self) -> &'static str {
        match self {
            Self::Open => "Ctrl+O",
            Self::Save => "Ctrl+S",
            Self::SaveAs => "Ctrl+Shift+S",
            Self::Print => "Ctrl+P",
            Self::Undo => "Ctrl+Z",
            Self::Redo => "Ctrl+Y",
            Self::Cut => "Ctrl+X",
            Self::Copy => "Ctrl+C",
            Self::Paste => "Ctrl+V",
            Self::SelectAll => "Ctrl+A",
            Self::Quit => "Ctrl+Q",
        }
    }
}

/// An entry of a drop-down menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Action(Action),
    Separator,
}

impl MenuItem {
    pub const fn action(self) -> Option<Action> {
        match self {
            Self::Action(action) => Some(action),
            Self::Separator => None,
        }
    }
}

const FILE_ITEMS: &[MenuItem] = &[
    MenuItem::Action(Action::Open),
    MenuItem::Action(Action::Save),
    MenuItem::Action(Action::SaveAs),
    MenuItem::Action(Action::Print),
    MenuItem::Separator,
    MenuItem::Action(Action::Quit),
];

const EDIT_ITEMS: &[MenuItem] = &[
    MenuItem::Action(Action::Undo),
    MenuItem::Action(Action::Redo),
    MenuItem::Separator,
    MenuItem::Action(Action::Cut),
    MenuItem::Action(Action::Copy),
    MenuItem::Action(Action::Paste),
    MenuItem::Action(Action::SelectAll),
];

/// Top-level menus of the menu bar, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    File,
    Edit,
}

impl Menu {
    pub const ALL: [Self; 2] = [Self::File, Self::Edit];

    pub const fn title(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Edit => "Edit",
        }
    }

    /// Letter that opens the menu together with Alt.
    pub const fn mnemonic(self) -> char {
        match self {
            Self::File => 'f',
            Self::Edit => 'e',
        }
    }

    pub const fn items(self) -> &'static [MenuItem] {
        match self {
            Self::File => FILE_ITEMS,
            Self::Edit => EDIT_ITEMS,
        }
    }

    /// The menu to the right, wrapping around.
    pub const fn next(self) -> Self {
        match self {
            Self::File => Self::Edit,
            Self::Edit => Self::File,
        }
    }

    /// The menu to the left, wrapping around.
    pub const fn prev(self) -> Self {
        // Only two menus, so left and right coincide.
        self.next()
    }

    /// Index of the next selectable item after `from`, wrapping and
    /// skipping separators.
    pub fn next_item(self, from: usize) -> usize {
        self.step_item(from, true)
    }

    /// Index of the previous selectable item before `from`.
    pub fn prev_item(self, from: usize) -> usize {
        self.step_item(from, false)
    }

    fn step_item(self, from: usize, forward: bool) -> usize {
        let items = self.items();
        let len = items.len();
        let mut idx = from % len;
        for _ in 0..len {
            idx = if forward {
                (idx + 1) % len
            } else {
                (idx + len - 1) % len
            };
            if items[idx].action().is_some() {
                return idx;
            }
        }
        from
    }
}

/// A labelled cluster of toolbar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarGroup {
    pub name: &'static str,
    pub actions: &'static [Action],
}

/// Toolbar contents, left to right.
pub const TOOLBAR: [ToolbarGroup; 2] = [
    ToolbarGroup {
        name: "File",
        actions: &[Action::Open, Action::Save, Action::SaveAs, Action::Print],
    },
    ToolbarGroup {
        name: "Edit",
        actions: &[Action::Undo, Action::Redo],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_menu_order() {
        let actions: Vec<_> = Menu::File
            .items()
            .iter()
            .filter_map(|item| item.action())
            .collect();
        assert_eq!(
            actions,
            vec![
                Action::Open,
                Action::Save,
                Action::SaveAs,
                Action::Print,
                Action::Quit
            ]
        );
    }

    #[test]
    fn test_status_tips_match_file_actions() {
        assert_eq!(Action::Open.status_tip(), "Open file");
        assert_eq!(Action::Save.status_tip(), "Save file");
        assert_eq!(Action::SaveAs.status_tip(), "Save file as");
        assert_eq!(Action::Print.status_tip(), "Print file");
    }

    #[test]
    fn test_next_item_skips_separator() {
        // Print (3) -> separator (4) -> Quit (5)
        assert_eq!(Menu::File.next_item(3), 5);
        assert_eq!(Menu::File.prev_item(5), 3);
    }

    #[test]
    fn test_next_item_wraps() {
        assert_eq!(Menu::File.next_item(5), 0);
        assert_eq!(Menu::Edit.prev_item(0), 6);
    }

    #[test]
    fn test_menu_cycling() {
        assert_eq!(Menu::File.next(), Menu::Edit);
        assert_eq!(Menu::Edit.next(), Menu::File);
        assert_eq!(Menu::File.prev(), Menu::Edit);
    }

    #[test]
    fn test_toolbar_groups() {
        assert_eq!(TOOLBAR[0].name, "File");
        assert_eq!(TOOLBAR[0].actions.len(), 4);
        assert_eq!(TOOLBAR[1].actions, &[Action::Undo, Action::Redo]);
    }

    #[test]
    fn test_button_labels_are_short() {
        assert_eq!(Action::SaveAs.button_label(), "Save As");
        assert_eq!(Action::Undo.button_label(), "Undo");
    }
}
