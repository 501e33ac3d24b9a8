use std::io::{Write, stdout};
use std::path::{Path, PathBuf};

use base64::Engine;

use crate::actions::Action;
use crate::app::{App, Message, Model, ToastLevel};
use crate::picker::{FilePicker, PickerMode, PickerOutcome};
use crate::session::SessionError;

impl App {
    pub(super) fn handle_message_side_effects(&self, model: &mut Model, msg: &Message) {
        match msg {
            Message::Action(Action::Open) => open_picker(model, PickerMode::Open),
            Message::Action(Action::Save) => save_document(model),
            Message::Action(Action::SaveAs) => open_picker(model, PickerMode::SaveAs),
            Message::Action(Action::Print) => {
                tracing::info!(title = %model.title(), "print requested");
                model.show_toast(ToastLevel::Info, "print document");
            }
            Message::Action(Action::Cut | Action::Copy) => self.mirror_clipboard(model),
            Message::PickerConfirm => confirm_picker(model),
            _ => {}
        }
    }

    fn mirror_clipboard(&self, model: &mut Model) {
        let pending = std::mem::take(&mut model.clipboard_pending);
        if !pending || !self.system_clipboard || model.clipboard.is_empty() {
            return;
        }
        if let Err(err) = copy_to_clipboard(&model.clipboard) {
            tracing::warn!(error = %err, "clipboard copy failed");
            model.show_toast(ToastLevel::Warning, format!("Copy failed: {err}"));
        }
    }
}

fn open_picker(model: &mut Model, mode: PickerMode) {
    let start_dir = model
        .session
        .path()
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(
            || std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            Path::to_path_buf,
        );
    let prefill = match mode {
        PickerMode::Open => String::new(),
        PickerMode::SaveAs => model
            .session
            .path()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default(),
    };

    let mut picker =
        FilePicker::new(mode, model.settings.file_filter.clone()).with_input(prefill);
    if let Err(err) = picker.load_directory(&start_dir) {
        tracing::debug!(dir = %start_dir.display(), error = %err, "picker listing failed");
        picker.set_error(err.to_string());
    }
    model.menu = None;
    model.picker = Some(picker);
}

fn confirm_picker(model: &mut Model) {
    let Some(picker) = model.picker.as_mut() else {
        return;
    };
    match picker.resolve() {
        PickerOutcome::Nothing => {}
        PickerOutcome::Navigate(dir) => {
            tracing::debug!(dir = %dir.display(), "picker navigate");
            if let Err(err) = picker.navigate(&dir) {
                picker.set_error(err.to_string());
            }
        }
        PickerOutcome::Chosen(path) => {
            let mode = picker.mode();
            model.picker = None;
            match mode {
                PickerMode::Open => open_document(model, &path),
                PickerMode::SaveAs => save_document_as(model, path),
            }
        }
    }
}

fn open_document(model: &mut Model, path: &Path) {
    match model.open_path(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "opened document");
        }
        Err(err) => report_io_error(model, &err),
    }
}

fn save_document(model: &mut Model) {
    let Some(path) = model.session.path().map(Path::to_path_buf) else {
        open_picker(model, PickerMode::SaveAs);
        return;
    };
    match model.write_to(&path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "saved document");
        }
        Err(err) => report_io_error(model, &err),
    }
}

fn save_document_as(model: &mut Model, path: PathBuf) {
    let shown = path.display().to_string();
    match model.save_as_path(path) {
        Ok(()) => {
            tracing::info!(path = %shown, "saved document as");
        }
        Err(err) => report_io_error(model, &err),
    }
}

fn report_io_error(model: &mut Model, err: &SessionError) {
    tracing::warn!(path = %err.path().display(), error = %err, "file operation failed");
    model.show_error(err.to_string());
}

fn copy_to_clipboard(text: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        if copy_to_pbcopy(text).is_ok() {
            return Ok(());
        }
    }
    copy_to_clipboard_osc52(text)
}

#[cfg(target_os = "macos")]
fn copy_to_pbcopy(text: &str) -> std::io::Result<()> {
    use std::process::{Command, Stdio};

    let mut child = Command::new("pbcopy").stdin(Stdio::piped()).spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other("pbcopy failed"))
    }
}

fn copy_to_clipboard_osc52(text: &str) -> std::io::Result<()> {
    let osc = osc52_sequence(text);
    let mut out = stdout();
    out.write_all(osc.as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}

#[cfg(test)]
mod tests {
    use super::osc52_sequence;

    #[test]
    fn test_osc52_sequence_encodes_text() {
        let seq = osc52_sequence("hi");
        assert_eq!(seq, "\x1b]52;c;aGk=\x07");
    }
}
