//! Contract with the interactive dialog collaborator.
//!
//! A request is a titled list of (tag, label) pairs shown either as a
//! single-choice menu or a checklist. The chosen tags come back from
//! dialog(1) over a transient file channel that is deleted on every exit
//! path. Tags are transport-quoted by dialog and must be unquoted before
//! they are interpreted.

use std::fs::File;
use std::io::Read;
use std::process::Command;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("the 'dialog' program is not installed")]
    DialogUnavailable,
}

/// How the item list is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    /// One choice, rendered as a menu
    Single,
    /// Any number of choices, rendered as a checklist
    Multi,
}

/// One selectable row.
#[derive(Debug, Clone)]
pub struct DialogItem {
    pub tag: String,
    pub label: String,
    /// Pre-checked state, only meaningful in `Multi` mode.
    pub checked: bool,
}

impl DialogItem {
    pub fn new(tag: &str, label: &str) -> Self {
        Self {
            tag: tag.to_string(),
            label: label.to_string(),
            checked: false,
        }
    }

    pub fn checked(tag: &str, label: &str, checked: bool) -> Self {
        Self {
            tag: tag.to_string(),
            label: label.to_string(),
            checked,
        }
    }
}

/// Row/column/list-height hints for the dialog box.
#[derive(Debug, Clone, Copy)]
pub struct DialogGeometry {
    pub height: u16,
    pub width: u16,
    pub list_height: u16,
}

impl Default for DialogGeometry {
    fn default() -> Self {
        Self {
            height: 20,
            width: 64,
            list_height: 12,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DialogRequest {
    pub title: String,
    pub text: String,
    pub geometry: DialogGeometry,
    pub items: Vec<DialogItem>,
    pub mode: DialogMode,
}

/// What came back from the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    Chosen(Vec<String>),
    Cancelled,
}

/// Shows dialogs and returns the chosen tags.
pub trait DialogProvider {
    fn show(&mut self, request: &DialogRequest) -> Result<DialogResult>;
}

/// Strip transport quoting from a tag before interpreting it.
pub fn unquote(tag: &str) -> String {
    tag.chars().filter(|c| *c != '"' && *c != '\'').collect()
}

/// Transient file the dialog child writes the user's choice to.
///
/// Created immediately before the dialog is shown, read exactly once
/// after it returns, and deleted unconditionally: `read_once` consumes
/// the channel, and dropping an unread channel removes the file as well.
pub(crate) struct ChoiceChannel {
    file: NamedTempFile,
}

impl ChoiceChannel {
    pub(crate) fn create() -> Result<Self> {
        let file = NamedTempFile::new().context("failed to create dialog choice file")?;
        Ok(Self { file })
    }

    pub(crate) fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    /// Reopen the file for the dialog child's stderr.
    pub(crate) fn writer(&self) -> Result<File> {
        self.file
            .reopen()
            .context("failed to open dialog choice file for writing")
    }

    /// Read the choice and delete the channel.
    pub(crate) fn read_once(self) -> Result<String> {
        let mut raw = String::new();
        self.file
            .reopen()
            .context("failed to reopen dialog choice file")?
            .read_to_string(&mut raw)
            .context("failed to read dialog choice file")?;
        self.file
            .close()
            .context("failed to remove dialog choice file")?;
        Ok(raw)
    }
}

/// [`DialogProvider`] backed by dialog(1).
pub struct ConsoleDialog;

impl ConsoleDialog {
    /// Probe for dialog(1). Fails before any menu is entered when the
    /// program is missing.
    pub fn new() -> Result<Self, MenuError> {
        which::which("dialog").map_err(|_| MenuError::DialogUnavailable)?;
        Ok(Self)
    }
}

impl DialogProvider for ConsoleDialog {
    fn show(&mut self, request: &DialogRequest) -> Result<DialogResult> {
        let channel = ChoiceChannel::create()?;

        let mut cmd = Command::new("dialog");
        cmd.arg("--title").arg(&request.title);
        match request.mode {
            DialogMode::Single => cmd.arg("--menu"),
            DialogMode::Multi => cmd.arg("--checklist"),
        };
        cmd.arg(&request.text)
            .arg(request.geometry.height.to_string())
            .arg(request.geometry.width.to_string())
            .arg(request.geometry.list_height.to_string());
        for item in &request.items {
            cmd.arg(&item.tag).arg(&item.label);
            if request.mode == DialogMode::Multi {
                cmd.arg(if item.checked { "on" } else { "off" });
            }
        }

        // dialog draws on stdout and reports the choice on stderr; an
        // early error here still deletes the channel on drop.
        let status = cmd
            .stderr(channel.writer()?)
            .status()
            .context("failed to launch dialog")?;
        let raw = channel.read_once()?;

        if !status.success() {
            // Exit code 1 is Cancel, 255 is Esc
            return Ok(DialogResult::Cancelled);
        }

        let tags = match request.mode {
            DialogMode::Single => {
                let tag = unquote(raw.trim());
                if tag.is_empty() { Vec::new() } else { vec![tag] }
            }
            DialogMode::Multi => raw.split_whitespace().map(unquote).collect(),
        };
        Ok(DialogResult::Chosen(tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_unquote_strips_transport_quoting() {
        assert_eq!(unquote("\"core\""), "core");
        assert_eq!(unquote("'vim'"), "vim");
        assert_eq!(unquote("plain"), "plain");
    }

    #[test]
    fn test_choice_channel_is_deleted_after_read() {
        let channel = ChoiceChannel::create().unwrap();
        let path = channel.path().to_path_buf();
        std::fs::write(&path, "core\n").unwrap();

        let raw = channel.read_once().unwrap();
        assert_eq!(raw, "core\n");
        assert!(!path.exists());
    }

    #[test]
    fn test_choice_channel_is_deleted_when_dropped_unread() {
        let channel = ChoiceChannel::create().unwrap();
        let path = channel.path().to_path_buf();
        assert!(path.exists());

        drop(channel);
        assert!(!path.exists());
    }

    #[test]
    #[serial]
    fn test_missing_dialog_program_is_detected() {
        let empty = tempfile::tempdir().unwrap();
        let old_path = std::env::var_os("PATH");
        unsafe { std::env::set_var("PATH", empty.path()) };

        let result = ConsoleDialog::new();

        match old_path {
            Some(path) => unsafe { std::env::set_var("PATH", path) },
            None => unsafe { std::env::remove_var("PATH") },
        }
        assert!(matches!(result, Err(MenuError::DialogUnavailable)));
    }
}
