/*!
 * Clipboard support for codemerge
 *
 * The merged text is piped into whichever clipboard command the host
 * provides. Failures are reported to the caller, which treats them as
 * warnings since stdout has already received the document.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// A write-only destination for text
pub trait Clipboard {
    /// Copy text to the clipboard
    fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}

/// Clipboard mechanisms backed by an external command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardCommand {
    /// tmux paste buffer
    Tmux,
    /// X11 clipboard with xclip
    Xclip,
    /// X11 clipboard with xsel
    Xsel,
    /// Wayland clipboard
    Wayland,
    /// macOS clipboard
    MacOS,
    /// Windows clipboard (native or via WSL)
    Windows,
    /// Termux clipboard
    Termux,
}

impl ClipboardCommand {
    /// Program name and arguments that read the text from stdin
    pub fn invocation(&self) -> (&'static str, Vec<&'static str>) {
        match self {
            Self::Tmux => ("tmux", vec!["load-buffer", "-w", "-"]),
            Self::Xclip => ("xclip", vec!["-selection", "clipboard", "-in"]),
            Self::Xsel => ("xsel", vec!["-b", "-i"]),
            Self::Wayland => ("wl-copy", vec![]),
            Self::MacOS => ("pbcopy", vec![]),
            Self::Windows => ("clip.exe", vec![]),
            Self::Termux => ("termux-clipboard-set", vec![]),
        }
    }
}

impl Clipboard for ClipboardCommand {
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let (program, args) = self.invocation();
        pipe_to_command(program, &args, text)
    }
}

/// Copy text to the first clipboard mechanism available on this system
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let command = available_commands()
        .into_iter()
        .next()
        .ok_or(ClipboardError::NoClipboardFound)?;

    debug!(?command, "copying output to clipboard");
    command.copy_to_clipboard(text)
}

/// Check if a command exists on the PATH
pub fn command_exists(command: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(command).is_file()))
        .unwrap_or(false)
}

/// Clipboard commands to try, in order of preference
pub fn available_commands() -> Vec<ClipboardCommand> {
    let mut commands = Vec::with_capacity(3);

    if env::var_os("TMUX").is_some() && command_exists("tmux") {
        commands.push(ClipboardCommand::Tmux);
    }

    let candidates: &[ClipboardCommand] = if cfg!(target_os = "macos") {
        &[ClipboardCommand::MacOS]
    } else if cfg!(target_os = "windows") || env::var_os("WSL_DISTRO_NAME").is_some() {
        &[ClipboardCommand::Windows]
    } else if cfg!(target_os = "android") {
        &[ClipboardCommand::Termux]
    } else {
        &[
            ClipboardCommand::Wayland,
            ClipboardCommand::Xsel,
            ClipboardCommand::Xclip,
        ]
    };

    commands.extend(
        candidates
            .iter()
            .copied()
            .filter(|c| command_exists(c.invocation().0)),
    );

    commands
}

/// Spawn a command, write `text` to its stdin and wait for it
fn pipe_to_command(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(|e| ClipboardError::CommandFailed(format!("failed to spawn {}: {}", program, e)))?;

    // dropping stdin closes the pipe so the command sees EOF
    let mut stdin = child.stdin.take().ok_or_else(|| {
        ClipboardError::CommandFailed(format!("failed to open stdin for {}", program))
    })?;
    stdin.write_all(text.as_bytes())?;
    drop(stdin);

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with status: {}",
            program, status
        )))
    }
}
