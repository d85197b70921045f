// File: ./src/system.rs
//! Platform capabilities the viewer delegates to: clipboard, opening links,
//! and printing.
use crate::context::AppContext;
use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

pub trait Platform {
    fn copy_text(&mut self, text: &str) -> Result<(), PlatformError>;
    fn open(&mut self, target: &str) -> Result<(), PlatformError>;
    /// Hands a complete HTML document to the platform's print path and
    /// returns where the document was written.
    fn print_document(&mut self, html: &str) -> Result<PathBuf, PlatformError>;
}

/// Real platform: `arboard` clipboard and the OS opener command.
pub struct SystemPlatform {
    ctx: Arc<dyn AppContext>,
    clipboard: Option<arboard::Clipboard>,
}

impl SystemPlatform {
    pub fn new(ctx: Arc<dyn AppContext>) -> Self {
        Self {
            ctx,
            clipboard: None,
        }
    }

    fn clipboard(&mut self) -> Result<&mut arboard::Clipboard, PlatformError> {
        let cb = match self.clipboard.take() {
            Some(cb) => cb,
            None => arboard::Clipboard::new()?,
        };
        Ok(self.clipboard.insert(cb))
    }
}

fn opener_command(target: &str) -> Command {
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", target]);
        cmd
    }
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(target);
        cmd
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(target);
        cmd
    }
}

impl Platform for SystemPlatform {
    fn copy_text(&mut self, text: &str) -> Result<(), PlatformError> {
        self.clipboard()?.set_text(text.to_string())?;
        Ok(())
    }

    fn open(&mut self, target: &str) -> Result<(), PlatformError> {
        log::debug!("Opening {}", target);
        let status = opener_command(target)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(PlatformError::Other(format!("opener exited with {}", status)))
        }
    }

    fn print_document(&mut self, html: &str) -> Result<PathBuf, PlatformError> {
        let dir = self
            .ctx
            .get_print_dir()
            .map_err(|e| PlatformError::Other(e.to_string()))?;
        let path = dir.join(format!("nfview-{}.html", uuid::Uuid::new_v4().simple()));
        std::fs::write(&path, html)?;
        log::info!("Print document written to {}", path.display());
        self.open(&path.to_string_lossy())?;
        Ok(path)
    }
}

/// Records every request instead of touching the system. Used by tests and
/// by headless runs.
#[derive(Debug, Default, Clone)]
pub struct RecordingPlatform {
    pub copied: Vec<String>,
    pub opened: Vec<String>,
    pub printed: Vec<String>,
    pub fail_clipboard: bool,
}

impl Platform for RecordingPlatform {
    fn copy_text(&mut self, text: &str) -> Result<(), PlatformError> {
        if self.fail_clipboard {
            return Err(PlatformError::Other("clipboard unavailable".to_string()));
        }
        self.copied.push(text.to_string());
        Ok(())
    }

    fn open(&mut self, target: &str) -> Result<(), PlatformError> {
        self.opened.push(target.to_string());
        Ok(())
    }

    fn print_document(&mut self, html: &str) -> Result<PathBuf, PlatformError> {
        self.printed.push(html.to_string());
        Ok(PathBuf::from(format!("print-{}.html", self.printed.len())))
    }
}
