//! Platform services the app delegates to: mail, clipboard, notices

use base64::{engine::general_purpose::STANDARD, Engine};
use std::io::{self, Write};

/// What the host environment provides to the app
pub trait Platform {
    /// Open a URL with the platform handler (a `mailto:` link opens the composer)
    fn open_url(&mut self, url: &str) -> io::Result<()>;

    /// Put text on the system clipboard
    fn copy_to_clipboard(&mut self, text: &str) -> io::Result<()>;

    /// Show a blocking notice
    fn notify(&mut self, message: &str);
}

/// Opens a URL with the system handler
pub type Opener = fn(&str) -> io::Result<()>;

fn system_open(url: &str) -> io::Result<()> {
    open::that(url)
}

/// Platform for a terminal session.
///
/// URLs go to the system handler (the desktop mail client for `mailto:`)
/// and are printed instead when no handler is available. The clipboard is
/// set with the OSC 52 escape sequence, which also works over SSH. Notices
/// go to stderr.
pub struct TerminalPlatform<W: Write = io::Stdout> {
    out: W,
    opener: Opener,
}

impl TerminalPlatform {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalPlatform<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            opener: system_open,
        }
    }

    /// Replace the system URL handler
    pub fn with_opener(mut self, opener: Opener) -> Self {
        self.opener = opener;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Platform for TerminalPlatform<W> {
    fn open_url(&mut self, url: &str) -> io::Result<()> {
        match (self.opener)(url) {
            Ok(()) => {
                tracing::info!("Opened {}", url.split(['?', '#']).next().unwrap_or(url));
                Ok(())
            }
            Err(e) => {
                tracing::debug!("No URL handler available: {}", e);
                writeln!(self.out, "Open to contact the owner: {}", url)?;
                self.out.flush()
            }
        }
    }

    fn copy_to_clipboard(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "\x1b]52;c;{}\x07", STANDARD.encode(text))?;
        self.out.flush()
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Something the app asked the platform to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformAction {
    OpenUrl(String),
    Copy(String),
    Notice(String),
}

/// Records every request instead of performing it (for testing)
#[derive(Debug, Default)]
pub struct RecordingPlatform {
    pub actions: Vec<PlatformAction>,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                PlatformAction::Notice(n) => Some(n.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Platform for RecordingPlatform {
    fn open_url(&mut self, url: &str) -> io::Result<()> {
        self.actions.push(PlatformAction::OpenUrl(url.to_string()));
        Ok(())
    }

    fn copy_to_clipboard(&mut self, text: &str) -> io::Result<()> {
        self.actions.push(PlatformAction::Copy(text.to_string()));
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        self.actions.push(PlatformAction::Notice(message.to_string()));
    }
}
