//! Terminal clipboard capabilities
//!
//! The platform clipboard is reached through the usual command-line tool
//! for the OS. When that fails, the fallback surface hands the text to the
//! terminal emulator with an OSC 52 escape sequence.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use fingerpay_core::{CarrierId, ClipboardPlatform, FallbackSurface};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::{self, IsTerminal, Write};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;
use zeroize::Zeroizing;

/// Clipboard tool and its arguments for this platform
fn clipboard_command() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("pbcopy", &[])
    } else if cfg!(target_os = "windows") {
        ("clip", &[])
    } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        ("wl-copy", &[])
    } else {
        ("xclip", &["-selection", "clipboard"])
    }
}

/// Platform clipboard backed by the OS clipboard tool
#[derive(Debug, Default)]
pub struct CommandClipboard;

#[async_trait]
impl ClipboardPlatform for CommandClipboard {
    async fn write_text(&self, text: &str) -> io::Result<()> {
        let (program, args) = clipboard_command();
        debug!("Writing clipboard with {}", program);

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let status = child.wait().await?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!("{} exited with {}", program, status)))
        }
    }
}

/// OSC 52 "set clipboard" sequence for `text`
pub fn osc52_sequence(text: &str) -> Zeroizing<String> {
    Zeroizing::new(format!("\x1b]52;c;{}\x07", STANDARD.encode(text)))
}

#[derive(Default)]
struct SurfaceState {
    carriers: HashMap<CarrierId, Zeroizing<String>>,
    selected: Option<CarrierId>,
}

/// Fallback surface writing OSC 52 to the controlling terminal
#[derive(Default)]
pub struct Osc52Surface {
    state: Mutex<SurfaceState>,
    next_id: AtomicU64,
}

impl Osc52Surface {
    /// Create surface
    pub fn new() -> Self {
        Self::default()
    }
}

impl FallbackSurface for Osc52Surface {
    fn insert_carrier(&self, text: &str) -> CarrierId {
        let id = CarrierId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.state
            .lock()
            .carriers
            .insert(id, Zeroizing::new(text.to_string()));
        id
    }

    fn select(&self, carrier: CarrierId) {
        self.state.lock().selected = Some(carrier);
    }

    fn exec_copy(&self) -> bool {
        // Without a terminal the sequence would end up in a file or pipe.
        let stderr = io::stderr();
        if !stderr.is_terminal() {
            return false;
        }

        let state = self.state.lock();
        let Some(text) = state.selected.and_then(|id| state.carriers.get(&id)) else {
            return false;
        };

        let mut handle = stderr.lock();
        handle
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|()| handle.flush())
            .is_ok()
    }

    fn remove_carrier(&self, carrier: CarrierId) {
        let mut state = self.state.lock();
        state.carriers.remove(&carrier);
        if state.selected == Some(carrier) {
            state.selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fingerpay_core::Carrier;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("1234").as_str(), "\x1b]52;c;MTIzNA==\x07");
    }

    #[test]
    fn test_carrier_removed_after_copy() {
        let surface = Osc52Surface::new();
        {
            let carrier = Carrier::insert(&surface, "4111111111111111");
            let _ = carrier.select_and_copy();
            assert_eq!(surface.state.lock().carriers.len(), 1);
        }
        let state = surface.state.lock();
        assert!(state.carriers.is_empty());
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_copy_without_selection_fails() {
        let surface = Osc52Surface::new();
        surface.insert_carrier("4111111111111111");
        assert!(!surface.exec_copy());
    }
}
