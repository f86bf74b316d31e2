//! Capabilities the presentation layer provides to the core.
//!
//! The core never talks to a window system directly. A desktop shell, the
//! CLI, or a test double implements [`Host`] and is injected into [`crate::App`].

use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use tokio::sync::mpsc;

use pulsar_core::{EVENT_LOG_ERROR, EVENT_LOG_UPDATE, EVENT_SETTINGS_THEME};

use crate::output;

pub trait Host: Send + Sync {
    /// Ask the user for a directory. `None` when the user cancels.
    fn pick_directory(&self, title: &str) -> Option<PathBuf>;

    /// Push a named event with a string payload to the presentation layer.
    fn emit(&self, channel: &str, payload: &str);
}

/// Terminal host used by the `pulsar` binary.
#[derive(Debug, Default)]
pub struct ConsoleHost;

impl Host for ConsoleHost {
    fn pick_directory(&self, title: &str) -> Option<PathBuf> {
        if !std::io::stdin().is_terminal() {
            return None;
        }

        print!("{} ", output::brand_accent(format!("{title}:")).bold());
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line).ok()?;
        let trimmed = line.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }

    fn emit(&self, channel: &str, payload: &str) {
        match channel {
            EVENT_LOG_UPDATE => println!("{payload}"),
            EVENT_LOG_ERROR => output::error_stderr(payload),
            EVENT_SETTINGS_THEME => output::muted(&format!("theme changed to {payload}")),
            other => tracing::debug!(channel = other, payload, "Unhandled host event"),
        }
    }
}

/// An event as delivered to [`ChannelHost`] subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEvent {
    pub channel: String,
    pub payload: String,
}

/// Host that forwards events into a channel, for embedding and tests.
///
/// Directory picking always returns the preset answer.
#[derive(Debug)]
pub struct ChannelHost {
    tx: mpsc::UnboundedSender<HostEvent>,
    picked_directory: Option<PathBuf>,
}

impl ChannelHost {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<HostEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                picked_directory: None,
            },
            rx,
        )
    }

    pub fn with_picked_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.picked_directory = Some(dir.into());
        self
    }
}

impl Host for ChannelHost {
    fn pick_directory(&self, _title: &str) -> Option<PathBuf> {
        self.picked_directory.clone()
    }

    fn emit(&self, channel: &str, payload: &str) {
        let _ = self.tx.send(HostEvent {
            channel: channel.to_string(),
            payload: payload.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_host_forwards_events_in_order() {
        let (host, mut rx) = ChannelHost::new();
        host.emit(EVENT_LOG_UPDATE, "one");
        host.emit(EVENT_LOG_ERROR, "two");

        assert_eq!(
            rx.try_recv().unwrap(),
            HostEvent {
                channel: EVENT_LOG_UPDATE.to_string(),
                payload: "one".to_string()
            }
        );
        assert_eq!(rx.try_recv().unwrap().payload, "two");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn channel_host_returns_preset_directory() {
        let (host, _rx) = ChannelHost::new();
        assert!(host.pick_directory("Select Laravel Project").is_none());

        let host = host.with_picked_directory("/srv/shop");
        assert_eq!(
            host.pick_directory("Select Laravel Project"),
            Some(PathBuf::from("/srv/shop"))
        );
    }
}
