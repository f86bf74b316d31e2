use std::sync::Arc;
use std::time::Duration;

use pulsar_core::{EVENT_LOG_ERROR, EVENT_LOG_UPDATE};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use super::snapshot::decode_line;
use crate::host::Host;

/// Follow `file` from its current position, emitting every complete line as
/// `log:update` until `stop_rx` flips to true or a read fails.
///
/// A partially written line is held back until its newline arrives.
pub(crate) async fn follow_log(
    file: File,
    host: Arc<dyn Host>,
    mut stop_rx: watch::Receiver<bool>,
    poll_interval: Duration,
) {
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    loop {
        if *stop_rx.borrow() {
            tracing::debug!("Log follower stopped");
            return;
        }

        match reader.read_until(b'\n', &mut buf).await {
            Ok(_) if buf.ends_with(b"\n") => {
                let line = decode_line(&buf);
                buf.clear();
                host.emit(EVENT_LOG_UPDATE, &line);
            }
            Ok(_) => {
                tokio::select! {
                    changed = stop_rx.changed() => {
                        // Sender dropped means the session was discarded.
                        if changed.is_err() || *stop_rx.borrow() {
                            tracing::debug!("Log follower stopped");
                            return;
                        }
                    }
                    _ = tokio::time::sleep(poll_interval) => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Log follower read failed");
                host.emit(EVENT_LOG_ERROR, &format!("Error reading log file: {e}"));
                return;
            }
        }
    }
}
