//! Child process plumbing for tinker invocations.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use super::TinkerError;
use super::transcript::is_streamed_line;

const READ_CHUNK_BYTES: usize = 8 * 1024;

pub(crate) enum Completion<T> {
    Finished(T),
    TimedOut,
}

/// Start `php artisan tinker` in the project directory with all three
/// standard streams piped.
pub(crate) fn spawn_tinker(php: &Path, project_dir: &Path) -> Result<(Child, ChildStdin), TinkerError> {
    let mut child = Command::new(php)
        .args(["artisan", "tinker"])
        .current_dir(project_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(TinkerError::Spawn)?;

    let stdin = child.stdin.take().ok_or(TinkerError::StdinUnavailable)?;
    Ok((child, stdin))
}

/// Write the snippet and a trailing newline, then close stdin so the REPL
/// sees end of input. Runs on its own task so a child that never reads its
/// input cannot stall output collection.
pub(crate) fn feed_input(mut stdin: ChildStdin, code: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut payload = code.into_bytes();
        payload.push(b'\n');
        if let Err(e) = stdin.write_all(&payload).await {
            tracing::debug!(error = %e, "tinker closed stdin before the snippet was written");
            return;
        }
        let _ = stdin.shutdown().await;
    })
}

async fn pump_chunks<R>(mut reader: R, tx: mpsc::Sender<Vec<u8>>)
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; READ_CHUNK_BYTES];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => {
                if tx.send(buf[..n].to_vec()).await.is_err() {
                    return;
                }
            }
        }
    }
}

async fn pump_lines<R>(reader: R, tx: mpsc::Sender<String>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf)
                    .trim_end_matches(['\r', '\n'])
                    .to_string();
                if tx.send(line).await.is_err() {
                    return;
                }
            }
        }
    }
}

async fn terminate(child: &mut Child) {
    if let Err(e) = child.kill().await {
        tracing::warn!(error = %e, "Failed to kill tinker after deadline");
    }
}

/// Collect stdout and stderr into one buffer, in arrival order, until the
/// child exits or the deadline passes. On deadline the child is killed and
/// reaped before returning.
pub(crate) async fn collect_combined(mut child: Child, deadline: Duration) -> Completion<Vec<u8>> {
    let (tx, mut rx) = mpsc::channel::<Vec<u8>>(64);
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(pump_chunks(stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(pump_chunks(stderr, tx.clone()));
    }
    drop(tx);

    let collected = timeout(deadline, async {
        let mut transcript = Vec::new();
        while let Some(chunk) = rx.recv().await {
            transcript.extend_from_slice(&chunk);
        }
        if let Err(e) = child.wait().await {
            tracing::debug!(error = %e, "Failed to reap tinker");
        }
        transcript
    })
    .await;

    match collected {
        Ok(transcript) => Completion::Finished(transcript),
        Err(_) => {
            terminate(&mut child).await;
            Completion::TimedOut
        }
    }
}

/// Forward output lines as they arrive, skipping raw prompt lines. Returns
/// everything forwarded, newline-joined.
pub(crate) async fn stream_lines(
    mut child: Child,
    deadline: Duration,
    forward: mpsc::Sender<String>,
) -> Completion<String> {
    let (tx, mut rx) = mpsc::channel::<String>(256);
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(pump_lines(stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(pump_lines(stderr, tx.clone()));
    }
    drop(tx);

    let streamed = timeout(deadline, async {
        let mut collected = String::new();
        while let Some(line) = rx.recv().await {
            if !is_streamed_line(&line) {
                continue;
            }
            collected.push_str(&line);
            collected.push('\n');
            // The receiver may hang up early; keep draining so the child can exit.
            let _ = forward.send(line).await;
        }
        if let Err(e) = child.wait().await {
            tracing::debug!(error = %e, "Failed to reap tinker");
        }
        collected
    })
    .await;

    match streamed {
        Ok(collected) => Completion::Finished(collected),
        Err(_) => {
            terminate(&mut child).await;
            Completion::TimedOut
        }
    }
}
