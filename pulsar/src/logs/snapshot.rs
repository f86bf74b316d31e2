use std::collections::VecDeque;
use std::path::Path;

use tokio::io::{AsyncBufReadExt, BufReader};

/// Read at most the last `max_lines` lines of `path`, creating the file if it
/// does not exist yet.
///
/// The file is streamed front to back keeping only a sliding window, so memory
/// stays bounded by `max_lines` regardless of file size.
pub async fn read_log_tail(path: &Path, max_lines: usize) -> std::io::Result<Vec<String>> {
    let file = tokio::fs::OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)
        .await?;

    let mut reader = BufReader::new(file);
    let mut window: VecDeque<String> = VecDeque::with_capacity(max_lines.min(1024));
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        if max_lines == 0 {
            continue;
        }
        if window.len() == max_lines {
            window.pop_front();
        }
        window.push_back(decode_line(&buf));
    }

    Ok(window.into())
}

pub(crate) fn decode_line(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_end_matches(['\r', '\n'])
        .to_string()
}
