//! Append-only transcript of model exchanges, for observability only.
//!
//! Logged payloads are shortened to their head and tail; the model always
//! receives the full text.

use chrono::Local;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::Message;

/// Characters kept from each end of a long logged payload
pub const LOG_EXCERPT_CHARS: usize = 500;

#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    path: Option<PathBuf>,
}

impl ChatLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A log that records nothing
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append one exchange. Failures are logged and swallowed.
    pub async fn record(&self, model: &str, messages: &[Message], reply: &str) {
        let Some(path) = &self.path else {
            return;
        };
        let entry = format_entry(model, messages, reply);
        if let Err(e) = append(path, &entry).await {
            log::warn!("[CHAT] Failed to append to chat log {}: {}", path.display(), e);
        }
    }
}

async fn append(path: &Path, entry: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path).await?;
    file.write_all(entry.as_bytes()).await?;
    file.flush().await
}

fn format_entry(model: &str, messages: &[Message], reply: &str) -> String {
    let mut entry = format!(
        "[{}] model={}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        model
    );
    for message in messages {
        entry.push_str(&format!(
            "{}: {}\n",
            message.role,
            truncate_for_log(&message.content, LOG_EXCERPT_CHARS)
        ));
    }
    entry.push_str(&format!(
        "reply: {}\n\n",
        truncate_for_log(reply, LOG_EXCERPT_CHARS)
    ));
    entry
}

/// Keep the first and last `keep` characters of `text` when it is longer
/// than `2 * keep`.
pub fn truncate_for_log(text: &str, keep: usize) -> Cow<'_, str> {
    let total = text.chars().count();
    if total <= keep * 2 {
        return Cow::Borrowed(text);
    }

    let head_end = text
        .char_indices()
        .nth(keep)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let tail_start = text
        .char_indices()
        .nth(total - keep)
        .map(|(i, _)| i)
        .unwrap_or(text.len());

    Cow::Owned(format!(
        "{}\n... [{} characters omitted] ...\n{}",
        &text[..head_end],
        total - keep * 2,
        &text[tail_start..]
    ))
}
