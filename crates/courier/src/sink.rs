use crate::message::Message;

/// Leveled logging collaborator the dedup sink writes through.
pub trait LogSink {
    fn log(&mut self, level: &str, line: &str);
}

/// Wraps a [`LogSink`] and suppresses immediately-repeated identical lines.
///
/// Push channels may redeliver or mirror the same status line from several
/// producers; collapsing consecutive duplicates keeps the first occurrence
/// and drops the echo. The remembered line is private to one sink instance —
/// two concurrent subscriptions each get independent dedup memory.
pub struct DedupSink<S: LogSink> {
    inner: S,
    local_id: String,
    previous: String,
}

impl<S: LogSink> DedupSink<S> {
    pub fn new(inner: S, local_id: impl Into<String>) -> Self {
        Self {
            inner,
            local_id: local_id.into(),
            previous: String::new(),
        }
    }

    /// Format and emit one filtered-in message.
    ///
    /// Messages from senders other than the local identity carry a
    /// ` [sender]` suffix, which also makes otherwise-identical lines from
    /// different producers distinct for dedup purposes.
    pub fn emit(&mut self, message: &Message) {
        let suffix = if self.is_local(&message.sender) {
            String::new()
        } else {
            format!(" [{}]", message.sender)
        };
        let line = format!("{}{}", message.body.display_text(), suffix);

        if line == self.previous {
            return;
        }
        self.inner.log(&message.level, &line);
        self.previous = line;
    }

    fn is_local(&self, sender: &str) -> bool {
        // Sender ids carry version suffixes (`vendor.app@1.2.3`); the local
        // id is the unversioned prefix.
        !self.local_id.is_empty() && sender.starts_with(&self.local_id)
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}
