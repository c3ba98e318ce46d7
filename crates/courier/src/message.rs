use serde::Deserialize;

use crate::error::CourierError;

/// One push message as delivered on the wire. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    /// Identifier of the producing process/module.
    pub sender: String,
    /// Classification key: a dotted `vendor.name` app prefix, or a leading
    /// `-` for routing/infrastructure messages.
    pub subject: String,
    /// Severity label, normalized through the alias table at parse time.
    pub level: String,
    pub body: Body,
}

/// Message payload: free text or a symbolic code, at most one meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl Body {
    /// Display form: `message` with trailing whitespace stripped, falling
    /// back to `code`, falling back to the empty string.
    pub fn display_text(&self) -> String {
        let text = match self.message.as_deref() {
            Some(message) if !message.is_empty() => message,
            _ => self.code.as_deref().unwrap_or(""),
        };
        text.trim_end().to_owned()
    }
}

const LEVEL_ALIASES: &[(&str, &str)] = &[("warning", "warn")];

fn normalize_level(level: &str) -> &str {
    LEVEL_ALIASES
        .iter()
        .find(|(raw, _)| *raw == level)
        .map_or(level, |(_, canonical)| canonical)
}

/// Decode a raw push payload. Invalid JSON or a payload missing the required
/// fields is a [`CourierError::MalformedMessage`]; the caller decides whether
/// that is fatal (it never is for a running session).
pub fn parse_message(raw: &str) -> Result<Message, CourierError> {
    let mut message: Message =
        serde_json::from_str(raw).map_err(|source| CourierError::MalformedMessage {
            payload: raw.to_owned(),
            source,
        })?;
    message.level = normalize_level(&message.level).to_owned();
    Ok(message)
}
