use thiserror::Error;

#[derive(Debug, Error)]
pub enum CourierError {
    #[error("no stored session token; log in before subscribing")]
    MissingToken,

    #[error("the {service} service has no endpoint configured")]
    ServiceDisabled { service: &'static str },

    #[error("invalid header value for {name}")]
    InvalidHeader { name: String },

    #[error("http client error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("connection failed with status {}: {message}", fmt_status(*status))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("malformed push message: {source}")]
    MalformedMessage {
        payload: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CourierError {
    /// HTTP status attached to a connection-level failure, when the server
    /// got far enough to send one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

fn fmt_status(status: Option<u16>) -> String {
    match status {
        Some(status) => status.to_string(),
        None => "n/a".to_owned(),
    }
}
