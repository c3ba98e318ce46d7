//! Push-stream client primitives for the Foghorn platform.
//!
//! This crate owns endpoint resolution, server-sent stream sessions, message
//! decoding and filtering, output deduplication, and the one-shot login
//! handshake layered on the same transport. It intentionally contains no
//! command routing and no persisted-config code.
//!
//! Connection failures and malformed messages travel on separate channels: a
//! session surfaces transport errors exactly once through its error handler,
//! while per-message decode failures are logged and dropped without closing
//! the stream.

pub mod auth;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod filter;
pub mod headers;
pub mod message;
pub mod session;
pub mod sink;
pub mod sse;
pub mod token;
pub mod transport;

pub use client::{Courier, Credentials};
pub use endpoint::{Endpoints, Service, Tier};
pub use error::CourierError;
pub use filter::SubjectFilter;
pub use message::{parse_message, Body, Message};
pub use session::{SessionHandle, StreamError, StreamSession};
pub use sink::{DedupSink, LogSink};
pub use sse::SseFrameParser;
pub use token::login_from_token;
pub use transport::{EventStream, HttpTransport, OpenRequest, Transport, TransportEvent};
