use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;

use crate::message::{parse_message, Message};
use crate::transport::{EventStream, OpenRequest, Transport, TransportEvent};

/// Close signal shared between a running session and its handles.
type CloseSignal = Arc<AtomicBool>;

const CLOSE_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Connection-level failure surfaced to a session's error handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamError {
    pub status: Option<u16>,
    pub message: String,
}

/// One push subscription: owns a single transport connection from open to
/// close. A closed session is never reused; a new subscription means a new
/// session.
pub struct StreamSession {
    name: String,
    events: EventStream,
    closed: CloseSignal,
}

impl std::fmt::Debug for StreamSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamSession")
            .field("name", &self.name)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

/// Detached closer for a session. `close` is idempotent and safe to call
/// from any thread, any number of times; it stops further callbacks and
/// lets the run loop return so held resources drop.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    closed: CloseSignal,
}

impl SessionHandle {
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl StreamSession {
    pub(crate) fn open(
        transport: &dyn Transport,
        name: impl Into<String>,
        request: OpenRequest,
    ) -> Self {
        Self {
            name: name.into(),
            events: transport.open(request),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            closed: Arc::clone(&self.closed),
        }
    }

    /// Drive the session until it is closed, the transport fails, or the
    /// server ends the stream. Decoded messages are delivered in arrival
    /// order; decode failures are contained (logged and dropped) and never
    /// reach the error handler.
    pub async fn run<FM, FE>(self, mut on_message: FM, on_error: FE)
    where
        FM: FnMut(Message),
        FE: FnMut(StreamError),
    {
        let name = self.name.clone();
        self.run_raw(
            move |raw| match parse_message(&raw) {
                Ok(message) => on_message(message),
                Err(error) => {
                    tracing::debug!(stream = %name, %error, "dropping malformed message");
                }
            },
            on_error,
        )
        .await;
    }

    /// Like [`StreamSession::run`] but delivers raw frame payloads without
    /// decoding; the login handshake consumes its single payload this way.
    pub async fn run_raw<FM, FE>(mut self, mut on_payload: FM, mut on_error: FE)
    where
        FM: FnMut(String),
        FE: FnMut(StreamError),
    {
        loop {
            let Some(event) = next_or_closed(&mut self.events, &self.closed).await else {
                break;
            };
            match event {
                TransportEvent::Opened => {
                    tracing::debug!(stream = %self.name, "connected");
                }
                TransportEvent::Message(raw) => on_payload(raw),
                TransportEvent::Failed { status, message } => {
                    on_error(StreamError { status, message });
                    break;
                }
            }
        }
        self.closed.store(true, Ordering::Release);
    }
}

/// Await the next transport event, polling the close flag alongside stream
/// progress so `close()` takes effect even while the connection is idle.
async fn next_or_closed(events: &mut EventStream, closed: &CloseSignal) -> Option<TransportEvent> {
    loop {
        if closed.load(Ordering::Acquire) {
            return None;
        }
        match tokio::time::timeout(CLOSE_POLL_INTERVAL, events.next()).await {
            Ok(next) => return next,
            Err(_) => continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::StreamSession;
    use crate::transport::testing::FakeTransport;
    use crate::transport::{OpenRequest, TransportEvent};

    fn request() -> OpenRequest {
        OpenRequest {
            url: "http://colossus.test/acme/master/logs?level=info".to_owned(),
            token: Some("tok".to_owned()),
            user_agent: "foghorn/test".to_owned(),
        }
    }

    fn payload(text: &str) -> String {
        format!(
            r#"{{"sender":"acme.shop@1.0.0","subject":"acme.shop","level":"info","body":{{"message":"{text}"}}}}"#
        )
    }

    #[tokio::test]
    async fn delivers_messages_in_arrival_order() {
        let transport = FakeTransport::new(vec![
            TransportEvent::Opened,
            TransportEvent::Message(payload("first")),
            TransportEvent::Message(payload("second")),
        ]);
        let session = StreamSession::open(&transport, "info log", request());

        let mut seen = Vec::new();
        let mut errors = Vec::new();
        session
            .run(
                |message| seen.push(message.body.display_text()),
                |error| errors.push(error),
            )
            .await;

        assert_eq!(seen, vec!["first".to_owned(), "second".to_owned()]);
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn malformed_payload_is_dropped_without_touching_the_error_channel() {
        let transport = FakeTransport::new(vec![
            TransportEvent::Opened,
            TransportEvent::Message("{ not json".to_owned()),
            TransportEvent::Message(payload("still alive")),
        ]);
        let session = StreamSession::open(&transport, "info log", request());

        let mut seen = Vec::new();
        let mut errors = Vec::new();
        session
            .run(
                |message| seen.push(message.body.display_text()),
                |error| errors.push(error),
            )
            .await;

        assert_eq!(seen, vec!["still alive".to_owned()]);
        assert!(errors.is_empty(), "decode failures must stay contained");
    }

    #[tokio::test]
    async fn transport_failure_reaches_the_error_handler_once() {
        let transport = FakeTransport::new(vec![
            TransportEvent::Opened,
            TransportEvent::Failed {
                status: Some(502),
                message: "bad gateway".to_owned(),
            },
        ]);
        let session = StreamSession::open(&transport, "info log", request());

        let mut seen = Vec::new();
        let mut errors = Vec::new();
        session
            .run(
                |message| seen.push(message),
                |error| errors.push(error),
            )
            .await;

        assert!(seen.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].status, Some(502));
    }

    #[tokio::test]
    async fn close_stops_delivery_and_is_idempotent() {
        let transport = FakeTransport::new(vec![
            TransportEvent::Opened,
            TransportEvent::Message(payload("never seen")),
        ])
        .holding_open();
        let session = StreamSession::open(&transport, "info log", request());
        let handle = session.handle();
        handle.close();
        handle.close();

        let mut seen = Vec::new();
        let run = session.run(|message| seen.push(message), |_error| {});
        tokio::time::timeout(Duration::from_secs(1), run)
            .await
            .expect("a closed session must return promptly");

        assert!(seen.is_empty());
        assert!(handle.is_closed());
    }

    #[tokio::test]
    async fn run_marks_the_session_closed_on_stream_end() {
        let transport = FakeTransport::new(vec![TransportEvent::Opened]);
        let session = StreamSession::open(&transport, "event", request());
        let handle = session.handle();
        session.run(|_message| {}, |_error| {}).await;
        assert!(handle.is_closed());
    }
}
