use std::collections::VecDeque;
use std::pin::Pin;

use futures_util::stream::{self, Stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::error::CourierError;
use crate::headers::build_headers;
use crate::sse::SseFrameParser;

/// One lifecycle event observed on a push connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Opened,
    /// Raw data payload of one server-sent frame.
    Message(String),
    /// Connection-level failure; the stream ends after delivering it.
    Failed {
        status: Option<u16>,
        message: String,
    },
}

pub type EventStream = Pin<Box<dyn Stream<Item = TransportEvent> + Send>>;

/// Connection parameters for one subscription.
#[derive(Debug, Clone)]
pub struct OpenRequest {
    pub url: String,
    /// Bearer token; `None` for the unauthenticated login handshake.
    pub token: Option<String>,
    pub user_agent: String,
}

/// Minimal push-connection capability.
///
/// Failures surface as [`TransportEvent::Failed`] items rather than `Err`
/// returns so a session observes a single delivery channel, and so tests can
/// script whole connection lifecycles from a plain event list.
pub trait Transport: Send + Sync {
    fn open(&self, request: OpenRequest) -> EventStream;
}

/// HTTP(S) server-push transport over a GET event-stream request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, CourierError> {
        let http = Client::builder().build()?;
        Ok(Self { http })
    }
}

type BodyStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, reqwest::Error>> + Send>>;

enum PumpState {
    Connect { http: Client, request: OpenRequest },
    Read {
        body: BodyStream,
        parser: SseFrameParser,
        pending: VecDeque<TransportEvent>,
    },
    Done,
}

impl Transport for HttpTransport {
    fn open(&self, request: OpenRequest) -> EventStream {
        let state = PumpState::Connect {
            http: self.http.clone(),
            request,
        };
        Box::pin(stream::unfold(state, pump))
    }
}

async fn pump(state: PumpState) -> Option<(TransportEvent, PumpState)> {
    match state {
        PumpState::Connect { http, request } => match connect(&http, &request).await {
            Ok(response) => {
                let body: BodyStream = Box::pin(
                    response
                        .bytes_stream()
                        .map(|chunk| chunk.map(|bytes| bytes.to_vec())),
                );
                let next = PumpState::Read {
                    body,
                    parser: SseFrameParser::default(),
                    pending: VecDeque::new(),
                };
                Some((TransportEvent::Opened, next))
            }
            Err(failure) => Some((failure, PumpState::Done)),
        },
        PumpState::Read {
            mut body,
            mut parser,
            mut pending,
        } => loop {
            if let Some(event) = pending.pop_front() {
                return Some((
                    event,
                    PumpState::Read {
                        body,
                        parser,
                        pending,
                    },
                ));
            }
            match body.next().await {
                Some(Ok(chunk)) => {
                    for payload in parser.feed(&chunk) {
                        pending.push_back(TransportEvent::Message(payload));
                    }
                }
                Some(Err(error)) => {
                    return Some((
                        TransportEvent::Failed {
                            status: error.status().map(|status| status.as_u16()),
                            message: error.to_string(),
                        },
                        PumpState::Done,
                    ));
                }
                None => return None,
            }
        },
        PumpState::Done => None,
    }
}

async fn connect(http: &Client, request: &OpenRequest) -> Result<reqwest::Response, TransportEvent> {
    let headers = match header_map(request) {
        Ok(headers) => headers,
        Err(error) => {
            return Err(TransportEvent::Failed {
                status: None,
                message: error.to_string(),
            })
        }
    };

    let response = match http.get(&request.url).headers(headers).send().await {
        Ok(response) => response,
        Err(error) => {
            return Err(TransportEvent::Failed {
                status: error.status().map(|status| status.as_u16()),
                message: error.to_string(),
            })
        }
    };

    let status = response.status();
    if !status.is_success() {
        return Err(TransportEvent::Failed {
            status: Some(status.as_u16()),
            message: format!("server refused the stream: {status}"),
        });
    }
    Ok(response)
}

fn header_map(request: &OpenRequest) -> Result<HeaderMap, CourierError> {
    let mut out = HeaderMap::new();
    for (key, value) in build_headers(request.token.as_deref(), &request.user_agent) {
        out.insert(
            HeaderName::from_bytes(key.as_bytes()).map_err(|_| CourierError::InvalidHeader {
                name: key.clone(),
            })?,
            HeaderValue::from_str(&value)
                .map_err(|_| CourierError::InvalidHeader { name: key.clone() })?,
        );
    }
    Ok(out)
}
