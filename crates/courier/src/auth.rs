use serde::Deserialize;

use crate::error::CourierError;
use crate::session::StreamSession;
use crate::transport::{OpenRequest, Transport};

/// Wire shape of the handshake message: the token is the whole body value,
/// not the `{message|code}` envelope regular push messages use.
#[derive(Debug, Deserialize)]
struct HandshakeEnvelope {
    body: String,
}

/// Retrieve a session token out of band.
///
/// Opens one state-scoped stream session and resolves with the first token
/// message it delivers. The session is closed on every path — success,
/// transport failure, or the server ending the stream early — so no
/// connection outlives the call. There is no built-in timeout; callers
/// needing a bounded wait compose their own.
pub async fn authenticate(
    transport: &dyn Transport,
    public_endpoint: &str,
    user_agent: &str,
    account: &str,
    workspace: &str,
    state: &str,
) -> Result<String, CourierError> {
    let url = format!(
        "https://{account}.{public_endpoint}/_foghorn/sse/{state}?workspace={workspace}"
    );
    let request = OpenRequest {
        url,
        token: None,
        user_agent: user_agent.to_owned(),
    };

    let session = StreamSession::open(transport, "login", request);
    let handle = session.handle();
    let closer = handle.clone();

    let mut token: Option<String> = None;
    let mut failure: Option<CourierError> = None;
    session
        .run_raw(
            |raw| {
                if token.is_some() {
                    return;
                }
                match serde_json::from_str::<HandshakeEnvelope>(&raw) {
                    Ok(envelope) => {
                        token = Some(envelope.body);
                        closer.close();
                    }
                    Err(error) => {
                        tracing::debug!(%error, "dropping malformed handshake payload");
                    }
                }
            },
            |error| {
                failure = Some(CourierError::Transport {
                    status: error.status,
                    message: error.message,
                });
            },
        )
        .await;
    handle.close();

    match (token, failure) {
        (Some(token), _) => Ok(token),
        (None, Some(error)) => Err(error),
        (None, None) => Err(CourierError::Transport {
            status: None,
            message: "login stream closed before delivering a token".to_owned(),
        }),
    }
}
