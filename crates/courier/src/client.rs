use std::sync::Arc;

use crate::auth;
use crate::endpoint::{Endpoints, Service};
use crate::error::CourierError;
use crate::session::StreamSession;
use crate::transport::{HttpTransport, OpenRequest, Transport};

/// Read-only view of the stored credentials.
///
/// Values are re-read at every session construction, so a rotated token is
/// picked up by the next subscription; an existing session is never mutated.
pub trait Credentials {
    fn token(&self) -> Option<String>;
    fn account(&self) -> String;
    fn workspace(&self) -> String;
}

/// Entry point for the platform's push channels: log and event
/// subscriptions, and the one-shot login handshake.
pub struct Courier {
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
    user_agent: String,
}

impl Courier {
    pub fn new(endpoints: Endpoints, user_agent: impl Into<String>) -> Result<Self, CourierError> {
        let transport = Arc::new(HttpTransport::new()?);
        Ok(Self::with_transport(transport, endpoints, user_agent))
    }

    pub fn with_transport(
        transport: Arc<dyn Transport>,
        endpoints: Endpoints,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            endpoints,
            user_agent: user_agent.into(),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Subscribe to the account/workspace log channel at `level`.
    pub fn subscribe_logs(
        &self,
        credentials: &dyn Credentials,
        level: &str,
    ) -> Result<StreamSession, CourierError> {
        let host = self.colossus()?;
        let url = format!(
            "{host}/{account}/{workspace}/logs?level={level}",
            account = credentials.account(),
            workspace = credentials.workspace(),
        );
        self.subscribe(credentials, format!("{level} log"), url)
    }

    /// Subscribe to the event channel for `sender` and `key`.
    pub fn subscribe_events(
        &self,
        credentials: &dyn Credentials,
        sender: &str,
        key: &str,
    ) -> Result<StreamSession, CourierError> {
        let host = self.colossus()?;
        let url = format!(
            "{host}/{account}/{workspace}/events/{sender}:-:{key}",
            account = credentials.account(),
            workspace = credentials.workspace(),
        );
        self.subscribe(credentials, "event", url)
    }

    /// Complete the out-of-band login flow scoped by `state`, resolving with
    /// the handshake token.
    pub async fn authenticate(
        &self,
        account: &str,
        workspace: &str,
        state: &str,
    ) -> Result<String, CourierError> {
        auth::authenticate(
            self.transport.as_ref(),
            self.endpoints.public_endpoint(),
            &self.user_agent,
            account,
            workspace,
            state,
        )
        .await
    }

    fn subscribe(
        &self,
        credentials: &dyn Credentials,
        name: impl Into<String>,
        url: String,
    ) -> Result<StreamSession, CourierError> {
        let token = credentials.token().ok_or(CourierError::MissingToken)?;
        let request = OpenRequest {
            url,
            token: Some(token),
            user_agent: self.user_agent.clone(),
        };
        Ok(StreamSession::open(self.transport.as_ref(), name, request))
    }

    fn colossus(&self) -> Result<&str, CourierError> {
        self.endpoints
            .resolve(Service::Colossus)
            .ok_or(CourierError::ServiceDisabled {
                service: Service::Colossus.name(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{Courier, Credentials};
    use crate::endpoint::Endpoints;
    use crate::error::CourierError;
    use crate::transport::testing::FakeTransport;

    struct StubCredentials {
        token: Option<String>,
    }

    impl Credentials for StubCredentials {
        fn token(&self) -> Option<String> {
            self.token.clone()
        }

        fn account(&self) -> String {
            "acme".to_owned()
        }

        fn workspace(&self) -> String {
            "dev".to_owned()
        }
    }

    fn courier_with(transport: Arc<FakeTransport>) -> Courier {
        let endpoints = Endpoints::from_lookup(|key| match key {
            "FOGHORN_COLOSSUS_ENDPOINT" => Some("http://colossus.test".to_owned()),
            _ => None,
        });
        Courier::with_transport(transport, endpoints, "foghorn/test")
    }

    #[test]
    fn log_subscription_builds_the_level_scoped_url() {
        let transport = Arc::new(FakeTransport::new(Vec::new()));
        let courier = courier_with(Arc::clone(&transport));
        let credentials = StubCredentials {
            token: Some("tok-1".to_owned()),
        };

        let session = courier
            .subscribe_logs(&credentials, "debug")
            .expect("subscription should open");
        assert_eq!(session.name(), "debug log");

        let request = transport.last_request();
        assert_eq!(request.url, "http://colossus.test/acme/dev/logs?level=debug");
        assert_eq!(request.token.as_deref(), Some("tok-1"));
    }

    #[test]
    fn event_subscription_builds_the_sender_key_url() {
        let transport = Arc::new(FakeTransport::new(Vec::new()));
        let courier = courier_with(Arc::clone(&transport));
        let credentials = StubCredentials {
            token: Some("tok-1".to_owned()),
        };

        courier
            .subscribe_events(&credentials, "builder-hub", "build.status")
            .expect("subscription should open");

        let request = transport.last_request();
        assert_eq!(
            request.url,
            "http://colossus.test/acme/dev/events/builder-hub:-:build.status"
        );
    }

    #[test]
    fn subscriptions_require_a_stored_token() {
        let transport = Arc::new(FakeTransport::new(Vec::new()));
        let courier = courier_with(transport);
        let credentials = StubCredentials { token: None };

        let error = courier
            .subscribe_logs(&credentials, "info")
            .expect_err("subscription must fail without a token");
        assert!(matches!(error, CourierError::MissingToken));
    }

    #[test]
    fn each_subscription_reads_credentials_fresh() {
        let transport = Arc::new(FakeTransport::new(Vec::new()));
        let courier = courier_with(Arc::clone(&transport));

        courier
            .subscribe_logs(
                &StubCredentials {
                    token: Some("tok-old".to_owned()),
                },
                "info",
            )
            .expect("first subscription should open");
        courier
            .subscribe_logs(
                &StubCredentials {
                    token: Some("tok-new".to_owned()),
                },
                "info",
            )
            .expect("second subscription should open");

        let requests = transport.requests.lock().expect("request log lock");
        assert_eq!(requests[0].token.as_deref(), Some("tok-old"));
        assert_eq!(requests[1].token.as_deref(), Some("tok-new"));
    }
}
