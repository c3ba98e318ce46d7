use std::collections::BTreeMap;

pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_USER_AGENT: &str = "user-agent";

/// Build a deterministic header map for a push-stream request.
///
/// The authorization header is only present when a token is supplied; the
/// login handshake connects bare, the state value being its capability.
pub fn build_headers(token: Option<&str>, user_agent: &str) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert(HEADER_ACCEPT.to_owned(), "text/event-stream".to_owned());

    if let Some(token) = token.map(str::trim).filter(|token| !token.is_empty()) {
        headers.insert(HEADER_AUTHORIZATION.to_owned(), format!("bearer {token}"));
    }

    let user_agent = user_agent.trim();
    if !user_agent.is_empty() {
        headers.insert(HEADER_USER_AGENT.to_owned(), user_agent.to_owned());
    }

    headers
}
