use crate::message::Message;

/// Subject prefix the platform router puts on infrastructure messages that
/// every subscriber should see regardless of its own filter id.
pub const ROUTER_SENTINEL: &str = "-";

/// Decides whether a pushed message belongs to the current subscription.
///
/// Several client instances share one broadcast channel; this predicate is
/// the sole gate between the stream and the sink, and messages failing it are
/// silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectFilter {
    id: String,
    include_router: bool,
}

impl SubjectFilter {
    pub fn new(id: impl Into<String>, include_router: bool) -> Self {
        Self {
            id: id.into(),
            include_router,
        }
    }

    pub fn matches(&self, message: &Message) -> bool {
        (!self.id.is_empty() && message.subject.starts_with(&self.id))
            || (self.include_router && message.subject.starts_with(ROUTER_SENTINEL))
    }
}

#[cfg(test)]
mod tests {
    use super::SubjectFilter;
    use crate::message::{Body, Message};

    fn message_with_subject(subject: &str) -> Message {
        Message {
            sender: "acme.shop@1.0.0".to_owned(),
            subject: subject.to_owned(),
            level: "info".to_owned(),
            body: Body::default(),
        }
    }

    #[test]
    fn matches_subjects_prefixed_by_the_filter_id() {
        let filter = SubjectFilter::new("acme.shop", false);
        assert!(filter.matches(&message_with_subject("acme.shop")));
        assert!(filter.matches(&message_with_subject("acme.shop.worker")));
        assert!(!filter.matches(&message_with_subject("other.app")));
    }

    #[test]
    fn empty_id_matches_nothing_on_its_own() {
        let filter = SubjectFilter::new("", false);
        assert!(!filter.matches(&message_with_subject("acme.shop")));
        assert!(!filter.matches(&message_with_subject("-router")));
    }

    #[test]
    fn router_messages_pass_when_enabled() {
        let filter = SubjectFilter::new("", true);
        assert!(filter.matches(&message_with_subject("-router")));
        assert!(!filter.matches(&message_with_subject("acme.shop")));
    }

    #[test]
    fn id_and_router_combine_as_a_union() {
        let filter = SubjectFilter::new("acme.shop", true);
        assert!(filter.matches(&message_with_subject("acme.shop")));
        assert!(filter.matches(&message_with_subject("-router")));
        assert!(!filter.matches(&message_with_subject("other.app")));
    }
}
