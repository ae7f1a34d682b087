//! Session state for an established connection.

use reqwest::Url;

/// An established session: opaque identifier plus the dedicated address
/// tool-call envelopes are submitted to.
///
/// Both fields come from the same handshake line, so a `Session` is never
/// partially populated. Immutable after construction; safe to read from
/// any number of concurrent in-flight invocations.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Identifier assigned by the server for this connection.
    pub session_id: String,
    /// Absolute submission address, carrying the session_id query parameter.
    pub messages_url: Url,
}

impl Session {
    /// Build a session from a submission address by extracting the
    /// `session_id` query parameter. Returns `None` when the parameter is
    /// absent or empty.
    pub(crate) fn from_messages_url(messages_url: Url) -> Option<Self> {
        let session_id = messages_url
            .query_pairs()
            .find(|(key, _)| key == "session_id")
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty())?;
        Some(Self {
            session_id,
            messages_url,
        })
    }
}

/// Lifecycle state of a client's session.
///
/// Created unestablished and settled at most once: a successful handshake
/// moves it to `Established`, a failed one latches it as `Failed` for the
/// rest of the instance's life. Neither terminal state is ever left.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Unestablished,
    Established(Session),
    Failed,
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Established(session) => Some(session),
            SessionState::Unestablished | SessionState::Failed => None,
        }
    }

    pub fn is_established(&self) -> bool {
        self.session().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_messages_url() {
        let url: Url = "http://host:8000/messages/?session_id=abc123"
            .parse()
            .unwrap();
        let session = Session::from_messages_url(url.clone()).unwrap();
        assert_eq!(session.session_id, "abc123");
        assert_eq!(session.messages_url, url);
    }

    #[test]
    fn test_session_id_among_other_parameters() {
        let url: Url = "http://host:8000/messages/?foo=1&session_id=xyz&bar=2"
            .parse()
            .unwrap();
        let session = Session::from_messages_url(url).unwrap();
        assert_eq!(session.session_id, "xyz");
    }

    #[test]
    fn test_missing_session_id() {
        let url: Url = "http://host:8000/messages/".parse().unwrap();
        assert!(Session::from_messages_url(url).is_none());
    }

    #[test]
    fn test_empty_session_id() {
        let url: Url = "http://host:8000/messages/?session_id=".parse().unwrap();
        assert!(Session::from_messages_url(url).is_none());
    }

    #[test]
    fn test_state_default_is_unestablished() {
        let state = SessionState::default();
        assert!(!state.is_established());
        assert!(state.session().is_none());
    }

    #[test]
    fn test_failed_state_has_no_session() {
        let state = SessionState::Failed;
        assert!(!state.is_established());
        assert!(state.session().is_none());
    }
}
