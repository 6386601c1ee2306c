//! Conversation controller
//!
//! Owns the message log, the input buffer and the single-flight gate.
//! A turn goes `Idle -> Sending -> Idle` whether the backend answers or not:
//! a failed request still appends exactly one (text) bot message.

use crate::backend::{QueryBackend, QueryRequest};
use crate::error::BackendError;
use crate::message::Message;
use crate::payload::Envelope;

#[derive(Debug, Clone)]
pub struct Conversation {
    session_id: String,
    messages: Vec<Message>,
    input: String,
    awaiting: bool,
    /// Bumped on every log mutation so views know to scroll to the latest message.
    revision: u64,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self::with_session_id(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_session_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            messages: Vec::new(),
            input: String::new(),
            awaiting: false,
            revision: 0,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The log, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Edit access to the pending input buffer.
    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn is_awaiting(&self) -> bool {
        self.awaiting
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// First half of a submission: validate, record the user message and
    /// close the gate. Returns the request to send, or `None` when the text is
    /// blank or a request is already in flight.
    pub fn begin(&mut self, text: &str) -> Option<QueryRequest> {
        if text.trim().is_empty() {
            return None;
        }
        if self.awaiting {
            tracing::debug!("query already in flight, ignoring submit");
            return None;
        }

        self.push(Message::user(text));
        self.input.clear();
        self.awaiting = true;
        tracing::info!(session = %self.session_id, "submitting query");

        Some(QueryRequest {
            message: text.to_string(),
            session_id: self.session_id.clone(),
        })
    }

    /// [`Conversation::begin`] with the current contents of the input buffer.
    pub fn begin_from_input(&mut self) -> Option<QueryRequest> {
        let text = self.input.clone();
        self.begin(&text)
    }

    /// Second half of a submission: append the reply (or the failure text) and
    /// reopen the gate. Ignored when nothing is in flight.
    pub fn complete(&mut self, result: Result<Envelope, BackendError>) {
        if !self.awaiting {
            tracing::warn!("response arrived with no query in flight, dropping it");
            return;
        }

        let message = match result {
            Ok(envelope) => {
                tracing::info!(kind = envelope.payload.kind_name(), "received response");
                Message::bot(envelope)
            }
            Err(err) => {
                tracing::warn!(error = %err, "query failed");
                Message::failure()
            }
        };

        self.push(message);
        self.awaiting = false;
    }

    /// Run a whole turn against `backend`. Returns whether the text was accepted.
    pub async fn submit<B>(&mut self, text: &str, backend: &B) -> bool
    where
        B: QueryBackend + ?Sized,
    {
        let Some(request) = self.begin(text) else {
            return false;
        };
        let result = backend.query(&request).await;
        self.complete(result);
        true
    }

    fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Role, FAILURE_TEXT};
    use crate::payload::Payload;

    #[test]
    fn test_blank_input_is_ignored() {
        let mut conv = Conversation::with_session_id("s");
        assert!(conv.begin("").is_none());
        assert!(conv.begin("   \n\t").is_none());
        assert!(conv.messages().is_empty());
        assert!(!conv.is_awaiting());
        assert_eq!(conv.revision(), 0);
    }

    #[test]
    fn test_begin_records_user_message_and_clears_input() {
        let mut conv = Conversation::with_session_id("s1");
        conv.input_mut().push_str("sales by city");

        let request = conv.begin_from_input().unwrap();
        assert_eq!(request.message, "sales by city");
        assert_eq!(request.session_id, "s1");
        assert_eq!(conv.input(), "");
        assert!(conv.is_awaiting());
        assert_eq!(conv.messages(), &[Message::user("sales by city")]);
    }

    #[test]
    fn test_single_flight_gate() {
        let mut conv = Conversation::new();
        assert!(conv.begin("first").is_some());
        assert!(conv.begin("second").is_none());
        assert!(conv.begin("third").is_none());
        assert_eq!(conv.messages().len(), 1);
    }

    #[test]
    fn test_input_typed_while_awaiting_survives_rejection() {
        let mut conv = Conversation::new();
        conv.begin("first");
        conv.input_mut().push_str("draft");
        assert!(conv.begin_from_input().is_none());
        assert_eq!(conv.input(), "draft");
    }

    #[test]
    fn test_failure_becomes_text_reply() {
        let mut conv = Conversation::new();
        conv.begin("foo");
        conv.complete(Err(BackendError::transport("connection refused")));

        assert!(!conv.is_awaiting());
        assert_eq!(conv.messages()[0], Message::user("foo"));
        assert_eq!(conv.messages()[1].role(), Role::Bot);
        assert_eq!(conv.messages()[1].payload(), Some(&Payload::text(FAILURE_TEXT)));
    }

    #[test]
    fn test_complete_without_pending_is_ignored() {
        let mut conv = Conversation::new();
        conv.complete(Ok(Envelope::new(Payload::text("late"))));
        assert!(conv.messages().is_empty());
    }

    #[test]
    fn test_revision_tracks_every_append() {
        let mut conv = Conversation::new();
        conv.begin("q");
        conv.complete(Ok(Envelope::new(Payload::text("a")).with_explanation("why")));
        assert_eq!(conv.revision(), 2);
        assert_eq!(
            conv.messages()[1],
            Message::Bot {
                explanation: Some("why".to_string()),
                payload: Payload::text("a"),
            }
        );
    }
}
