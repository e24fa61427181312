//! Scripted, in-memory `Transport` used by unit and behaviour tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use serde_json::Value;

use crate::transport::{Query, Transport, TransportError};

/// One request observed by [`StubTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Path relative to the service root.
    pub path: String,
    /// Query parameters in the order they were sent.
    pub query: Query,
}

impl RecordedRequest {
    /// Value of the first parameter called `name`.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
enum StubReply {
    Body(Value),
    Absent,
    Fail(TransportError),
}

impl StubReply {
    fn into_result(self) -> Result<Option<Value>, TransportError> {
        match self {
            Self::Body(value) => Ok(Some(value)),
            Self::Absent => Ok(None),
            Self::Fail(err) => Err(err),
        }
    }
}

/// `Transport` answering from per-path reply queues.
///
/// Replies for a path are served in the order they were added; the last one
/// repeats once the queue is down to it. Paths with no scripted reply answer
/// `Ok(None)`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wrc_core::test_support::StubTransport;
/// use wrc_core::transport::Transport;
///
/// let stub = StubTransport::new().with_reply("SearchServer/mozi", json!([]));
/// let reply = stub.get_json("SearchServer/mozi", &Vec::new())?;
/// assert_eq!(reply, Some(json!([])));
/// assert_eq!(stub.requests().len(), 1);
/// # Ok::<(), wrc_core::transport::TransportError>(())
/// ```
#[derive(Debug, Default)]
pub struct StubTransport {
    replies: RefCell<HashMap<String, VecDeque<StubReply>>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl StubTransport {
    /// Create a stub with no scripted replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON body for `path`.
    #[must_use]
    pub fn with_reply(self, path: &str, body: Value) -> Self {
        self.push(path, StubReply::Body(body))
    }

    /// Queue an absent reply (non-success status or non-JSON body) for `path`.
    #[must_use]
    pub fn with_absent(self, path: &str) -> Self {
        self.push(path, StubReply::Absent)
    }

    /// Queue a transport failure for `path`.
    #[must_use]
    pub fn with_error(self, path: &str, error: TransportError) -> Self {
        self.push(path, StubReply::Fail(error))
    }

    /// Queue a reply on an existing stub, for use behind shared references.
    pub fn push_reply(&self, path: &str, body: Option<Value>) {
        let reply = body.map_or(StubReply::Absent, StubReply::Body);
        self.replies
            .borrow_mut()
            .entry(path.to_owned())
            .or_default()
            .push_back(reply);
    }

    /// Every request seen so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    /// Paths requested so far, oldest first.
    #[must_use]
    pub fn requested_paths(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|request| request.path.clone())
            .collect()
    }

    fn push(self, path: &str, reply: StubReply) -> Self {
        self.replies
            .borrow_mut()
            .entry(path.to_owned())
            .or_default()
            .push_back(reply);
        self
    }

    fn next_reply(&self, path: &str) -> StubReply {
        let mut replies = self.replies.borrow_mut();
        let Some(queue) = replies.get_mut(path) else {
            return StubReply::Absent;
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap_or(StubReply::Absent)
        } else {
            queue.front().cloned().unwrap_or(StubReply::Absent)
        }
    }
}

impl Transport for StubTransport {
    fn get_json(&self, path: &str, query: &Query) -> Result<Option<Value>, TransportError> {
        self.requests.borrow_mut().push(RecordedRequest {
            path: path.to_owned(),
            query: query.clone(),
        });
        self.next_reply(path).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn replies_are_served_in_order_and_last_repeats() {
        let stub = StubTransport::new()
            .with_reply("a", json!(1))
            .with_reply("a", json!(2));
        let query = Query::new();
        assert_eq!(stub.get_json("a", &query), Ok(Some(json!(1))));
        assert_eq!(stub.get_json("a", &query), Ok(Some(json!(2))));
        assert_eq!(stub.get_json("a", &query), Ok(Some(json!(2))));
    }

    #[rstest]
    fn unknown_paths_are_absent() {
        let stub = StubTransport::new();
        assert_eq!(stub.get_json("missing", &Query::new()), Ok(None));
        assert_eq!(stub.requested_paths(), vec!["missing".to_owned()]);
    }

    #[rstest]
    fn scripted_errors_are_returned() {
        let error = TransportError::Network {
            url: "https://example.test/a".to_owned(),
            message: "connection reset".to_owned(),
        };
        let stub = StubTransport::new().with_error("a", error.clone());
        assert_eq!(stub.get_json("a", &Query::new()), Err(error));
    }
}
