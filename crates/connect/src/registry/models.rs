//! Payloads exchanged with the Fathom events API.

use serde::{Deserialize, Serialize};

use fathom_sync_core::{EventName, RemoteEvent};

/// One page of `GET /sites/{site_id}/events`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsPage {
    #[serde(default)]
    pub data: Vec<RemoteEvent>,
    #[serde(default)]
    pub has_more: bool,
}

impl EventsPage {
    pub fn new(data: Vec<RemoteEvent>, has_more: bool) -> Self {
        Self { data, has_more }
    }

    /// Cursor for the next page: the id of the last event on this page.
    pub fn next_cursor(&self) -> Option<&str> {
        self.data.last().map(|event| event.id.as_str())
    }
}

/// Body of `POST /sites/{site_id}/events`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateEventRequest<'a> {
    pub name: &'a EventName,
}

/// Error body returned by the API on failures.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_decoding() {
        let json = r#"{
            "object": "list",
            "url": "/v1/sites/ABC/events",
            "has_more": true,
            "data": [
                {"id": "signup", "object": "event", "name": "Signup"},
                {"id": "login", "object": "event", "name": "Login"}
            ]
        }"#;

        let page: EventsPage = serde_json::from_str(json).unwrap();
        assert!(page.has_more);
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.next_cursor(), Some("login"));
    }

    #[test]
    fn test_page_defaults() {
        let page: EventsPage = serde_json::from_str("{}").unwrap();
        assert!(!page.has_more);
        assert_eq!(page.next_cursor(), None);
    }

    #[test]
    fn test_create_request_body() {
        let name = EventName::new("Newsletter signup").unwrap();
        let body = serde_json::to_string(&CreateEventRequest { name: &name }).unwrap();
        assert_eq!(body, r#"{"name":"Newsletter signup"}"#);
    }
}
