use serde::{Deserialize, Serialize};

/// Lifecycle of the link to the chat backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
    Errored,
}

impl ConnectionState {
    pub fn label(&self) -> &str {
        match self {
            ConnectionState::Connecting => "Connecting",
            ConnectionState::Open => "Connected",
            ConnectionState::Closed => "Disconnected",
            ConnectionState::Errored => "Connection error",
        }
    }
}

/// Conversation identity as seen by the client.
///
/// `session_id` is assigned by the backend on the first exchange and never
/// replaced afterwards. A later, different id is remembered in
/// `conflicting_id` so the mismatch stays visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: Option<String>,
    pub connection_state: ConnectionState,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub conflicting_id: Option<String>,
}

impl Session {
    pub fn new(connection_state: ConnectionState) -> Self {
        Self {
            session_id: None,
            connection_state,
            conflicting_id: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.connection_state == ConnectionState::Open
    }

    /// Record a backend-provided id. Returns true when it was adopted.
    pub fn adopt(&mut self, candidate: &str) -> bool {
        match &self.session_id {
            None => {
                self.session_id = Some(candidate.to_string());
                true
            }
            Some(current) if current == candidate => false,
            Some(_) => {
                self.conflicting_id = Some(candidate.to_string());
                false
            }
        }
    }
}
