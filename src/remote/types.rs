use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote-owned conversation context. Created once per session, deleted on
/// session end regardless of success or failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadHandle {
    pub id: String,
}

/// Lifecycle states of a remote run as reported by the server. Anything the
/// client does not recognize is preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Completed,
    Failed,
    Cancelled,
    Expired,
    Other(String),
}

impl RunStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "queued" => Self::Queued,
            "in_progress" => Self::InProgress,
            "requires_action" => Self::RequiresAction,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            "expired" => Self::Expired,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::RequiresAction => "requires_action",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
            Self::Other(other) => other,
        };
        f.write_str(text)
    }
}

/// The only required-action kind this client implements.
pub const ACTION_SUBMIT_TOOL_OUTPUTS: &str = "submit_tool_outputs";

/// One pending tool-call request from the remote side. Consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallRequest {
    /// Opaque token used to correlate the result.
    pub id: String,
    pub name: String,
    /// Raw serialized argument payload; parsed by the invoker.
    pub arguments: String,
}

/// Action the remote side is waiting on before the run can proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredAction {
    pub kind: String,
    pub tool_calls: Vec<ToolCallRequest>,
}

/// Snapshot of a remote run as observed by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub id: String,
    pub status: RunStatus,
    /// Present only when `status` is `RequiresAction`.
    pub required_action: Option<RequiredAction>,
}

/// One locally-produced result, correlated by call id. Submitted as a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub tool_call_id: String,
    pub output: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One message in a thread. The driver only ever reads the newest message
/// after a run completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    /// Text content parts, in order.
    pub parts: Vec<String>,
}
