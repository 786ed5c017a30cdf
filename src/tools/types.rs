use crate::error::ToolError;
use serde::{Deserialize, Serialize};

/// Result of a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
}

impl ToolResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(message.into()),
        }
    }

    /// Convert to the string shipped back to the remote side.
    ///
    /// Failures are shipped as text like any other output: the remote
    /// assistant is the error-recovery point and decides whether to retry,
    /// explain, or change approach.
    pub fn into_wire_string(self) -> String {
        if let Some(error) = self.error {
            format!("[ERROR] {error}")
        } else {
            self.output
        }
    }
}

impl From<ToolError> for ToolResult {
    fn from(err: ToolError) -> Self {
        Self::failed(err.to_string())
    }
}

/// Description of a tool as advertised to the remote assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}
