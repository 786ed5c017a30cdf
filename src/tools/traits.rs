use super::types::{ToolResult, ToolSpec};
use std::future::Future;
use std::pin::Pin;

/// Core tool trait — implement for any locally-executed capability.
///
/// Handlers report domain failures (HTTP errors, missing files) as failed
/// [`ToolResult`]s; an `Err` return is reserved for unexpected conditions and
/// is converted to a failed result by the invoker anyway.
pub trait Tool: Send + Sync {
    /// Tool name (used in remote function calling).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON schema for parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with parsed arguments.
    fn execute<'a>(
        &'a self,
        args: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>>;

    /// Get the full spec for assistant registration.
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

impl std::fmt::Debug for dyn Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool").field("name", &self.name()).finish()
    }
}
