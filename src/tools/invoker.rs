use super::registry::ToolRegistry;
use super::types::ToolResult;
use crate::error::ToolError;
use std::sync::Arc;
use tracing::{info, warn};

/// Validates and executes one tool call by name.
///
/// Every failure mode — malformed arguments, unknown tool, handler error —
/// is returned as a failed [`ToolResult`], never raised past this boundary
/// during run processing: one bad tool call must not kill the run.
pub struct ToolInvoker {
    registry: Arc<ToolRegistry>,
}

impl ToolInvoker {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Parse the raw argument payload, look up the tool, and execute it.
    pub async fn invoke(&self, name: &str, raw_arguments: &str) -> ToolResult {
        info!(tool = name, args = raw_arguments, "invoking tool");

        let args: serde_json::Value = match serde_json::from_str(raw_arguments) {
            Ok(value) => value,
            Err(err) => {
                warn!(tool = name, error = %err, "tool arguments failed to parse");
                return ToolError::ArgumentParse {
                    name: name.to_string(),
                    message: err.to_string(),
                }
                .into();
            }
        };

        let tool = match self.registry.lookup(name) {
            Ok(tool) => tool,
            Err(err) => {
                warn!(tool = name, "tool not registered");
                return err.into();
            }
        };

        match tool.execute(args).await {
            Ok(result) => {
                if let Some(ref error) = result.error {
                    warn!(tool = name, error, "tool reported failure");
                }
                result
            }
            Err(err) => {
                warn!(tool = name, error = %err, "tool execution failed");
                ToolError::Execution {
                    name: name.to_string(),
                    message: err.to_string(),
                }
                .into()
            }
        }
    }
}
