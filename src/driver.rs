use crate::error::RunError;
use crate::remote::traits::RunClient;
use crate::remote::types::{
    ACTION_SUBMIT_TOOL_OUTPUTS, MessageRole, RunStatus, ToolCallRequest, ToolOutput,
};
use crate::tools::ToolInvoker;
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Drives one remote run per task to a terminal state.
///
/// Owns the poll/act state machine: submit the task, create a run, poll at a
/// fixed bounded interval, resolve required actions through the tool invoker,
/// and return the newest assistant message once the run completes. Run
/// identity never outlives a task; each task spawns a new run on the same
/// thread.
pub struct RunDriver {
    client: Arc<dyn RunClient>,
    invoker: ToolInvoker,
    assistant_id: String,
    poll_interval: Duration,
    task_timeout: Duration,
}

impl RunDriver {
    pub fn new(
        client: Arc<dyn RunClient>,
        invoker: ToolInvoker,
        assistant_id: impl Into<String>,
        poll_interval: Duration,
        task_timeout: Duration,
    ) -> Self {
        Self {
            client,
            invoker,
            assistant_id: assistant_id.into(),
            poll_interval,
            task_timeout,
        }
    }

    /// Run one task to completion and return the reply's text parts.
    pub async fn run_task(&self, thread_id: &str, task: &str) -> crate::error::Result<Vec<String>> {
        let content = task_with_timestamp(task);
        self.client
            .create_message(thread_id, MessageRole::User, &content)
            .await?;

        let mut run = self.client.create_run(thread_id, &self.assistant_id).await?;
        info!(run_id = %run.id, "run created");

        let deadline = tokio::time::Instant::now() + self.task_timeout;

        loop {
            debug!(run_id = %run.id, status = %run.status, "run status");

            match run.status {
                RunStatus::Completed => {
                    info!(run_id = %run.id, "run completed");
                    return self.latest_reply(thread_id).await;
                }
                RunStatus::RequiresAction => {
                    let outputs = match run.required_action.take() {
                        Some(action) if action.kind != ACTION_SUBMIT_TOOL_OUTPUTS => {
                            error!(
                                kind = %action.kind,
                                "remote requested an action kind this client does not implement"
                            );
                            return Err(RunError::UnsupportedAction { kind: action.kind }.into());
                        }
                        Some(action) => self.resolve_batch(&action.tool_calls).await,
                        // No action payload: submit an empty batch and rely
                        // on the remote to advance or re-signal.
                        None => Vec::new(),
                    };
                    info!(run_id = %run.id, outputs = outputs.len(), "submitting tool outputs");
                    run = self
                        .client
                        .submit_tool_outputs(thread_id, &run.id, outputs)
                        .await?;
                }
                RunStatus::Queued | RunStatus::InProgress => {}
                RunStatus::Failed
                | RunStatus::Cancelled
                | RunStatus::Expired
                | RunStatus::Other(_) => {
                    return Err(RunError::TerminatedAbnormally {
                        run_id: run.id,
                        status: run.status.to_string(),
                    }
                    .into());
                }
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(RunError::TimedOut {
                    run_id: run.id,
                    budget_secs: self.task_timeout.as_secs(),
                }
                .into());
            }

            tokio::time::sleep(self.poll_interval).await;
            run = self.client.retrieve_run(thread_id, &run.id).await?;
        }
    }

    /// Invoke every pending call sequentially, in the order the remote listed
    /// them, producing exactly one output per call id. Per-call failures are
    /// shipped as data; they never abort the batch.
    async fn resolve_batch(&self, calls: &[ToolCallRequest]) -> Vec<ToolOutput> {
        let mut outputs = Vec::with_capacity(calls.len());
        for call in calls {
            let result = self.invoker.invoke(&call.name, &call.arguments).await;
            outputs.push(ToolOutput {
                tool_call_id: call.id.clone(),
                output: result.into_wire_string(),
            });
        }
        outputs
    }

    async fn latest_reply(&self, thread_id: &str) -> crate::error::Result<Vec<String>> {
        let messages = self.client.list_messages(thread_id).await?;
        let latest = messages
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("run completed but the thread has no messages"))?;
        Ok(latest.parts)
    }
}

/// Append a client-generated timestamp so otherwise-identical repeated tasks
/// stay distinguishable in the thread history.
fn task_with_timestamp(task: &str) -> String {
    let stamp = Local::now().format("%Y-%m-%d %H:%M");
    format!("{task} \n{stamp}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_appended_on_its_own_line() {
        let content = task_with_timestamp("list open issues");
        let (task, stamp) = content.split_once('\n').unwrap();
        assert_eq!(task, "list open issues ");
        // e.g. "2026-08-23 14:05"
        assert_eq!(stamp.len(), 16);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[13..14], ":");
    }
}
