#![allow(dead_code)]

use astrid::remote::{
    ACTION_SUBMIT_TOOL_OUTPUTS, Message, MessageRole, RequiredAction, Run, RunClient, RunStatus,
    ThreadHandle, ToolCallRequest, ToolOutput,
};
use astrid::tools::{Tool, ToolResult};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scripted stand-in for the remote run service.
///
/// `create_run`, `retrieve_run`, and `submit_tool_outputs` each consume the
/// next snapshot from a fixed script; everything the driver sends is
/// recorded for assertions. Transport failure is simulated by exhausting
/// the script.
pub struct ScriptedClient {
    script: Mutex<VecDeque<Run>>,
    reply: Vec<Message>,
    pub submissions: Mutex<Vec<Vec<ToolOutput>>>,
    pub sent_messages: Mutex<Vec<String>>,
    pub threads_created: AtomicUsize,
    pub threads_deleted: AtomicUsize,
}

impl ScriptedClient {
    pub fn new(script: Vec<Run>, reply: Vec<Message>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            reply,
            submissions: Mutex::new(Vec::new()),
            sent_messages: Mutex::new(Vec::new()),
            threads_created: AtomicUsize::new(0),
            threads_deleted: AtomicUsize::new(0),
        }
    }

    fn next_snapshot(&self) -> anyhow::Result<Run> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script exhausted: remote unreachable"))
    }

    pub fn deleted(&self) -> usize {
        self.threads_deleted.load(Ordering::SeqCst)
    }
}

/// Plain run snapshot in the given status.
pub fn run(status: RunStatus) -> Run {
    Run {
        id: "run_1".to_string(),
        status,
        required_action: None,
    }
}

/// `requires_action` snapshot asking for the given tool calls.
pub fn action_run(tool_calls: Vec<ToolCallRequest>) -> Run {
    Run {
        id: "run_1".to_string(),
        status: RunStatus::RequiresAction,
        required_action: Some(RequiredAction {
            kind: ACTION_SUBMIT_TOOL_OUTPUTS.to_string(),
            tool_calls,
        }),
    }
}

/// `requires_action` snapshot with an action kind this client cannot handle.
pub fn unsupported_action_run(kind: &str) -> Run {
    Run {
        id: "run_1".to_string(),
        status: RunStatus::RequiresAction,
        required_action: Some(RequiredAction {
            kind: kind.to_string(),
            tool_calls: Vec::new(),
        }),
    }
}

pub fn call(id: &str, name: &str, arguments: &str) -> ToolCallRequest {
    ToolCallRequest {
        id: id.to_string(),
        name: name.to_string(),
        arguments: arguments.to_string(),
    }
}

pub fn assistant_reply(text: &str) -> Vec<Message> {
    vec![Message {
        role: MessageRole::Assistant,
        parts: vec![text.to_string()],
    }]
}

impl RunClient for ScriptedClient {
    fn create_thread(
        &self,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ThreadHandle>> + Send + '_>> {
        Box::pin(async move {
            self.threads_created.fetch_add(1, Ordering::SeqCst);
            Ok(ThreadHandle {
                id: "thread_1".to_string(),
            })
        })
    }

    fn delete_thread<'a>(
        &'a self,
        _thread_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.threads_deleted.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    fn create_message<'a>(
        &'a self,
        _thread_id: &'a str,
        _role: MessageRole,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.sent_messages.lock().unwrap().push(text.to_string());
            Ok(())
        })
    }

    fn create_run<'a>(
        &'a self,
        _thread_id: &'a str,
        _assistant_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Run>> + Send + 'a>> {
        Box::pin(async move { self.next_snapshot() })
    }

    fn retrieve_run<'a>(
        &'a self,
        _thread_id: &'a str,
        _run_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Run>> + Send + 'a>> {
        Box::pin(async move { self.next_snapshot() })
    }

    fn submit_tool_outputs<'a>(
        &'a self,
        _thread_id: &'a str,
        _run_id: &'a str,
        outputs: Vec<ToolOutput>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Run>> + Send + 'a>> {
        Box::pin(async move {
            self.submissions.lock().unwrap().push(outputs);
            self.next_snapshot()
        })
    }

    fn list_messages<'a>(
        &'a self,
        _thread_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Vec<Message>>> + Send + 'a>> {
        Box::pin(async move { Ok(self.reply.clone()) })
    }
}

/// Canned local tool with a fixed response.
pub struct StubTool {
    pub name: &'static str,
    pub response: &'static str,
}

impl Tool for StubTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "stub"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({"type": "object", "properties": {}})
    }

    fn execute<'a>(
        &'a self,
        _args: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move { Ok(ToolResult::ok(self.response)) })
    }
}
