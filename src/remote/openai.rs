use super::traits::RunClient;
use super::types::{
    Message, MessageRole, RequiredAction, Run, RunStatus, ThreadHandle, ToolCallRequest,
    ToolOutput,
};
use crate::tools::ToolSpec;
use anyhow::Context;
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

const OPENAI_API: &str = "https://api.openai.com/v1";

/// Assistants v2 is still gated behind a beta header.
const BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "assistants=v2");

/// [`RunClient`] backed by the OpenAI Assistants v2 HTTP API.
pub struct OpenAiRunClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ThreadObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RunObject {
    id: String,
    status: String,
    required_action: Option<RequiredActionObject>,
}

#[derive(Debug, Deserialize)]
struct RequiredActionObject {
    #[serde(rename = "type")]
    kind: String,
    submit_tool_outputs: Option<SubmitToolOutputsObject>,
}

#[derive(Debug, Deserialize)]
struct SubmitToolOutputsObject {
    tool_calls: Vec<ToolCallObject>,
}

#[derive(Debug, Deserialize)]
struct ToolCallObject {
    id: String,
    function: FunctionCallObject,
}

#[derive(Debug, Deserialize)]
struct FunctionCallObject {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct MessageListObject {
    data: Vec<MessageObject>,
}

#[derive(Debug, Deserialize)]
struct MessageObject {
    role: String,
    content: Vec<ContentPartObject>,
}

#[derive(Debug, Deserialize)]
struct ContentPartObject {
    #[serde(rename = "type")]
    kind: String,
    text: Option<TextPartObject>,
}

#[derive(Debug, Deserialize)]
struct TextPartObject {
    value: String,
}

#[derive(Debug, Deserialize)]
struct AssistantObject {
    id: String,
}

impl From<RunObject> for Run {
    fn from(wire: RunObject) -> Self {
        let required_action = wire.required_action.map(|action| RequiredAction {
            kind: action.kind,
            tool_calls: action
                .submit_tool_outputs
                .map(|outputs| {
                    outputs
                        .tool_calls
                        .into_iter()
                        .map(|call| ToolCallRequest {
                            id: call.id,
                            name: call.function.name,
                            arguments: call.function.arguments,
                        })
                        .collect()
                })
                .unwrap_or_default(),
        });
        Self {
            id: wire.id,
            status: RunStatus::parse(&wire.status),
            required_action,
        }
    }
}

impl From<MessageObject> for Message {
    fn from(wire: MessageObject) -> Self {
        let role = if wire.role == "assistant" {
            MessageRole::Assistant
        } else {
            MessageRole::User
        };
        let parts = wire
            .content
            .into_iter()
            .filter(|part| part.kind == "text")
            .filter_map(|part| part.text.map(|text| text.value))
            .collect();
        Self { role, parts }
    }
}

// ─── Client ──────────────────────────────────────────────────────────────────

impl OpenAiRunClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            api_key: api_key.into(),
            base_url: OPENAI_API.to_string(),
        }
    }

    /// Override the API base (compat gateways, mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(&self.api_key)
            .header(BETA_HEADER.0, BETA_HEADER.1)
    }

    async fn send<T: serde::de::DeserializeOwned>(
        builder: reqwest::RequestBuilder,
    ) -> anyhow::Result<T> {
        let response = builder.send().await.context("openai request failed")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("openai returned {status}: {body}");
        }
        response
            .json::<T>()
            .await
            .context("openai response did not match the expected shape")
    }

    /// Verify an existing assistant is reachable; returns its id.
    pub async fn retrieve_assistant(&self, assistant_id: &str) -> anyhow::Result<String> {
        let assistant: AssistantObject = Self::send(
            self.request(reqwest::Method::GET, &format!("/assistants/{assistant_id}")),
        )
        .await?;
        Ok(assistant.id)
    }

    /// Create an assistant definition advertising the given tool schemas.
    pub async fn create_assistant(
        &self,
        name: &str,
        instructions: &str,
        model: &str,
        specs: &[ToolSpec],
    ) -> anyhow::Result<String> {
        let tools: Vec<serde_json::Value> = specs
            .iter()
            .map(|spec| json!({"type": "function", "function": spec}))
            .collect();
        let body = json!({
            "name": name,
            "instructions": instructions,
            "model": model,
            "tools": tools,
        });
        let assistant: AssistantObject =
            Self::send(self.request(reqwest::Method::POST, "/assistants").json(&body)).await?;
        Ok(assistant.id)
    }
}

impl RunClient for OpenAiRunClient {
    fn create_thread(
        &self,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ThreadHandle>> + Send + '_>> {
        Box::pin(async move {
            let thread: ThreadObject = Self::send(
                self.request(reqwest::Method::POST, "/threads")
                    .json(&json!({})),
            )
            .await?;
            Ok(ThreadHandle { id: thread.id })
        })
    }

    fn delete_thread<'a>(
        &'a self,
        thread_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let _: serde_json::Value = Self::send(
                self.request(reqwest::Method::DELETE, &format!("/threads/{thread_id}")),
            )
            .await?;
            Ok(())
        })
    }

    fn create_message<'a>(
        &'a self,
        thread_id: &'a str,
        role: MessageRole,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let body = json!({"role": role.as_str(), "content": text});
            let _: serde_json::Value = Self::send(
                self.request(
                    reqwest::Method::POST,
                    &format!("/threads/{thread_id}/messages"),
                )
                .json(&body),
            )
            .await?;
            Ok(())
        })
    }

    fn create_run<'a>(
        &'a self,
        thread_id: &'a str,
        assistant_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Run>> + Send + 'a>> {
        Box::pin(async move {
            let body = json!({"assistant_id": assistant_id});
            let run: RunObject = Self::send(
                self.request(reqwest::Method::POST, &format!("/threads/{thread_id}/runs"))
                    .json(&body),
            )
            .await?;
            Ok(run.into())
        })
    }

    fn retrieve_run<'a>(
        &'a self,
        thread_id: &'a str,
        run_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Run>> + Send + 'a>> {
        Box::pin(async move {
            let run: RunObject = Self::send(self.request(
                reqwest::Method::GET,
                &format!("/threads/{thread_id}/runs/{run_id}"),
            ))
            .await?;
            Ok(run.into())
        })
    }

    fn submit_tool_outputs<'a>(
        &'a self,
        thread_id: &'a str,
        run_id: &'a str,
        outputs: Vec<ToolOutput>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Run>> + Send + 'a>> {
        Box::pin(async move {
            let body = json!({"tool_outputs": outputs});
            let run: RunObject = Self::send(
                self.request(
                    reqwest::Method::POST,
                    &format!("/threads/{thread_id}/runs/{run_id}/submit_tool_outputs"),
                )
                .json(&body),
            )
            .await?;
            Ok(run.into())
        })
    }

    fn list_messages<'a>(
        &'a self,
        thread_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Vec<Message>>> + Send + 'a>> {
        Box::pin(async move {
            let list: MessageListObject = Self::send(self.request(
                reqwest::Method::GET,
                &format!("/threads/{thread_id}/messages"),
            ))
            .await?;
            Ok(list.data.into_iter().map(Message::from).collect())
        })
    }
}
