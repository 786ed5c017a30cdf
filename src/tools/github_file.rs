use super::traits::Tool;
use super::types::ToolResult;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_json::{Value, json};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

const GITHUB_API: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct GithubFileArgs {
    repository_owner: String,
    repository_name: String,
    file_path: String,
}

/// Fetches one file from a GitHub repository via the contents API.
pub struct GithubFileTool {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl GithubFileTool {
    pub fn new(token: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            token: token.into(),
            base_url: GITHUB_API.to_string(),
        }
    }

    /// Override the API base (mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Decode the `content` field of a contents-API response. GitHub wraps the
/// base64 payload at 60 columns, so newlines are stripped first.
fn decode_content(body: &Value) -> anyhow::Result<String> {
    let encoding = body.get("encoding").and_then(Value::as_str).unwrap_or("");
    if encoding != "base64" {
        anyhow::bail!("unexpected content encoding: {encoding:?}");
    }
    let content = body
        .get("content")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow::anyhow!("response has no content field"))?;
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

impl Tool for GithubFileTool {
    fn name(&self) -> &str {
        "get_file_from_github"
    }

    fn description(&self) -> &str {
        "Return contents of a file from Github, typically code."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "repository_owner": {
                    "type": "string",
                    "description": "Owner of the repository"
                },
                "repository_name": {
                    "type": "string",
                    "description": "Name of the repository"
                },
                "file_path": {
                    "type": "string",
                    "description": "Path to the file in the repository"
                }
            },
            "required": ["repository_owner", "repository_name", "file_path"]
        })
    }

    fn execute<'a>(
        &'a self,
        args: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move {
            let args: GithubFileArgs = serde_json::from_value(args)?;

            let url = format!(
                "{}/repos/{}/{}/contents/{}",
                self.base_url, args.repository_owner, args.repository_name, args.file_path
            );

            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .header("Accept", "application/vnd.github+json")
                .header("User-Agent", "astrid")
                .send()
                .await;

            let response = match response {
                Ok(response) => response,
                Err(err) => return Ok(ToolResult::failed(format!("request failed: {err}"))),
            };

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Ok(ToolResult::failed(format!(
                    "github returned {status}: {body}"
                )));
            }

            let body: Value = match response.json().await {
                Ok(body) => body,
                Err(err) => return Ok(ToolResult::failed(format!("response invalid: {err}"))),
            };

            match decode_content(&body) {
                Ok(text) => Ok(ToolResult::ok(text)),
                Err(err) => Ok(ToolResult::failed(err.to_string())),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn decode_strips_wrapping_newlines() {
        // "fn main() {}" encoded and wrapped the way GitHub returns it.
        let body = json!({"encoding": "base64", "content": "Zm4gbWFp\nbigpIHt9\n"});
        assert_eq!(decode_content(&body).unwrap(), "fn main() {}");
    }

    #[test]
    fn decode_rejects_unknown_encoding() {
        let body = json!({"encoding": "utf-8", "content": "plain"});
        assert!(decode_content(&body).is_err());
    }

    #[test]
    fn decode_rejects_missing_content() {
        let body = json!({"encoding": "base64"});
        assert!(decode_content(&body).is_err());
    }

    #[tokio::test]
    async fn fetches_and_decodes_a_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/rust-lang/rust/contents/README.md"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "encoding": "base64",
                "content": BASE64.encode("# Rust"),
            })))
            .mount(&server)
            .await;

        let tool = GithubFileTool::new("token").with_base_url(server.uri());
        let args = json!({
            "repository_owner": "rust-lang",
            "repository_name": "rust",
            "file_path": "README.md"
        });
        let result = tool.execute(args).await.unwrap();

        assert!(result.success);
        assert_eq!(result.output, "# Rust");
    }

    #[tokio::test]
    async fn missing_file_is_a_failed_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let tool = GithubFileTool::new("token").with_base_url(server.uri());
        let args = json!({
            "repository_owner": "nobody",
            "repository_name": "nothing",
            "file_path": "missing.rs"
        });
        let result = tool.execute(args).await.unwrap();

        assert!(!result.success);
        assert!(result.error.as_deref().is_some_and(|msg| msg.contains("404")));
    }
}
