use super::traits::Tool;
use super::types::ToolResult;
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Maximum time for one GET request.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct GetRequestArgs {
    url: String,
}

/// Plain HTTP GET tool — returns the response body as text.
pub struct WebRequestTool {
    client: reqwest::Client,
}

impl WebRequestTool {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }
}

impl Default for WebRequestTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for WebRequestTool {
    fn name(&self) -> &str {
        "make_get_request"
    }

    fn description(&self) -> &str {
        "Make a GET web request to an URL"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The URL address of the web request."
                }
            },
            "required": ["url"]
        })
    }

    fn execute<'a>(
        &'a self,
        args: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move {
            let args: GetRequestArgs = serde_json::from_value(args)?;

            let url = match url::Url::parse(&args.url) {
                Ok(url) => url,
                Err(err) => return Ok(ToolResult::failed(format!("invalid url: {err}"))),
            };

            match self.client.get(url).send().await {
                Ok(response) => match response.text().await {
                    Ok(body) => Ok(ToolResult::ok(body)),
                    Err(err) => Ok(ToolResult::failed(format!("failed to read body: {err}"))),
                },
                Err(err) => Ok(ToolResult::failed(format!("request failed: {err}"))),
            }
        })
    }
}
