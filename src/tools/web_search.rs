use super::traits::Tool;
use super::types::ToolResult;
use serde::Deserialize;
use serde_json::{Value, json};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

const SERPAPI_ENDPOINT: &str = "https://serpapi.com/search.json";

/// Only results ranked this high are returned.
const TOP_RESULTS: u64 = 5;

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
}

/// Web search via the SerpAPI Google engine.
pub struct WebSearchTool {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl WebSearchTool {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            api_key: api_key.into(),
            endpoint: SERPAPI_ENDPOINT.to_string(),
        }
    }

    /// Override the search endpoint (mock servers in tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Keep only the top-ranked organic results, reduced to the fields the
/// assistant can actually use.
fn shape_organic_results(body: &Value) -> Option<Vec<Value>> {
    let organic = body.get("organic_results")?.as_array()?;
    let shaped = organic
        .iter()
        .filter(|entry| {
            entry
                .get("position")
                .and_then(Value::as_u64)
                .is_some_and(|position| position <= TOP_RESULTS)
        })
        .map(|entry| {
            json!({
                "position": entry.get("position").cloned().unwrap_or(Value::Null),
                "title": entry.get("title").cloned().unwrap_or(Value::Null),
                "link": entry.get("link").cloned().unwrap_or(Value::Null),
                "snippet": entry.get("snippet").cloned().unwrap_or(Value::Null),
            })
        })
        .collect();
    Some(shaped)
}

impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "search_web"
    }

    fn description(&self) -> &str {
        "Make a web search with a query"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query for web search."
                }
            },
            "required": ["query"]
        })
    }

    fn execute<'a>(
        &'a self,
        args: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send + 'a>> {
        Box::pin(async move {
            let args: SearchArgs = serde_json::from_value(args)?;

            let response = self
                .client
                .get(&self.endpoint)
                .query(&[
                    ("engine", "google"),
                    ("q", args.query.as_str()),
                    ("api_key", self.api_key.as_str()),
                ])
                .send()
                .await;

            let body: Value = match response {
                Ok(response) => match response.json().await {
                    Ok(body) => body,
                    Err(err) => {
                        return Ok(ToolResult::failed(format!("search response invalid: {err}")));
                    }
                },
                Err(err) => return Ok(ToolResult::failed(format!("search failed: {err}"))),
            };

            if let Some(error) = body.get("error").and_then(Value::as_str) {
                return Ok(ToolResult::failed(format!("search failed: {error}")));
            }

            match shape_organic_results(&body) {
                Some(results) => Ok(ToolResult::ok(serde_json::to_string(&results)?)),
                None => Ok(ToolResult::failed(
                    "search response had no organic_results",
                )),
            }
        })
    }
}
