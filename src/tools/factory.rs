use super::github_file::GithubFileTool;
use super::registry::ToolRegistry;
use super::traits::Tool;
use super::web_request::WebRequestTool;
use super::web_search::WebSearchTool;
use crate::config::Credentials;
use crate::error::ConfigError;

/// Build the registry from the explicit enabled-tools list.
///
/// Only tools named in the list are exposed to the remote side. Unknown
/// names and missing credentials fail here, at startup, not on the first
/// mismatched tool call.
pub fn build_registry(
    enabled: &[String],
    credentials: &Credentials,
) -> crate::error::Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();

    for name in enabled {
        let tool: Box<dyn Tool> = match name.as_str() {
            "make_get_request" => Box::new(WebRequestTool::new()),
            "search_web" => {
                let key = credentials
                    .serpapi_key
                    .as_deref()
                    .ok_or(ConfigError::MissingCredential("SERPAPI_API_KEY"))?;
                Box::new(WebSearchTool::new(key))
            }
            "get_file_from_github" => {
                let token = credentials
                    .github_token
                    .as_deref()
                    .ok_or(ConfigError::MissingCredential("GITHUB_READ_TOKEN"))?;
                Box::new(GithubFileTool::new(token))
            }
            other => {
                return Err(
                    ConfigError::Validation(format!("unknown tool in enabled list: {other}"))
                        .into(),
                );
            }
        };
        registry.register(tool)?;
    }

    Ok(registry)
}
