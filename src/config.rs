use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Polling the remote run faster than this hammers the API.
const MIN_POLL_SECS: u64 = 1;
/// Polling slower than this makes the session feel dead.
const MAX_POLL_SECS: u64 = 10;

const DEFAULT_CONFIG_FILE: &str = "astrid.toml";

/// Tunables loaded from the optional TOML config file. Credentials never
/// live here; they come from the environment (see [`Credentials`]).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub assistant: AssistantConfig,
    pub run: RunConfig,
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub name: String,
    pub instructions: String,
    pub model: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: "software-developer".to_string(),
            instructions: "ROLE: expert software developer. Research with the \
                           available tools before answering."
                .to_string(),
            model: "gpt-4o".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    /// Seconds between run-status polls. Clamped to 1-10s.
    pub poll_interval_secs: u64,
    /// Overall per-task budget; a hung remote run cannot block the session
    /// past this.
    pub task_timeout_secs: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
            task_timeout_secs: 600,
        }
    }
}

impl RunConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.clamp(MIN_POLL_SECS, MAX_POLL_SECS))
    }

    pub fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.task_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Explicit enabled-tools list; only these are exposed to the remote
    /// side. Must match the set advertised when the assistant was created.
    pub enabled: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            enabled: vec!["make_get_request".to_string()],
        }
    }
}

impl Config {
    /// Load from an explicit path, or from `astrid.toml` in the working
    /// directory when present, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::Load(format!("{}: {err}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|err| ConfigError::Load(format!("{}: {err}", path.display())))
    }
}

/// Environment-sourced credentials. Only the OpenAI key is mandatory; tool
/// keys are required lazily by the tools that need them.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub serpapi_key: Option<String>,
    pub github_token: Option<String>,
    pub assistant_id: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Ok(Self {
            api_key: non_empty("OPENAI_API_KEY")
                .ok_or(ConfigError::MissingCredential("OPENAI_API_KEY"))?,
            serpapi_key: non_empty("SERPAPI_API_KEY"),
            github_token: non_empty("GITHUB_READ_TOKEN"),
            assistant_id: non_empty("ASSISTANT_ID"),
        })
    }
}
