use super::openai::OpenAiRunClient;
use crate::config::AssistantConfig;
use crate::error::ConfigError;
use crate::tools::ToolRegistry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Record of what was advertised when the remote assistant definition was
/// created. The runtime-enabled tool set must match it exactly: the remote
/// side will keep requesting whatever it was told about at creation time,
/// so a drifted set fails fast here instead of failing late on the first
/// mismatched tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantManifest {
    pub assistant_id: String,
    pub tool_names: Vec<String>,
}

impl AssistantManifest {
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path)?;
        let manifest = serde_json::from_str(&raw)
            .map_err(|err| ConfigError::Load(format!("assistant manifest: {err}")))?;
        Ok(Some(manifest))
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(self)
            .map_err(|err| ConfigError::Load(format!("assistant manifest: {err}")))?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    /// Check the enabled set against the advertised set, ignoring order.
    pub fn validate_enabled(&self, enabled: &[String]) -> Result<(), ConfigError> {
        let mut advertised = self.tool_names.clone();
        advertised.sort_unstable();
        let mut current = enabled.to_vec();
        current.sort_unstable();
        if advertised != current {
            return Err(ConfigError::AdvertisedToolsMismatch {
                enabled: current,
                advertised,
            });
        }
        Ok(())
    }
}

/// Where the manifest lives by default.
pub fn default_manifest_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "astrid")
        .map(|dirs| dirs.data_dir().join("assistant.json"))
        .unwrap_or_else(|| PathBuf::from(".astrid/assistant.json"))
}

/// Resolve the assistant to use for this session.
///
/// Preference order: an explicitly configured id, then the id recorded in
/// the manifest, then a freshly created assistant advertising the registry's
/// current tool schemas. Whenever an id is resolved, the enabled tool set is
/// validated against the manifest.
pub async fn ensure_assistant(
    client: &OpenAiRunClient,
    config: &AssistantConfig,
    configured_id: Option<&str>,
    registry: &ToolRegistry,
    manifest_path: &Path,
) -> crate::error::Result<String> {
    let enabled = registry.tool_names();

    if let Some(id) = configured_id {
        let id = client.retrieve_assistant(id).await?;
        match AssistantManifest::load(manifest_path)? {
            Some(manifest) if manifest.assistant_id == id => {
                manifest.validate_enabled(&enabled)?;
            }
            previous => {
                // No usable baseline; record one so the next startup can
                // validate against it.
                if let Some(previous) = previous {
                    warn!(
                        assistant_id = %id,
                        previous_id = %previous.assistant_id,
                        "configured assistant differs from the recorded one, replacing the manifest baseline"
                    );
                } else {
                    warn!(
                        assistant_id = %id,
                        "no manifest for configured assistant, recording current tool set"
                    );
                }
                AssistantManifest {
                    assistant_id: id.clone(),
                    tool_names: enabled,
                }
                .save(manifest_path)?;
            }
        }
        return Ok(id);
    }

    if let Some(manifest) = AssistantManifest::load(manifest_path)? {
        manifest.validate_enabled(&enabled)?;
        match client.retrieve_assistant(&manifest.assistant_id).await {
            Ok(id) => return Ok(id),
            Err(err) => {
                warn!(
                    assistant_id = %manifest.assistant_id,
                    error = %err,
                    "recorded assistant unavailable, creating a new one"
                );
            }
        }
    }

    let id = client
        .create_assistant(
            &config.name,
            &config.instructions,
            &config.model,
            &registry.specs(),
        )
        .await?;
    info!(assistant_id = %id, "created new assistant");
    AssistantManifest {
        assistant_id: id.clone(),
        tool_names: enabled,
    }
    .save(manifest_path)?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assistant.json");
        let manifest = AssistantManifest {
            assistant_id: "asst_1".into(),
            tool_names: vec!["make_get_request".into()],
        };
        manifest.save(&path).unwrap();

        let loaded = AssistantManifest::load(&path).unwrap().unwrap();
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn missing_manifest_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(AssistantManifest::load(&path).unwrap().is_none());
    }

    #[test]
    fn validation_ignores_order() {
        let manifest = AssistantManifest {
            assistant_id: "asst_1".into(),
            tool_names: vec!["search_web".into(), "make_get_request".into()],
        };
        let enabled = vec!["make_get_request".to_string(), "search_web".to_string()];
        assert!(manifest.validate_enabled(&enabled).is_ok());
    }

    #[test]
    fn validation_rejects_drifted_set() {
        let manifest = AssistantManifest {
            assistant_id: "asst_1".into(),
            tool_names: vec!["make_get_request".into()],
        };
        let enabled = vec!["search_web".to_string()];
        let err = manifest.validate_enabled(&enabled).unwrap_err();
        assert!(matches!(err, ConfigError::AdvertisedToolsMismatch { .. }));
    }

    #[test]
    fn corrupt_manifest_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assistant.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = AssistantManifest::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[tokio::test]
    async fn configured_id_replaces_a_stale_manifest_baseline() {
        use crate::tools::traits::test_tools::EchoTool;
        use wiremock::matchers::{method, path as url_path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/assistants/asst_new"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "asst_new"
            })))
            .mount(&server)
            .await;
        let client = OpenAiRunClient::new("sk-test").with_base_url(server.uri());

        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("assistant.json");
        AssistantManifest {
            assistant_id: "asst_old".into(),
            tool_names: vec!["search_web".into()],
        }
        .save(&manifest_path)
        .unwrap();

        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();

        let id = ensure_assistant(
            &client,
            &AssistantConfig::default(),
            Some("asst_new"),
            &registry,
            &manifest_path,
        )
        .await
        .unwrap();

        assert_eq!(id, "asst_new");
        let recorded = AssistantManifest::load(&manifest_path).unwrap().unwrap();
        assert_eq!(recorded.assistant_id, "asst_new");
        assert_eq!(recorded.tool_names, vec!["echo".to_string()]);
    }
}
