pub mod assistant;
pub mod openai;
pub mod traits;
pub mod types;

pub use assistant::{AssistantManifest, default_manifest_path, ensure_assistant};
pub use openai::OpenAiRunClient;
pub use traits::RunClient;
pub use types::{
    ACTION_SUBMIT_TOOL_OUTPUTS, Message, MessageRole, RequiredAction, Run, RunStatus,
    ThreadHandle, ToolCallRequest, ToolOutput,
};
