use super::types::{Message, MessageRole, Run, ThreadHandle, ToolOutput};
use std::future::Future;
use std::pin::Pin;

/// Client for the remote run service.
///
/// The driver and session loop only ever see this trait, so tests substitute
/// a scripted double without touching process-wide state. Transport-level
/// failures surface as errors; run-level outcomes travel in [`Run::status`].
pub trait RunClient: Send + Sync {
    fn create_thread(&self)
    -> Pin<Box<dyn Future<Output = anyhow::Result<ThreadHandle>> + Send + '_>>;

    fn delete_thread<'a>(
        &'a self,
        thread_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;

    fn create_message<'a>(
        &'a self,
        thread_id: &'a str,
        role: MessageRole,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;

    fn create_run<'a>(
        &'a self,
        thread_id: &'a str,
        assistant_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Run>> + Send + 'a>>;

    fn retrieve_run<'a>(
        &'a self,
        thread_id: &'a str,
        run_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Run>> + Send + 'a>>;

    fn submit_tool_outputs<'a>(
        &'a self,
        thread_id: &'a str,
        run_id: &'a str,
        outputs: Vec<ToolOutput>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Run>> + Send + 'a>>;

    /// Messages ordered newest-first.
    fn list_messages<'a>(
        &'a self,
        thread_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Vec<Message>>> + Send + 'a>>;
}
