pub mod factory;
pub mod github_file;
pub mod invoker;
pub mod registry;
pub mod traits;
pub mod types;
pub mod web_request;
pub mod web_search;

pub use factory::build_registry;
pub use github_file::GithubFileTool;
pub use invoker::ToolInvoker;
pub use registry::ToolRegistry;
pub use traits::Tool;
pub use types::{ToolResult, ToolSpec};
pub use web_request::WebRequestTool;
pub use web_search::WebSearchTool;
