use super::traits::Tool;
use super::types::ToolSpec;
use crate::error::ToolError;
use std::collections::HashMap;
use std::sync::Arc;

/// Static registry of enabled tools.
///
/// Built once during process setup from the explicit enabled-tools list and
/// never mutated after the session starts. The advertised spec set must
/// exactly match what the remote assistant definition was created with;
/// [`crate::remote::assistant`] enforces that at startup.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Names are unique; re-registering is an error.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::Duplicate { name });
        }
        self.tools.insert(name, Arc::from(tool));
        Ok(())
    }

    /// Look up a tool by name.
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn Tool>, ToolError> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| ToolError::NotFound {
                name: name.to_string(),
            })
    }

    /// Sorted list of registered tool names.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Specs for all registered tools, sorted by name for a stable
    /// advertisement order.
    pub fn specs(&self) -> Vec<ToolSpec> {
        let mut specs: Vec<ToolSpec> = self.tools.values().map(|tool| tool.spec()).collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::traits::test_tools::EchoTool;

    #[test]
    fn register_rejects_duplicate_names() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();

        let err = registry.register(Box::new(EchoTool)).unwrap_err();
        assert!(matches!(err, ToolError::Duplicate { name } if name == "echo"));
    }

    #[test]
    fn lookup_unknown_name_fails() {
        let registry = ToolRegistry::new();
        let err = registry.lookup("nonexistent").unwrap_err();
        assert!(matches!(err, ToolError::NotFound { name } if name == "nonexistent"));
    }

    #[test]
    fn lookup_is_idempotent() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();

        let first = registry.lookup("echo").unwrap();
        let second = registry.lookup("echo").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn specs_are_sorted_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();

        let specs = registry.specs();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "echo");
        assert_eq!(registry.tool_names(), vec!["echo".to_string()]);
    }
}
