use crate::error::{Result, ToolError};
use crate::traits::Tool;
use hawkins_core::ToolDefinition;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

/// Name-keyed tool catalogue. Iteration follows registration order.
pub struct ToolRegistry {
    tools: IndexMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
        }
    }

    /// Adds a tool. A duplicate name leaves the registry untouched.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::AlreadyRegistered(name));
        }
        debug!(tool = %name, "Registered tool");
        self.tools.insert(name, tool);
        Ok(())
    }

    pub fn register_boxed(&mut self, tool: Box<dyn Tool>) -> Result<()> {
        self.register(Arc::from(tool))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn list(&self) -> Vec<&Arc<dyn Tool>> {
        self.tools.values().collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|t| t.definition().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ToolOutput;
    use async_trait::async_trait;
    use hawkins_core::{Context, ToolDefinition};
    use serde_json::Value;

    struct MockTool {
        def: ToolDefinition,
    }

    impl MockTool {
        fn new(name: &str, description: &str) -> Self {
            Self {
                def: ToolDefinition::new(name, description),
            }
        }
    }

    #[async_trait]
    impl Tool for MockTool {
        fn definition(&self) -> &ToolDefinition {
            &self.def
        }

        async fn execute(&self, _ctx: &Context, _input: Value) -> Result<ToolOutput> {
            Ok(ToolOutput::text(self.def.description.clone()))
        }
    }

    #[test]
    fn test_registry_register() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry
            .register(Arc::new(MockTool::new("consult_demogorgon", "ask it")))
            .unwrap();

        assert!(registry.contains("consult_demogorgon"));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("consult_demogorgon").is_some());
        assert!(registry.get("summon_mind_flayer").is_none());
    }

    #[test]
    fn test_registry_duplicate_keeps_first() {
        let mut registry = ToolRegistry::new();

        registry
            .register(Arc::new(MockTool::new("dup", "first")))
            .unwrap();
        let result = registry.register(Arc::new(MockTool::new("dup", "second")));

        assert!(matches!(result, Err(ToolError::AlreadyRegistered(ref name)) if name == "dup"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("dup").unwrap().definition().description, "first");
    }

    #[test]
    fn test_registry_preserves_order() {
        let mut registry = ToolRegistry::new();
        for name in ["tool_c", "tool_a", "tool_b"] {
            registry
                .register(Arc::new(MockTool::new(name, "mock")))
                .unwrap();
        }

        assert_eq!(registry.names(), vec!["tool_c", "tool_a", "tool_b"]);

        let listed: Vec<&str> = registry.list().iter().map(|t| t.name()).collect();
        assert_eq!(listed, vec!["tool_c", "tool_a", "tool_b"]);

        let defs: Vec<String> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(defs, vec!["tool_c", "tool_a", "tool_b"]);
    }

    #[test]
    fn test_registry_register_boxed() {
        let mut registry = ToolRegistry::default();
        registry
            .register_boxed(Box::new(MockTool::new("boxed", "mock")))
            .unwrap();
        assert_eq!(format!("{:?}", registry), "ToolRegistry { tools: [\"boxed\"] }");
    }
}
