//! Tool registry for managing available tools

use crate::schema::validate_arguments;
use crate::{Tool, ToolDefinition};
use desk_core::{Error, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Registry for managing tools
///
/// A registry is built by the caller and handed to whatever transport
/// exposes the tools. There is no process-wide instance. Tools are kept in
/// name order so listings are stable.
pub struct ToolRegistry {
    tools: RwLock<BTreeMap<String, Arc<dyn Tool>>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self {
            tools: RwLock::new(BTreeMap::new()),
        }
    }
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, returning the one it replaced if the name was taken
    pub fn register(&self, tool: Arc<dyn Tool>) -> Option<Arc<dyn Tool>> {
        let mut tools = self.tools.write().unwrap_or_else(PoisonError::into_inner);
        let name = tool.name().to_string();
        debug!("Registering tool: {}", name);
        tools.insert(name, tool)
    }

    /// Builder-style registration
    pub fn with_tool(self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.get(name).cloned()
    }

    /// List all registered tools
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.values().cloned().collect()
    }

    /// Definitions of all registered tools, in name order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.list_tools()
            .iter()
            .map(|tool| tool.definition())
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.is_empty()
    }

    /// Call a tool by name
    ///
    /// Fails with [`Error::UnknownTool`] when no tool has that name and with
    /// [`Error::InvalidParameter`] when the arguments do not fit the tool's
    /// input schema. The lock is released before the tool runs.
    pub async fn call(&self, name: &str, params: Value) -> Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;

        if let Err((field, reason)) = validate_arguments(&params, &tool.input_schema()) {
            warn!("Rejected arguments for tool {}: {} {}", name, field, reason);
            return Err(Error::invalid_parameter(field, reason));
        }

        info!("Executing tool: {}", name);
        let result = tool.execute(params).await;
        if let Err(e) = &result {
            warn!("Tool {} execution failed: {}", name, e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{object, string};
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoTool {
        name: &'static str,
    }

    #[async_trait]
    impl Tool for EchoTool {
        async fn execute(&self, params: Value) -> Result<Value> {
            Ok(json!({ "echo": params["text"] }))
        }

        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "Echo the text back"
        }

        fn input_schema(&self) -> Value {
            object(json!({ "text": string(None) }), vec!["text"])
        }
    }

    fn registry() -> ToolRegistry {
        ToolRegistry::new()
            .with_tool(Arc::new(EchoTool { name: "echo" }))
            .with_tool(Arc::new(EchoTool { name: "alpha" }))
    }

    #[test]
    fn test_register_and_list() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
        assert!(registry.get("echo").is_some());
        assert!(registry.get("missing").is_none());

        let names: Vec<String> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["alpha", "echo"]);
    }

    #[test]
    fn test_register_replaces() {
        let registry = registry();
        let replaced = registry.register(Arc::new(EchoTool { name: "echo" }));
        assert!(replaced.is_some());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_call_known_tool() {
        let registry = registry();
        let result = tokio_test::block_on(registry.call("echo", json!({"text": "hi"}))).unwrap();
        assert_eq!(result["echo"], "hi");
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let err = registry().call("delete_account", json!({})).await.unwrap_err();
        assert!(matches!(err, Error::UnknownTool(name) if name == "delete_account"));
    }

    #[tokio::test]
    async fn test_call_rejects_bad_arguments() {
        let err = registry().call("echo", json!({"text": 5})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name, .. } if name == "text"));

        let err = registry().call("echo", json!({})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name, .. } if name == "text"));
    }
}
