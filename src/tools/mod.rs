//! Tool abstraction and the ordered catalog the agent dispatches against.
//!
//! A tool is an external named capability: one string in, one string out.
//! The catalog owns the tools for the lifetime of one agent configuration
//! and renders the two textual views the prompt embeds (description block
//! and comma-joined name list). Both views iterate the catalog in the same
//! order, so the names the format instructions advertise always match the
//! descriptions above them.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AgentError;

/// An external capability the agent can invoke by name.
///
/// Implementations take exactly one positional string input. Tools that
/// need more structure should accept a serialized payload in that single
/// string; the fixed action grammar extracts exactly one input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name, unique within a catalog. Duplicate names make dispatch
    /// ambiguous (first match wins); keeping them unique is the caller's
    /// responsibility.
    fn name(&self) -> &str;

    /// One-line description shown to the model.
    fn description(&self) -> &str;

    /// Names of the inputs this tool accepts. The agent loop requires
    /// exactly one; the default is a single `"input"` key.
    fn input_keys(&self) -> Vec<String> {
        vec!["input".to_string()]
    }

    /// Run the tool. Errors are recorded as observations by the agent
    /// loop rather than aborting the run.
    async fn invoke(&self, input: &str) -> anyhow::Result<String>;
}

/// Ordered, read-only set of tools available to one agent.
#[derive(Clone)]
pub struct ToolCatalog {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolCatalog {
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        Self { tools }
    }

    /// `"{name}: {description}"` per tool, newline-separated, catalog order.
    pub fn render_descriptions(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("{}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Tool names joined with `", "`, same order as the description block.
    pub fn render_names(&self) -> String {
        self.tools
            .iter()
            .map(|t| t.name().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Reject catalogs containing multi-input tools.
    ///
    /// The action grammar extracts exactly one input string, so this check
    /// is mandatory before constructing an agent.
    pub fn validate_single_input(&self) -> Result<(), AgentError> {
        for tool in &self.tools {
            let keys = tool.input_keys();
            if keys.len() != 1 {
                return Err(AgentError::Configuration(format!(
                    "tool '{}' declares {} inputs; agent tools must accept exactly one",
                    tool.name(),
                    keys.len()
                )));
            }
        }
        Ok(())
    }

    /// Look up a tool by name. First match wins.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
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

    struct StubTool {
        name: &'static str,
        description: &'static str,
        keys: Vec<String>,
    }

    impl StubTool {
        fn new(name: &'static str, description: &'static str) -> Self {
            Self {
                name,
                description,
                keys: vec!["input".to_string()],
            }
        }
    }

    #[async_trait]
    impl Tool for StubTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            self.description
        }

        fn input_keys(&self) -> Vec<String> {
            self.keys.clone()
        }

        async fn invoke(&self, input: &str) -> anyhow::Result<String> {
            Ok(format!("{}:{}", self.name, input))
        }
    }

    fn catalog() -> ToolCatalog {
        ToolCatalog::new(vec![
            Arc::new(StubTool::new("Search", "Look things up on the web.")),
            Arc::new(StubTool::new("Calculator", "Evaluate arithmetic.")),
        ])
    }

    #[test]
    fn descriptions_one_line_per_tool_in_order() {
        assert_eq!(
            catalog().render_descriptions(),
            "Search: Look things up on the web.\nCalculator: Evaluate arithmetic."
        );
    }

    #[test]
    fn names_comma_joined() {
        assert_eq!(catalog().render_names(), "Search, Calculator");
    }

    #[test]
    fn single_input_validation_accepts_default_tools() {
        assert!(catalog().validate_single_input().is_ok());
    }

    #[test]
    fn single_input_validation_rejects_two_input_tool() {
        let mut bad = StubTool::new("Multi", "Takes two inputs.");
        bad.keys = vec!["a".to_string(), "b".to_string()];
        let catalog = ToolCatalog::new(vec![Arc::new(bad)]);
        let err = catalog.validate_single_input().unwrap_err();
        assert!(matches!(err, AgentError::Configuration(_)));
    }

    #[test]
    fn lookup_by_name() {
        let catalog = catalog();
        assert!(catalog.get("Calculator").is_some());
        assert!(catalog.get("Missing").is_none());
    }

    #[test]
    fn invoke_returns_tool_output() {
        let catalog = catalog();
        let tool = catalog.get("Search").unwrap();
        let out = tokio_test::block_on(tool.invoke("weather")).unwrap();
        assert_eq!(out, "Search:weather");
    }
}
