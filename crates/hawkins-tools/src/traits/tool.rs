use crate::error::{Result, ToolError};
use async_trait::async_trait;
use hawkins_core::{Context, Metadata, ToolDefinition};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: String,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    #[serde(default)]
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Metadata::new(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: message.into(),
            metadata: Metadata::new(),
            is_error: true,
        }
    }

    pub fn with_metadata<K: Into<String>, V: Serialize>(mut self, key: K, value: V) -> Self {
        self.metadata.insert(key, value);
        self
    }
}

/// A named, stateless text-to-text function the agent can call.
#[async_trait]
pub trait Tool: Send + Sync {
    fn definition(&self) -> &ToolDefinition;

    async fn execute(&self, ctx: &Context, input: Value) -> Result<ToolOutput>;

    /// Checks the argument shape against the definition before `execute` runs.
    ///
    /// Accepts an object carrying every required parameter, or a bare string
    /// when the tool has at most one required parameter.
    fn validate_input(&self, input: &Value) -> Result<()> {
        let required = self
            .definition()
            .parameters
            .required
            .as_deref()
            .unwrap_or_default();

        match input {
            Value::Object(map) => {
                for name in required {
                    if map.get(name).map_or(true, Value::is_null) {
                        return Err(ToolError::invalid_input(format!(
                            "missing required parameter '{}'",
                            name
                        )));
                    }
                }
                Ok(())
            }
            Value::String(_) if required.len() <= 1 => Ok(()),
            Value::Null if required.is_empty() => Ok(()),
            other => Err(ToolError::invalid_input(format!(
                "expected an object of named arguments, got {}",
                other
            ))),
        }
    }

    fn name(&self) -> &str {
        &self.definition().name
    }
}

/// Deserializes tool arguments, treating a bare string as the `primary` argument.
pub fn parse_input<T: DeserializeOwned>(input: Value, primary: &str) -> Result<T> {
    let input = match input {
        Value::String(text) => {
            let mut map = Map::new();
            map.insert(primary.to_string(), Value::String(text));
            Value::Object(map)
        }
        other => other,
    };

    serde_json::from_value(input).map_err(|e| ToolError::invalid_input(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hawkins_core::ToolParameter;

    struct QueryTool {
        def: ToolDefinition,
    }

    #[async_trait]
    impl Tool for QueryTool {
        fn definition(&self) -> &ToolDefinition {
            &self.def
        }

        async fn execute(&self, _ctx: &Context, _input: Value) -> Result<ToolOutput> {
            Ok(ToolOutput::text("ok"))
        }
    }

    fn query_tool() -> QueryTool {
        QueryTool {
            def: ToolDefinition::new("check_hawkins_records", "Search records")
                .with_required_param("query", ToolParameter::string()),
        }
    }

    #[derive(Deserialize)]
    struct QueryInput {
        query: String,
        #[serde(default)]
        limit: Option<u32>,
    }

    #[test]
    fn test_tool_output_text() {
        let output = ToolOutput::text("Records show portals have opened.");
        assert_eq!(output.content, "Records show portals have opened.");
        assert!(!output.is_error);
    }

    #[test]
    fn test_tool_output_error_with_metadata() {
        let output = ToolOutput::error("no such record").with_metadata("query", "portal");
        assert!(output.is_error);
        assert_eq!(output.metadata.get::<String>("query").as_deref(), Some("portal"));
    }

    #[test]
    fn test_validate_input() {
        let tool = query_tool();
        assert!(tool.validate_input(&serde_json::json!({"query": "portal"})).is_ok());
        assert!(tool.validate_input(&Value::String("portal".into())).is_ok());
        assert!(matches!(
            tool.validate_input(&serde_json::json!({})),
            Err(ToolError::InvalidInput(_))
        ));
        assert!(matches!(
            tool.validate_input(&serde_json::json!({"query": null})),
            Err(ToolError::InvalidInput(_))
        ));
        assert!(tool.validate_input(&serde_json::json!(42)).is_err());
    }

    #[test]
    fn test_parse_input_accepts_bare_string() {
        let input: QueryInput = parse_input(Value::String("portal".into()), "query").unwrap();
        assert_eq!(input.query, "portal");
        assert!(input.limit.is_none());

        let input: QueryInput =
            parse_input(serde_json::json!({"query": "monsters", "limit": 2}), "query").unwrap();
        assert_eq!(input.query, "monsters");
        assert_eq!(input.limit, Some(2));
    }

    #[test]
    fn test_parse_input_rejects_wrong_types() {
        let result: Result<QueryInput> = parse_input(serde_json::json!({"query": 7}), "query");
        assert!(matches!(result, Err(ToolError::InvalidInput(_))));
    }
}
