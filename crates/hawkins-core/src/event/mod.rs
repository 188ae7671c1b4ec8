use crate::types::{InvocationId, SessionId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    pub fn new(input: u32, output: u32) -> Self {
        Self {
            input_tokens: input,
            output_tokens: output,
        }
    }

    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }

    pub fn accumulate(&mut self, other: &TokenUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

/// Notification that a tool is about to run with the given raw input.
///
/// Emitted by the agent once per requested tool call, before the tool body
/// executes and regardless of whether the tool exists or later fails.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub id: InvocationId,
    pub tool_name: String,
    pub input: Value,
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
}

impl ToolInvocation {
    pub fn new(tool_name: impl Into<String>, input: Value) -> Self {
        Self {
            id: InvocationId::new(),
            tool_name: tool_name.into(),
            input,
            timestamp: Timestamp::now(),
            session_id: None,
        }
    }

    pub fn with_session(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// The input rendered as plain text: the string itself for string inputs,
    /// compact JSON otherwise.
    pub fn input_text(&self) -> String {
        match &self.input {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Receives tool invocation events from an agent run.
///
/// Called synchronously on the agent's task, so implementations must not block
/// for long. Shared across concurrent runs, hence `Send + Sync` and `&self`.
pub trait ToolObserver: Send + Sync {
    fn on_tool_start(&self, event: &ToolInvocation);
}

impl<F> ToolObserver for F
where
    F: Fn(&ToolInvocation) + Send + Sync,
{
    fn on_tool_start(&self, event: &ToolInvocation) {
        self(event)
    }
}
