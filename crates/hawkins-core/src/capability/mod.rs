use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    TextInput,
    TextOutput,
    ToolUse,
    FunctionCalling,
    SystemPrompt,
    MultiTurn,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default)]
    inner: HashSet<Capability>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, cap: Capability) -> Self {
        self.inner.insert(cap);
        self
    }

    pub fn has(&self, cap: &Capability) -> bool {
        self.inner.contains(cap)
    }

    pub fn has_all(&self, caps: &[Capability]) -> bool {
        caps.iter().all(|c| self.has(c))
    }

    pub fn text_basic() -> Self {
        Self::new()
            .with(Capability::TextInput)
            .with(Capability::TextOutput)
            .with(Capability::SystemPrompt)
            .with(Capability::MultiTurn)
    }

    pub fn tool_capable() -> Self {
        Self::text_basic()
            .with(Capability::ToolUse)
            .with(Capability::FunctionCalling)
    }

    /// Whether a provider with these capabilities can drive a tool-using agent.
    pub fn supports_tools(&self) -> bool {
        self.has_all(&[Capability::ToolUse, Capability::FunctionCalling])
    }
}
