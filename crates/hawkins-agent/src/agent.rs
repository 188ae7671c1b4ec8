use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::executor::Executor;
use crate::response::AgentResponse;
use crate::session::Session;
use hawkins_core::{Context, ToolObserver};
use hawkins_llm::LlmProvider;
use hawkins_tools::{ToolExecutor, ToolRegistry};
use std::sync::Arc;

pub struct Agent {
    config: AgentConfig,
    llm: Arc<dyn LlmProvider>,
    tools: Option<Arc<ToolExecutor>>,
    observers: Vec<Arc<dyn ToolObserver>>,
}

impl Agent {
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn llm(&self) -> &Arc<dyn LlmProvider> {
        &self.llm
    }

    pub fn tool_registry(&self) -> Option<&ToolRegistry> {
        self.tools.as_ref().map(|t| t.registry())
    }

    pub fn create_session(&self) -> Session {
        Session::new()
    }

    pub async fn chat(&self, session: &Session, message: &str) -> Result<String> {
        let response = self.process(session, message).await?;
        Ok(response.text)
    }

    pub async fn process(&self, session: &Session, message: &str) -> Result<AgentResponse> {
        self.process_with(session, message, &[]).await
    }

    /// Like `process`, with extra observers notified for this call only, after
    /// the agent's own.
    pub async fn process_with(
        &self,
        session: &Session,
        message: &str,
        extra_observers: &[Arc<dyn ToolObserver>],
    ) -> Result<AgentResponse> {
        let ctx = Context::new().with_session(session.id());
        self.process_with_context(&ctx, session, message, extra_observers)
            .await
    }

    pub async fn process_with_context(
        &self,
        ctx: &Context,
        session: &Session,
        message: &str,
        extra_observers: &[Arc<dyn ToolObserver>],
    ) -> Result<AgentResponse> {
        let observers = self
            .observers
            .iter()
            .chain(extra_observers)
            .cloned()
            .collect();

        let executor = Executor::new(self.config.clone(), self.llm.clone(), self.tools.clone())
            .with_observers(observers);
        executor.execute_with_context(ctx, session, message).await
    }
}

#[derive(Default)]
pub struct AgentBuilder {
    config: Option<AgentConfig>,
    name: Option<String>,
    system_prompt: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
    max_iterations: Option<usize>,
    tools_enabled: Option<bool>,
    llm: Option<Arc<dyn LlmProvider>>,
    tool_registry: Option<Arc<ToolRegistry>>,
    observers: Vec<Arc<dyn ToolObserver>>,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn tools_enabled(mut self, enabled: bool) -> Self {
        self.tools_enabled = Some(enabled);
        self
    }

    pub fn llm(mut self, llm: Arc<dyn LlmProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = Some(registry);
        self
    }

    /// Adds an observer notified before every tool call of every run.
    pub fn observer(mut self, observer: Arc<dyn ToolObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn build(self) -> Result<Agent> {
        let llm = self.llm.ok_or_else(|| AgentError::config("LLM provider is required"))?;

        let mut config = self.config.unwrap_or_default();

        if let Some(name) = self.name {
            config.name = name;
        }
        if let Some(prompt) = self.system_prompt {
            config.system_prompt = prompt;
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(temp) = self.temperature {
            config.temperature = temp;
        }
        if let Some(max) = self.max_tokens {
            config.max_tokens = Some(max);
        }
        if let Some(max) = self.max_iterations {
            config.max_iterations = max;
        }
        if let Some(enabled) = self.tools_enabled {
            config.tools_enabled = enabled;
        }

        if config.max_iterations == 0 {
            return Err(AgentError::config("max_iterations must be at least 1"));
        }

        let tool_timeout = config.tool_timeout();
        let tools = self
            .tool_registry
            .map(|registry| Arc::new(ToolExecutor::new(registry).with_timeout(tool_timeout)));

        Ok(Agent {
            config,
            llm,
            tools,
            observers: self.observers,
        })
    }
}
