use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::response::{AgentResponse, ToolCallRecord};
use crate::session::Session;
use hawkins_core::message::{ContentBlock, ToolResult, ToolUse};
use hawkins_core::{Context, Message, Role, TokenUsage, ToolInvocation, ToolObserver};
use hawkins_llm::{CompletionRequest, LlmProvider};
use hawkins_tools::{ToolError, ToolExecutor};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// One agent run: model turns interleaved with tool calls until a final answer.
pub struct Executor {
    config: AgentConfig,
    llm: Arc<dyn LlmProvider>,
    tools: Option<Arc<ToolExecutor>>,
    observers: Vec<Arc<dyn ToolObserver>>,
}

impl Executor {
    pub fn new(
        config: AgentConfig,
        llm: Arc<dyn LlmProvider>,
        tools: Option<Arc<ToolExecutor>>,
    ) -> Self {
        Self {
            config,
            llm,
            tools,
            observers: Vec::new(),
        }
    }

    pub fn with_observers(mut self, observers: Vec<Arc<dyn ToolObserver>>) -> Self {
        self.observers = observers;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ToolObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub async fn execute(&self, session: &Session, user_input: &str) -> Result<AgentResponse> {
        let ctx = Context::new().with_session(session.id());
        self.execute_with_context(&ctx, session, user_input).await
    }

    pub async fn execute_with_context(
        &self,
        ctx: &Context,
        session: &Session,
        user_input: &str,
    ) -> Result<AgentResponse> {
        session.add_message(Message::user(user_input));

        let mut all_tool_calls = Vec::new();
        let mut usage = TokenUsage::default();
        let mut iterations = 0;

        loop {
            if ctx.is_cancelled() {
                return Err(AgentError::Cancelled);
            }

            iterations += 1;
            session.increment_iterations();

            if iterations > self.config.max_iterations {
                return Err(AgentError::MaxIterationsReached(self.config.max_iterations));
            }

            info!(iteration = iterations, agent = %self.config.name, "Starting agent loop iteration");

            let request = self.build_request(session);
            let cancellation = ctx.cancellation_token();
            let response = tokio::select! {
                response = self.llm.complete(request) => response?,
                _ = cancellation.cancelled() => return Err(AgentError::Cancelled),
            };

            usage.accumulate(&response.usage);
            session.add_usage(&response.usage);

            let tool_uses = response.message.tool_uses();

            if tool_uses.is_empty() {
                let text = response.text_content();
                session.add_message(Message::assistant(&text));

                return Ok(AgentResponse::new(session.id(), text)
                    .with_tool_calls(all_tool_calls)
                    .with_iterations(iterations)
                    .with_usage(usage));
            }

            let mut assistant_content = Vec::new();
            let text = response.text_content();
            if !text.is_empty() {
                assistant_content.push(ContentBlock::text(text));
            }
            for tu in &tool_uses {
                assistant_content.push(ContentBlock::tool_use((*tu).clone()));
            }
            session.add_message(Message::new(Role::Assistant, assistant_content));

            let records = self.execute_tools(ctx, session, &tool_uses).await?;
            session.increment_tool_calls(records.len());

            let tool_result_content: Vec<ContentBlock> = records
                .iter()
                .map(|record| {
                    if record.is_error {
                        ContentBlock::tool_result(ToolResult::error(&record.id, &record.output))
                    } else {
                        ContentBlock::tool_result(ToolResult::success(&record.id, &record.output))
                    }
                })
                .collect();

            session.add_message(Message::tool(tool_result_content));
            all_tool_calls.extend(records);
        }
    }

    fn build_request(&self, session: &Session) -> CompletionRequest {
        let messages = session.last_messages(self.config.max_context_messages);

        let mut request = CompletionRequest::new(&self.config.model, messages)
            .with_system(&self.config.system_prompt)
            .with_temperature(self.config.temperature);

        if let Some(max_tokens) = self.config.max_tokens {
            request = request.with_max_tokens(max_tokens as u32);
        }

        if self.config.tools_enabled {
            if let Some(tools) = &self.tools {
                let definitions = tools.registry().definitions();
                if !definitions.is_empty() {
                    request = request.with_tools(definitions);
                }
            }
        }

        request
    }

    fn notify(&self, invocation: &ToolInvocation) {
        debug!(
            tool = %invocation.tool_name,
            observers = self.observers.len(),
            "Notifying tool start"
        );
        for observer in &self.observers {
            observer.on_tool_start(invocation);
        }
    }

    async fn execute_tools(
        &self,
        ctx: &Context,
        session: &Session,
        tool_uses: &[&ToolUse],
    ) -> Result<Vec<ToolCallRecord>> {
        let tool_ctx = ctx.child().with_timeout(self.config.tool_timeout());
        let mut records = Vec::with_capacity(tool_uses.len());

        for tu in tool_uses {
            if ctx.is_cancelled() {
                warn!(tool = %tu.name, "Run cancelled before tool start");
                return Err(AgentError::Cancelled);
            }

            let invocation =
                ToolInvocation::new(&tu.name, tu.input.clone()).with_session(session.id());
            self.notify(&invocation);

            let Some(tools) = &self.tools else {
                records.push(ToolCallRecord::error(
                    &tu.id,
                    &tu.name,
                    tu.input.clone(),
                    format!("Tool execution not available: {}", tu.name),
                    0,
                ));
                continue;
            };

            let start = Instant::now();
            let result = tools.execute(&tool_ctx, &tu.name, tu.input.clone()).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(output) => {
                    info!(tool = %tu.name, duration_ms, is_error = output.is_error, "Tool completed");
                    records.push(ToolCallRecord::success(
                        &tu.id,
                        &tu.name,
                        tu.input.clone(),
                        &output,
                        duration_ms,
                    ));
                }
                Err(ToolError::Cancelled) => return Err(AgentError::Cancelled),
                Err(e) => {
                    warn!(tool = %tu.name, error = %e, "Tool execution failed");
                    records.push(ToolCallRecord::error(
                        &tu.id,
                        &tu.name,
                        tu.input.clone(),
                        e.to_string(),
                        duration_ms,
                    ));
                }
            }
        }

        Ok(records)
    }
}
