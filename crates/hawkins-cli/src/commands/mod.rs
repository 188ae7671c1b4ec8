pub mod ask;
pub mod chat;
pub mod run;
pub mod tools;

use colored::Colorize;
use hawkins_agent::{Agent, AgentConfig, AgentResponse};
use hawkins_core::Config;
use hawkins_llm::OpenAiProvider;
use hawkins_tools::{bureau_registry, StdRandom, ToolRegistry, UsageStats, UsageTracker};
use std::sync::Arc;

/// The agent together with the tracker observing every run it makes.
pub struct Bureau {
    pub agent: Agent,
    pub tracker: Arc<UsageTracker>,
}

pub fn create_registry(config: &Config) -> anyhow::Result<Arc<ToolRegistry>> {
    let random = StdRandom::from_seed_option(config.bureau.seed);
    let registry = bureau_registry(Arc::new(random))?;
    Ok(Arc::new(registry))
}

pub fn create_bureau(config: &Config) -> anyhow::Result<Bureau> {
    let registry = create_registry(config)?;
    let tracker = Arc::new(UsageTracker::new(&registry));

    let llm = OpenAiProvider::from_config(&config.llm)
        .map_err(|e| anyhow::anyhow!("Failed to create LLM provider: {}", e))?;

    let agent = Agent::builder()
        .config(AgentConfig::from_config(config))
        .llm(Arc::new(llm))
        .tool_registry(registry)
        .observer(tracker.clone())
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create agent: {}", e))?;

    Ok(Bureau { agent, tracker })
}

pub fn print_complaint_banner(complaint: &str) {
    let rule = "=".repeat(60);
    println!("\n{}", rule.blue());
    println!("{} {}", "COMPLAINT:".blue().bold(), complaint);
    println!("{}\n", rule.blue());
}

pub fn print_response(response: &AgentResponse) {
    for call in &response.tool_calls {
        let status = if call.is_error {
            "failed".red()
        } else {
            "ok".green()
        };
        println!("  {} {} ({})", "tool".dimmed(), call.name.cyan(), status);
    }
    println!("\n{} {}\n", "RESPONSE:".magenta().bold(), response.text);
}

pub fn print_summary(stats: &UsageStats) {
    println!("\n{}", "=== Tool Usage Analysis ===".green().bold());
    println!("{}", stats);
}
