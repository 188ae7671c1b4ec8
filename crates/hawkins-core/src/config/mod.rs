mod loader;
mod types;

pub use types::{
    AgentSettings, BureauConfig, Config, GeneralConfig, LlmConfig, LogLevel, DEFAULT_SYSTEM_PROMPT,
};
