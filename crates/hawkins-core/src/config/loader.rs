use super::types::{Config, LogLevel};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

const SEARCH_PATHS: [&str; 3] = [
    "./hawkins.toml",
    "~/.hawkins/config.toml",
    "~/.config/hawkins/config.toml",
];

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let expanded = expand(path.as_ref());
        let content = std::fs::read_to_string(&expanded)?;
        debug!(path = %expanded.display(), "Loaded config file");
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the first config file found on the search path, or defaults.
    pub fn load_default() -> Result<Self> {
        for path in &SEARCH_PATHS {
            let expanded = expand(Path::new(path));
            if expanded.exists() {
                return Self::load_from_file(expanded);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Config::default())
    }

    pub fn merge_env(mut self) -> Result<Self> {
        if let Ok(level) = std::env::var("HAWKINS_LOG_LEVEL") {
            if let Some(level) = LogLevel::parse(&level) {
                self.general.log_level = level;
            }
        }

        if let Ok(model) = std::env::var("HAWKINS_MODEL") {
            self.llm.model = model;
        }

        if let Ok(seed) = std::env::var("HAWKINS_SEED") {
            let seed = seed
                .parse::<u64>()
                .map_err(|e| Error::invalid_input("HAWKINS_SEED", e.to_string()))?;
            self.bureau.seed = Some(seed);
        }

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.llm.api_key.get_or_insert(key);
        }

        if let Ok(url) = std::env::var("OPENAI_BASE_URL") {
            self.llm.base_url.get_or_insert(url);
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.agent.max_iterations == 0 {
            return Err(Error::invalid_input(
                "agent.max_iterations",
                "must be at least 1",
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(Error::invalid_input(
                "llm.temperature",
                format!("{} is outside 0.0..=2.0", self.llm.temperature),
            ));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }
}

fn expand(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.log_level, LogLevel::Warn);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.agent.max_iterations, 5);
        assert_eq!(config.bureau.complaints.len(), 4);
        assert!(config.bureau.seed.is_none());
        assert!(config.agent.system_prompt.contains("Becma"));
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [general]
            log_level = "debug"

            [llm]
            model = "gpt-4o"
            temperature = 0.2

            [bureau]
            complaints = ["Why is the Mind Flayer so moody?"]
            seed = 42
        "#;

        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.general.log_level, LogLevel::Debug);
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.temperature, 0.2);
        assert_eq!(config.bureau.complaints, vec!["Why is the Mind Flayer so moody?"]);
        assert_eq!(config.bureau.seed, Some(42));
        assert_eq!(config.agent.name, "becma");
    }

    #[test]
    fn test_config_rejects_zero_iterations() {
        let toml = r#"
            [agent]
            max_iterations = 0
        "#;

        let err = Config::from_toml(toml).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn test_config_rejects_bad_toml() {
        let err = Config::from_toml("[llm\nmodel = 1").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = Config::default();
        let rendered = config.to_toml().unwrap();
        let parsed = Config::from_toml(&rendered).unwrap();
        assert_eq!(parsed.bureau.complaints, config.bureau.complaints);
        assert_eq!(parsed.llm.model, config.llm.model);
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("INFO"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("loud"), None);
        assert_eq!(LogLevel::Trace.as_str(), "trace");
    }
}
