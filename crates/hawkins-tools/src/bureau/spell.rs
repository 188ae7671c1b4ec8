use super::BUREAU_CATEGORY;
use crate::error::{Result, ToolError};
use crate::random::RandomSource;
use crate::traits::{parse_input, Tool, ToolOutput};
use async_trait::async_trait;
use hawkins_core::{Context, ToolDefinition, ToolParameter};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

const LEVELS: [&str; 3] = ["low", "medium", "high"];

/// How many distinct spells a single cast suggests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CreativityLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl CreativityLevel {
    pub fn multiplier(&self) -> usize {
        match self {
            CreativityLevel::Low => 1,
            CreativityLevel::Medium => 2,
            CreativityLevel::High => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CreativityLevel::Low => "low",
            CreativityLevel::Medium => "medium",
            CreativityLevel::High => "high",
        }
    }
}

impl FromStr for CreativityLevel {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(CreativityLevel::Low),
            "medium" => Ok(CreativityLevel::Medium),
            "high" => Ok(CreativityLevel::High),
            other => Err(ToolError::invalid_parameter("creativity_level", other, &LEVELS)),
        }
    }
}

impl fmt::Display for CreativityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct CastInterdimensionalSpellTool {
    def: ToolDefinition,
    random: Arc<dyn RandomSource>,
}

impl CastInterdimensionalSpellTool {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        let def = ToolDefinition::new(
            "cast_interdimensional_spell",
            "Suggest a creative interdimensional spell to fix a problem.",
        )
        .with_required_param(
            "problem",
            ToolParameter::string().with_description("The problem the spell should fix"),
        )
        .with_param(
            "creativity_level",
            ToolParameter::string()
                .with_description("How many spells to suggest")
                .with_enum(LEVELS)
                .with_default(Value::String(CreativityLevel::default().to_string())),
        )
        .with_category(BUREAU_CATEGORY);

        Self { def, random }
    }

    fn spells(problem: &str) -> Vec<String> {
        vec![
            format!("Try chanting 'Becma Becma Becma' three times while holding a Walkman. This might recalibrate the interdimensional frequencies related to: {}", problem),
            format!("Create a salt circle and place a compass in the center. The magnetic anomalies might help stabilize: {}", problem),
            format!("Play 'Running Up That Hill' backwards at the exact location of the issue. The temporal resonance could fix: {}", problem),
            format!("Gather three items: a lighter, a compass, and something personal. Arrange them in a triangle while thinking about: {}.", problem),
        ]
    }
}

#[derive(Deserialize)]
struct SpellInput {
    problem: String,
    #[serde(default)]
    creativity_level: Option<String>,
}

#[async_trait]
impl Tool for CastInterdimensionalSpellTool {
    fn definition(&self) -> &ToolDefinition {
        &self.def
    }

    async fn execute(&self, _ctx: &Context, input: Value) -> Result<ToolOutput> {
        let input: SpellInput = parse_input(input, "problem")?;
        let level = match input.creativity_level.as_deref() {
            Some(raw) => raw.parse::<CreativityLevel>()?,
            None => CreativityLevel::default(),
        };

        let spells = Self::spells(&input.problem);
        let picks = self.random.sample(spells.len(), level.multiplier());
        let selected: Vec<&str> = picks.iter().map(|&i| spells[i].as_str()).collect();

        Ok(ToolOutput::text(selected.join("\n"))
            .with_metadata("creativity_level", level.as_str())
            .with_metadata("spells", selected.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, StdRandom};
    use serde_json::json;

    #[test]
    fn test_creativity_level_parse() {
        assert_eq!("low".parse::<CreativityLevel>().unwrap().multiplier(), 1);
        assert_eq!("medium".parse::<CreativityLevel>().unwrap().multiplier(), 2);
        assert_eq!("high".parse::<CreativityLevel>().unwrap().multiplier(), 3);
        assert!("HIGH".parse::<CreativityLevel>().is_err());
        assert_eq!(CreativityLevel::default(), CreativityLevel::Medium);
    }

    #[tokio::test]
    async fn test_spell_counts_follow_level() {
        let tool = CastInterdimensionalSpellTool::new(Arc::new(StdRandom::seeded(11)));
        let ctx = Context::new();

        for (level, expected) in [("low", 1), ("medium", 2), ("high", 3)] {
            let output = tool
                .execute(&ctx, json!({"problem": "flickering lights", "creativity_level": level}))
                .await
                .unwrap();

            let lines: Vec<&str> = output.content.lines().collect();
            assert_eq!(lines.len(), expected);
            let mut unique = lines.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), expected);
            assert!(lines.iter().all(|l| l.contains("flickering lights")));
        }
    }

    #[tokio::test]
    async fn test_spell_defaults_to_medium() {
        let tool = CastInterdimensionalSpellTool::new(Arc::new(ScriptedRandom::new(vec![2, 0])));
        let output = tool.execute(&Context::new(), json!("the portal")).await.unwrap();

        let lines: Vec<&str> = output.content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Play 'Running Up That Hill' backwards"));
        assert!(lines[1].starts_with("Try chanting 'Becma Becma Becma'"));
        assert_eq!(
            output.metadata.get::<String>("creativity_level").as_deref(),
            Some("medium")
        );
    }

    #[tokio::test]
    async fn test_spell_rejects_unknown_level_before_drawing() {
        let tool = CastInterdimensionalSpellTool::new(Arc::new(ScriptedRandom::new(vec![3, 0, 0])));
        let ctx = Context::new();

        let err = tool
            .execute(&ctx, json!({"problem": "portal", "creativity_level": "extreme"}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ToolError::InvalidParameter { ref name, ref value, .. }
                if name == "creativity_level" && value == "extreme"
        ));

        // The failed call drew nothing, so the first scripted offset is still next.
        let output = tool
            .execute(&ctx, json!({"problem": "portal", "creativity_level": "low"}))
            .await
            .unwrap();
        assert!(output.content.starts_with("Gather three items"));
        assert!(output.content.ends_with("thinking about: portal."));
    }

    #[tokio::test]
    async fn test_spell_rejects_non_string_level() {
        let tool = CastInterdimensionalSpellTool::new(Arc::new(StdRandom::seeded(3)));
        let result = tool
            .execute(&Context::new(), json!({"problem": "portal", "creativity_level": 3}))
            .await;
        assert!(matches!(result, Err(ToolError::InvalidInput(_))));
    }
}
