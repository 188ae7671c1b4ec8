use super::{match_keyword, BUREAU_CATEGORY};
use crate::error::Result;
use crate::traits::{parse_input, Tool, ToolOutput};
use async_trait::async_trait;
use hawkins_core::{Context, ToolDefinition, ToolParameter};
use serde::Deserialize;
use serde_json::Value;

const PARTY_RESPONSES: [(&str, &str); 4] = [
    (
        "portal",
        "Mike: 'Portals are unpredictable!' Dustin: 'They follow the Mind Flayer's activity.'",
    ),
    (
        "monsters",
        "Lucas: 'Demogorgons are territorial.' Will: 'They can sense fear and strong emotions.'",
    ),
    (
        "psychics",
        "Mike: 'El's powers are connected to her emotional state.' Dustin: 'Limited by her energy.'",
    ),
    (
        "electricity",
        "Lucas: 'The Upside Down interferes with electrical systems.' Dustin: 'It's like a feedback loop.'",
    ),
];

const HUDDLE: &str =
    "The party huddles together. Mike: 'This is a tough one.' Dustin: 'We need more information.'";

pub struct GatherPartyWisdomTool {
    def: ToolDefinition,
}

impl GatherPartyWisdomTool {
    pub fn new() -> Self {
        let def = ToolDefinition::new(
            "gather_party_wisdom",
            "Ask the D&D party (Mike, Dustin, Lucas, Will) for their collective wisdom.",
        )
        .with_required_param(
            "question",
            ToolParameter::string().with_description("The question for the party"),
        )
        .with_category(BUREAU_CATEGORY);

        Self { def }
    }
}

impl Default for GatherPartyWisdomTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct PartyInput {
    question: String,
}

#[async_trait]
impl Tool for GatherPartyWisdomTool {
    fn definition(&self) -> &ToolDefinition {
        &self.def
    }

    async fn execute(&self, _ctx: &Context, input: Value) -> Result<ToolOutput> {
        let input: PartyInput = parse_input(input, "question")?;

        let output = match match_keyword(&PARTY_RESPONSES, &input.question) {
            Some((answer, keyword)) => ToolOutput::text(answer).with_metadata("keyword", keyword),
            None => ToolOutput::text(HUDDLE),
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_party_answers_by_keyword() {
        let tool = GatherPartyWisdomTool::new();
        let output = tool
            .execute(&Context::new(), json!({"question": "Why are MONSTERS so hungry?"}))
            .await
            .unwrap();
        assert!(output.content.starts_with("Lucas: 'Demogorgons are territorial.'"));
    }

    #[tokio::test]
    async fn test_party_huddles_without_match() {
        let tool = GatherPartyWisdomTool::new();
        let output = tool
            .execute(&Context::new(), json!("How come kids outsmart the army?"))
            .await
            .unwrap();
        assert_eq!(output.content, HUDDLE);
    }
}
