use super::BUREAU_CATEGORY;
use crate::error::Result;
use crate::random::RandomSource;
use crate::traits::{parse_input, Tool, ToolOutput};
use async_trait::async_trait;
use hawkins_core::{Context, ToolDefinition, ToolParameter};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub struct ConsultDemogorgonTool {
    def: ToolDefinition,
    random: Arc<dyn RandomSource>,
}

impl ConsultDemogorgonTool {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        let def = ToolDefinition::new(
            "consult_demogorgon",
            "Get the Demogorgon's perspective on a complaint about the Upside Down.",
        )
        .with_required_param(
            "complaint",
            ToolParameter::string().with_description("The complaint to put to the Demogorgon"),
        )
        .with_category(BUREAU_CATEGORY);

        Self { def, random }
    }

    fn responses(complaint: &str) -> [String; 3] {
        [
            format!(
                "The Demogorgon tilts its head. It seems confused by '{}'. Perhaps the issue is that you're thinking in three dimensions?",
                complaint
            ),
            "The Demogorgon makes a sound that might be agreement. It suggests that the problem might be temporal - things work differently in the Upside Down's time.".to_string(),
            format!(
                "The Demogorgon appears to be eating something. It doesn't seem to understand the concept of '{}' - maybe consistency isn't a priority there?",
                complaint
            ),
        ]
    }
}

#[derive(Deserialize)]
struct ConsultInput {
    complaint: String,
}

#[async_trait]
impl Tool for ConsultDemogorgonTool {
    fn definition(&self) -> &ToolDefinition {
        &self.def
    }

    async fn execute(&self, _ctx: &Context, input: Value) -> Result<ToolOutput> {
        let input: ConsultInput = parse_input(input, "complaint")?;
        let responses = Self::responses(&input.complaint);
        let pick = self.random.choose(responses.len());
        let [first, second, third] = responses;
        let response = match pick {
            0 => first,
            1 => second,
            _ => third,
        };

        Ok(ToolOutput::text(response).with_metadata("response_index", pick))
    }
}
