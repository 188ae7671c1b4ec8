use super::{match_keyword, BUREAU_CATEGORY};
use crate::error::Result;
use crate::traits::{parse_input, Tool, ToolOutput};
use async_trait::async_trait;
use hawkins_core::{Context, ToolDefinition, ToolParameter};
use serde::Deserialize;
use serde_json::Value;

const RECORDS: [(&str, &str); 4] = [
    (
        "portal",
        "Records show portals have opened on various dates with no clear pattern.",
    ),
    (
        "monsters",
        "Historical records indicate creatures from the Upside Down behave differently based on environmental factors.",
    ),
    ("psychics", "Records show that psychic abilities vary greatly."),
    ("electricity", "Hawkins has a history of electrical anomalies."),
];

pub struct CheckHawkinsRecordsTool {
    def: ToolDefinition,
}

impl CheckHawkinsRecordsTool {
    pub fn new() -> Self {
        let def = ToolDefinition::new(
            "check_hawkins_records",
            "Search Hawkins historical records for information.",
        )
        .with_required_param(
            "query",
            ToolParameter::string().with_description("What to look up in the records"),
        )
        .with_category(BUREAU_CATEGORY);

        Self { def }
    }
}

impl Default for CheckHawkinsRecordsTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct RecordsInput {
    query: String,
}

#[async_trait]
impl Tool for CheckHawkinsRecordsTool {
    fn definition(&self) -> &ToolDefinition {
        &self.def
    }

    async fn execute(&self, _ctx: &Context, input: Value) -> Result<ToolOutput> {
        let input: RecordsInput = parse_input(input, "query")?;

        let output = match match_keyword(&RECORDS, &input.query) {
            Some((record, keyword)) => ToolOutput::text(record).with_metadata("keyword", keyword),
            None => ToolOutput::text(format!(
                "Records don't contain specific information about '{}', but many unexplained events have occurred in Hawkins.",
                input.query
            )),
        };
        Ok(output)
    }
}
