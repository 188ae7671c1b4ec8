use colored::Colorize;
use futures::future::join_all;
use hawkins_agent::{Agent, AgentResponse};
use hawkins_core::Config;
use serde_json::json;
use tracing::info;

use super::{create_bureau, print_complaint_banner, print_response, print_summary, tools};

async fn handle_complaint(agent: &Agent, complaint: &str) -> hawkins_agent::Result<AgentResponse> {
    let session = agent.create_session();
    agent.process(&session, complaint).await
}

pub async fn run(config: &Config, parallel: bool, json: bool) -> anyhow::Result<()> {
    let bureau = create_bureau(config)?;
    let complaints = &config.bureau.complaints;

    if !json {
        if let Some(registry) = bureau.agent.tool_registry() {
            println!("Created {} creative tools:", registry.len());
            for def in registry.definitions() {
                println!("{}", tools::catalogue_line(&def));
            }
        }
        println!("{}", "Agent created successfully!".green());
        println!("Testing agent with {} complaints...", complaints.len());
    }

    info!(count = complaints.len(), parallel, "Handling complaints");

    let results = if parallel {
        join_all(complaints.iter().map(|c| handle_complaint(&bureau.agent, c))).await
    } else {
        let mut results = Vec::with_capacity(complaints.len());
        for complaint in complaints {
            if !json {
                print_complaint_banner(complaint);
            }
            let result = handle_complaint(&bureau.agent, complaint).await;
            if !json {
                print_outcome(&result);
            }
            results.push(result);
        }
        results
    };

    let stats = bureau.tracker.statistics();

    if json {
        let entries: Vec<_> = complaints
            .iter()
            .zip(&results)
            .map(|(complaint, result)| match result {
                Ok(response) => json!({
                    "complaint": complaint,
                    "response": response.text,
                    "tools": response.tool_names(),
                }),
                Err(e) => json!({
                    "complaint": complaint,
                    "error": e.to_string(),
                }),
            })
            .collect();

        let report = json!({ "complaints": entries, "stats": stats });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if parallel {
        for (complaint, result) in complaints.iter().zip(&results) {
            print_complaint_banner(complaint);
            print_outcome(result);
        }
    }

    print_summary(&stats);
    Ok(())
}

fn print_outcome(result: &hawkins_agent::Result<AgentResponse>) {
    match result {
        Ok(response) => print_response(response),
        Err(e) => println!("{} {}\n", "Error:".red().bold(), e),
    }
}
