use colored::Colorize;
use hawkins_core::Config;

use super::{create_bureau, print_complaint_banner, print_response, print_summary};

pub async fn run(config: &Config, complaint: &str) -> anyhow::Result<()> {
    let bureau = create_bureau(config)?;
    let session = bureau.agent.create_session();

    print_complaint_banner(complaint);

    match bureau.agent.process(&session, complaint).await {
        Ok(response) => print_response(&response),
        Err(e) => println!("{} {}\n", "Error:".red().bold(), e),
    }

    print_summary(&bureau.tracker.statistics());
    Ok(())
}
