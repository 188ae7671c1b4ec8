use colored::Colorize;
use hawkins_core::Config;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::{create_bureau, print_response, print_summary};

pub async fn run(config: &Config) -> anyhow::Result<()> {
    let bureau = create_bureau(config)?;
    let session = bureau.agent.create_session();

    println!("{}", "Downside-Up Complaint Bureau".green().bold());
    println!(
        "Type {} for tool usage, {} to exit\n",
        "stats".yellow(),
        "quit".yellow()
    );

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(&format!("{} ", "Complaint:".cyan().bold()));

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "quit" || line == "exit" {
                    println!("{}", "Goodbye!".green());
                    break;
                }

                rl.add_history_entry(line)?;

                if line == "stats" {
                    print_summary(&bureau.tracker.statistics());
                    println!();
                    continue;
                }

                match bureau.agent.process(&session, line).await {
                    Ok(response) => print_response(&response),
                    Err(e) => println!("{} {}\n", "Error:".red().bold(), e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".yellow());
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".green());
                break;
            }
            Err(err) => {
                println!("{} {:?}", "Error:".red().bold(), err);
                break;
            }
        }
    }

    print_summary(&bureau.tracker.statistics());
    Ok(())
}
