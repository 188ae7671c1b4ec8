use clap::{Parser, Subcommand};
use hawkins_core::config::LogLevel;
use hawkins_core::Config;
use std::path::PathBuf;
use tracing::debug;

mod commands;

#[derive(Parser)]
#[command(name = "hawkins")]
#[command(author, version, about = "Downside-Up Complaint Bureau agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model name, overriding the config file
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Config file to load instead of the default search path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the tools' random responses
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every configured complaint and print the tool usage analysis
    Run {
        /// Handle the complaints concurrently
        #[arg(long)]
        parallel: bool,
        /// Print responses and statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Handle a single complaint
    Ask {
        /// The complaint to investigate
        complaint: String,
    },
    /// Start an interactive complaint desk
    Chat,
    /// List the bureau's tools
    Tools,
}

fn init_tracing(verbose: u8, configured: LogLevel) {
    let level = match verbose {
        0 => configured.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_default()?,
    };
    let mut config = config.merge_env()?;

    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }
    if let Some(key) = &cli.api_key {
        config.llm.api_key = Some(key.clone());
    }
    if let Some(seed) = cli.seed {
        config.bureau.seed = Some(seed);
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(cli.verbose, config.general.log_level);

    if let Ok(path) = dotenv {
        debug!(path = %path.display(), "Loaded .env");
    }

    match cli.command {
        Commands::Run { parallel, json } => {
            commands::run::run(&config, parallel, json).await?;
        }
        Commands::Ask { complaint } => {
            commands::ask::run(&config, &complaint).await?;
        }
        Commands::Chat => {
            commands::chat::run(&config).await?;
        }
        Commands::Tools => {
            commands::tools::run(&config)?;
        }
    }

    Ok(())
}
