use colored::Colorize;
use hawkins_core::{Config, ToolDefinition};

use super::create_registry;

const DESCRIPTION_WIDTH: usize = 60;

pub fn run(config: &Config) -> anyhow::Result<()> {
    let registry = create_registry(config)?;
    let definitions = registry.definitions();

    println!("Created {} creative tools:", definitions.len().to_string().bold());
    for def in &definitions {
        println!("{}", catalogue_line(def));
    }

    Ok(())
}

pub fn catalogue_line(def: &ToolDefinition) -> String {
    format!(
        "  - {}: {}...",
        def.name.cyan(),
        def.short_description(DESCRIPTION_WIDTH)
    )
}
