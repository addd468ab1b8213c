use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Campaigns directory
    #[arg(short, long, default_value = "campaigns")]
    pub campaigns_dir: String,

    /// Templates directory
    #[arg(short, long, default_value = "templates")]
    pub templates_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing nudge workspace...".bright_blue().bold());

    for dir in [&args.campaigns_dir, &args.templates_dir] {
        let path = cwd.join(dir);
        if !path.exists() {
            fs::create_dir_all(&path)?;
            println!("  {} Created {}/", "✓".green(), dir);
        }
    }

    let config = Config {
        campaigns_dir: args.campaigns_dir,
        templates_dir: args.templates_dir,
        ..Config::default()
    };

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Workspace initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: nudge new \"My campaign\"");
    println!("  2. Run: nudge edit <id> script.json");

    Ok(())
}
