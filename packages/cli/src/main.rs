mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    edit, import, init, new, show, EditArgs, ImportArgs, InitArgs, NewArgs, ShowArgs,
};
use config::Config;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Nudge CLI - edit in-app campaign documents from the terminal
#[derive(Parser, Debug)]
#[command(name = "nudge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a nudge workspace
    Init(InitArgs),

    /// Create an empty campaign
    New(NewArgs),

    /// Print a campaign's surfaces and layer tree
    Show(ShowArgs),

    /// Apply a JSON script of mutations to a campaign
    Edit(EditArgs),

    /// Import a template into a campaign
    Import(ImportArgs),
}

fn init_logging(cwd: &Path) {
    let default_level = Config::load(cwd)
        .map(|config| config.log_level)
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };
    init_logging(&cwd);

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::New(args) => new(args, &cwd),
        Command::Show(args) => show(args, &cwd),
        Command::Edit(args) => edit(args, &cwd),
        Command::Import(args) => import(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
