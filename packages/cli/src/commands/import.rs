use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use nudge_editor::{load_template, CampaignStore, Document, FileStore, ImportMode};
use nudge_model::CampaignId;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Campaign id
    pub id: String,

    /// Template file (looked up in the templates directory when not found)
    pub template: PathBuf,

    /// Drop existing interfaces and layers before importing
    #[arg(long)]
    pub replace: bool,
}

pub fn import(args: ImportArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut store = FileStore::new(config.campaigns_dir(cwd));

    let template = load_template(&config.template_path(cwd, &args.template))?;
    let mut doc = Document::from_campaign(store.load(&CampaignId::new(args.id))?)?;

    let mode = if args.replace {
        ImportMode::Replace
    } else {
        ImportMode::Merge
    };
    let report = doc.apply_template_with(&template, mode)?;
    store.save(&doc.to_campaign())?;

    if report.nudge_type_mismatch {
        println!(
            "{} template {} is {} but {} is {}",
            "⚠️".yellow(),
            template.name.bright_white(),
            template.nudge_type,
            doc.name(),
            doc.nudge_type()
        );
    }
    println!(
        "{} Imported {}: {} interfaces, {} layers",
        "✓".green(),
        template.name.bright_white(),
        report.interfaces.len(),
        report.layers.len()
    );

    Ok(())
}
