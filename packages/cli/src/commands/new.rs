use crate::config::Config;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use nudge_editor::{CampaignStore, Document, FileStore};
use nudge_model::{CampaignId, NudgeType};
use std::path::Path;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Campaign name
    pub name: String,

    /// Presentation pattern (modal, bottom-sheet, tooltip, picture-in-picture, scratch-card, banner)
    #[arg(short, long, default_value = "modal")]
    pub nudge_type: NudgeType,

    /// Campaign id (defaults to a slug of the name)
    #[arg(long)]
    pub id: Option<String>,
}

pub fn new(args: NewArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut store = FileStore::new(config.campaigns_dir(cwd));

    let id = CampaignId::new(args.id.unwrap_or_else(|| slugify(&args.name)));
    if id.as_str().is_empty() {
        bail!("Cannot derive a campaign id from {:?}; pass --id", args.name);
    }
    let path = store.path_for(&id)?;
    if store.list()?.contains(&id) {
        bail!("Campaign {} already exists", id);
    }

    let doc = Document::new(id.clone(), args.name.trim(), args.nudge_type);
    store.save(&doc.to_campaign())?;

    println!(
        "{} Created {} campaign {}",
        "✓".green(),
        args.nudge_type,
        id.to_string().bright_white()
    );
    println!("  {}", path.display());

    Ok(())
}

/// Lowercase ascii alphanumerics, everything else collapsed to single dashes
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
