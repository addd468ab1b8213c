use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use nudge_editor::{CampaignStore, Document, EditSession, FileStore, Mutation, MutationOutcome};
use nudge_model::CampaignId;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Campaign id
    pub id: String,

    /// JSON file holding an array of mutations
    pub script: PathBuf,

    /// Apply the script but do not save the result
    #[arg(long)]
    pub dry_run: bool,
}

/// Counts reported at the end of a script run
#[derive(Debug, Default, PartialEq)]
pub struct EditSummary {
    pub applied: usize,
    pub rejected: usize,
}

pub fn edit(args: EditArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut store = FileStore::new(config.campaigns_dir(cwd));

    let script_path = cwd.join(&args.script);
    let source = fs::read_to_string(&script_path)
        .with_context(|| format!("Cannot read {}", script_path.display()))?;
    let mutations: Vec<Mutation> = serde_json::from_str(&source)
        .with_context(|| format!("Invalid mutation script {}", script_path.display()))?;

    let campaign = store.load(&CampaignId::new(args.id))?;
    let document = Document::from_campaign(campaign)?;
    let mut session = EditSession::with_history_limit("cli", document, config.history_limit);

    println!(
        "{} {} ({} mutations)",
        "✏️ Editing".bright_blue().bold(),
        session.document.name(),
        mutations.len()
    );
    let summary = run_script(&mut session, &mutations);

    if args.dry_run {
        println!("{}", "Dry run, nothing saved".yellow());
    } else if session.document.is_dirty() {
        session.save(&mut store)?;
        println!("  {} Saved version {}", "✓".green(), session.document.version);
    }

    println!();
    println!(
        "{} applied, {} rejected",
        summary.applied.to_string().green().bold(),
        summary.rejected.to_string().red().bold()
    );
    Ok(())
}

/// Apply every mutation in order. Rejected mutations are reported and
/// skipped; the rest of the script still runs.
pub fn run_script(session: &mut EditSession, mutations: &[Mutation]) -> EditSummary {
    let mut summary = EditSummary::default();

    for (index, mutation) in mutations.iter().enumerate() {
        match session.apply(mutation) {
            Ok(result) => {
                summary.applied += 1;
                println!("  {} {}{}", "✓".green(), mutation.name(), describe(&result.outcome));
            }
            Err(err) => {
                summary.rejected += 1;
                println!("  {} #{} {}: {}", "✗".red(), index, mutation.name(), err);
            }
        }
    }

    summary
}

fn describe(outcome: &MutationOutcome) -> String {
    match outcome {
        MutationOutcome::Applied => String::new(),
        MutationOutcome::LayerCreated(id) => format!(" → {}", id),
        MutationOutcome::InterfaceCreated(id) => format!(" → {}", id),
        MutationOutcome::Removed(ids) => format!(" ({} removed)", ids.len()),
        MutationOutcome::Reordered(None) => " (unchanged)".to_string(),
        MutationOutcome::Reordered(Some(reorder)) => format!(" ({} → {})", reorder.from, reorder.to),
        MutationOutcome::Imported(report) => format!(
            " ({} interfaces, {} layers)",
            report.interfaces.len(),
            report.layers.len()
        ),
    }
}
