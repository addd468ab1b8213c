use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use nudge_common::{walk_layer, Visitor};
use nudge_editor::{CampaignStore, FileStore};
use nudge_model::{Campaign, CampaignInterface, CampaignId, Layer, LayerContent};
use std::fmt::Write;
use std::path::Path;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Campaign id
    pub id: String,

    /// Print the raw campaign JSON instead of the layer tree
    #[arg(long)]
    pub json: bool,
}

pub fn show(args: ShowArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = FileStore::new(config.campaigns_dir(cwd));
    let campaign = store.load(&CampaignId::new(args.id))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&campaign)?);
    } else {
        print!("{}", render(&campaign));
    }
    Ok(())
}

/// Human-readable outline of a campaign: header, then one tree per surface
pub fn render(campaign: &Campaign) -> String {
    let mut printer = TreePrinter::default();
    printer.visit_campaign(campaign);

    let meta = &campaign.meta;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} ({}, {:?})",
        meta.name.bold(),
        format!("[{}]", meta.id).dimmed(),
        meta.nudge_type,
        meta.status
    );
    if !meta.tags.is_empty() {
        let tags: Vec<&str> = meta.tags.iter().map(String::as_str).collect();
        let _ = writeln!(out, "  tags: {}", tags.join(", "));
    }
    if let Some(schedule) = &meta.schedule {
        let end = schedule
            .end
            .map(|end| end.to_rfc3339())
            .unwrap_or_else(|| "open".to_string());
        let _ = writeln!(
            out,
            "  schedule: {} → {} ({})",
            schedule.start.to_rfc3339(),
            end,
            schedule.time_zone
        );
    }
    out.push_str(&printer.out);
    out
}

#[derive(Default)]
struct TreePrinter {
    out: String,
}

impl Visitor for TreePrinter {
    fn visit_surface(&mut self, layers: &[Layer], interface: Option<&CampaignInterface>) {
        let title = match interface {
            None => "Main".to_string(),
            Some(interface) => format!("{} ({})", interface.name, interface.nudge_type),
        };
        let _ = writeln!(self.out, "\n{}", title.bright_blue().bold());
        nudge_common::walk_surface(self, layers, interface.map(|i| &i.id));
    }

    fn visit_layer(&mut self, layers: &[Layer], layer: &Layer, depth: usize) {
        let indent = "  ".repeat(depth + 1);
        let _ = writeln!(
            self.out,
            "{}{} {} {}{}",
            indent,
            "•".dimmed(),
            layer.name,
            format!("<{}>", layer.kind()).cyan(),
            summary(&layer.content)
                .map(|s| format!(" {}", s.dimmed()))
                .unwrap_or_default()
        );
        walk_layer(self, layers, layer, depth);
    }
}

fn summary(content: &LayerContent) -> Option<String> {
    match content {
        LayerContent::Text(text) => text.text.as_ref().map(|t| format!("{:?}", t)),
        LayerContent::Button(button) => button.label.as_ref().map(|l| format!("{:?}", l)),
        LayerContent::Image(image) => image.src.clone(),
        LayerContent::Carousel(carousel) => Some(format!("nav: {:?}", carousel.secondary_navigation())),
        LayerContent::Container(_) => None,
    }
}
