//! Campaign persistence.
//!
//! The editor only ever sees whole campaigns: a store hands one over on
//! open and takes the full aggregate back on save.

use nudge_common::{CommonError, CommonResult};
use nudge_model::{Campaign, CampaignId, Template};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Where campaigns live between edit sessions
pub trait CampaignStore {
    fn load(&self, id: &CampaignId) -> CommonResult<Campaign>;
    fn save(&mut self, campaign: &Campaign) -> CommonResult<()>;
    /// Ids of every stored campaign, sorted
    fn list(&self) -> CommonResult<Vec<CampaignId>>;
}

/// In-memory only (for testing, temp docs)
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    campaigns: BTreeMap<CampaignId, Campaign>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CampaignStore for MemoryStore {
    fn load(&self, id: &CampaignId) -> CommonResult<Campaign> {
        self.campaigns
            .get(id)
            .cloned()
            .ok_or_else(|| CommonError::NotFound(format!("campaign {}", id)))
    }

    fn save(&mut self, campaign: &Campaign) -> CommonResult<()> {
        self.campaigns.insert(campaign.meta.id.clone(), campaign.clone());
        Ok(())
    }

    fn list(&self) -> CommonResult<Vec<CampaignId>> {
        Ok(self.campaigns.keys().cloned().collect())
    }
}

/// One pretty-printed `<id>.json` file per campaign under `root`
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `id`. Ids that would leave `root` are refused.
    pub fn path_for(&self, id: &CampaignId) -> CommonResult<PathBuf> {
        let raw = id.as_str();
        if raw.is_empty() || raw.contains(['/', '\\']) || raw.contains("..") {
            return Err(CommonError::Generic(format!("invalid campaign id {:?}", raw)));
        }
        Ok(self.root.join(format!("{}.json", raw)))
    }
}

impl CampaignStore for FileStore {
    fn load(&self, id: &CampaignId) -> CommonResult<Campaign> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(CommonError::NotFound(path.display().to_string()));
        }

        let source = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&source)?)
    }

    fn save(&mut self, campaign: &Campaign) -> CommonResult<()> {
        let path = self.path_for(&campaign.meta.id)?;
        fs::create_dir_all(&self.root)?;
        let json = serde_json::to_string_pretty(campaign)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn list(&self) -> CommonResult<Vec<CampaignId>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                ids.push(CampaignId::new(stem));
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// Read a template file
pub fn load_template(path: &Path) -> CommonResult<Template> {
    if !path.exists() {
        return Err(CommonError::NotFound(path.display().to_string()));
    }
    let source = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}
