use crate::campaign::{CampaignInterface, NudgeType};
use crate::layer::Layer;
use serde::{Deserialize, Serialize};

/// A reusable interface and layer subtree saved from an earlier campaign.
///
/// Layers with no interface belong to the template's main surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub nudge_type: NudgeType,
    #[serde(default)]
    pub interfaces: Vec<CampaignInterface>,
    #[serde(default)]
    pub layers: Vec<Layer>,
}
