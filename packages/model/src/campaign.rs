use crate::ids::{CampaignId, InterfaceId};
use crate::layer::Layer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Presentation pattern of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NudgeType {
    #[default]
    Modal,
    BottomSheet,
    Tooltip,
    PictureInPicture,
    ScratchCard,
    Banner,
}

impl NudgeType {
    pub const ALL: [NudgeType; 6] = [
        NudgeType::Modal,
        NudgeType::BottomSheet,
        NudgeType::Tooltip,
        NudgeType::PictureInPicture,
        NudgeType::ScratchCard,
        NudgeType::Banner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NudgeType::Modal => "modal",
            NudgeType::BottomSheet => "bottom-sheet",
            NudgeType::Tooltip => "tooltip",
            NudgeType::PictureInPicture => "picture-in-picture",
            NudgeType::ScratchCard => "scratch-card",
            NudgeType::Banner => "banner",
        }
    }
}

impl fmt::Display for NudgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NudgeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NudgeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown nudge type: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Scheduled,
    Active,
    Paused,
    Completed,
    Archived,
}

/// Delivery window of a campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub start: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    /// IANA time zone name used when presenting the window
    pub time_zone: String,
}

impl Schedule {
    /// A window is valid when it ends strictly after it starts
    pub fn is_valid(&self) -> bool {
        self.end.map(|end| end > self.start).unwrap_or(true)
    }
}

/// A named alternate surface. Its position is its index in the campaign's
/// interface list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignInterface {
    pub id: InterfaceId,
    pub name: String,
    pub nudge_type: NudgeType,
}

/// Campaign-level fields that are not part of the layer structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignMeta {
    pub id: CampaignId,
    pub name: String,
    #[serde(default)]
    pub nudge_type: NudgeType,
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
}

/// The aggregate handed to and received from persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(flatten)]
    pub meta: CampaignMeta,
    #[serde(default)]
    pub interfaces: Vec<CampaignInterface>,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl Campaign {
    pub fn new(id: CampaignId, name: impl Into<String>, nudge_type: NudgeType) -> Self {
        Self {
            meta: CampaignMeta {
                id,
                name: name.into(),
                nudge_type,
                status: CampaignStatus::Draft,
                tags: BTreeSet::new(),
                schedule: None,
            },
            interfaces: Vec::new(),
            layers: Vec::new(),
        }
    }
}
