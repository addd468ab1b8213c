use crate::ids::{CampaignId, InterfaceId, LayerId};
use crc32fast::Hasher;

/// Derive a short, stable seed from a campaign id using CRC32
pub fn get_campaign_seed(campaign_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(campaign_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for layers and interfaces within a campaign
///
/// The generator only guarantees that it never hands out the same id twice.
/// Callers holding pre-existing content (a loaded campaign) must still skip
/// candidates that are already taken.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(campaign_id: &CampaignId) -> Self {
        Self {
            seed: get_campaign_seed(campaign_id.as_str()),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    pub fn next_layer_id(&mut self) -> LayerId {
        LayerId::new(self.next("l"))
    }

    pub fn next_interface_id(&mut self) -> InterfaceId {
        InterfaceId::new(self.next("i"))
    }

    fn next(&mut self, tag: &str) -> String {
        self.count += 1;
        format!("{}-{}{}", self.seed, tag, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
