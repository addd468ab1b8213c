//! Ordered list of a campaign's named interfaces.
//!
//! The main surface is not in this list; it is always first and is addressed
//! as `None`.

use crate::reorder::move_item;
use crate::MutationError;
use nudge_model::{CampaignInterface, InterfaceId, NudgeType};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceList {
    interfaces: Vec<CampaignInterface>,
}

impl InterfaceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_interfaces(interfaces: Vec<CampaignInterface>) -> Self {
        Self { interfaces }
    }

    pub fn into_interfaces(self) -> Vec<CampaignInterface> {
        self.interfaces
    }

    pub fn as_slice(&self) -> &[CampaignInterface] {
        &self.interfaces
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    pub fn get(&self, id: &InterfaceId) -> Option<&CampaignInterface> {
        self.interfaces.iter().find(|i| &i.id == id)
    }

    pub fn contains(&self, id: &InterfaceId) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: &InterfaceId) -> Option<usize> {
        self.interfaces.iter().position(|i| &i.id == id)
    }

    pub fn ids(&self) -> Vec<InterfaceId> {
        self.interfaces.iter().map(|i| i.id.clone()).collect()
    }

    /// First free "Interface N" name, counting from the list length
    pub fn next_default_name(&self) -> String {
        let mut n = self.interfaces.len() + 1;
        loop {
            let candidate = format!("Interface {}", n);
            if !self.interfaces.iter().any(|i| i.name == candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn push(&mut self, id: InterfaceId, name: String, nudge_type: NudgeType) -> &CampaignInterface {
        self.interfaces.push(CampaignInterface { id, name, nudge_type });
        &self.interfaces[self.interfaces.len() - 1]
    }

    pub fn extend(&mut self, interfaces: impl IntoIterator<Item = CampaignInterface>) {
        self.interfaces.extend(interfaces);
    }

    /// Rename after trimming. Empty and unchanged names are refused.
    pub fn rename(&mut self, id: &InterfaceId, name: &str) -> Result<(), MutationError> {
        let interface = self
            .interfaces
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| MutationError::InterfaceNotFound(id.clone()))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(MutationError::InvalidName);
        }
        if name == interface.name {
            return Err(MutationError::UnchangedName);
        }
        interface.name = name.to_string();
        Ok(())
    }

    pub fn remove(&mut self, id: &InterfaceId) -> Result<CampaignInterface, MutationError> {
        let index = self
            .position(id)
            .ok_or_else(|| MutationError::InterfaceNotFound(id.clone()))?;
        Ok(self.interfaces.remove(index))
    }

    /// Move the interface at `from` to `to`. Both must be in bounds.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), MutationError> {
        let len = self.interfaces.len();
        for index in [from, to] {
            if index >= len {
                return Err(MutationError::IndexOutOfRange { index, len });
            }
        }
        move_item(&mut self.interfaces, from, to);
        Ok(())
    }
}
