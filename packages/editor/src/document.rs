//! # Campaign Document
//!
//! The editable in-memory form of one campaign: metadata, the ordered
//! interface list, and the flat layer collection. One `Document` lives for as
//! long as its campaign is open in the editor.
//!
//! ## Lifecycle
//!
//! ```text
//! load ─→ Document::from_campaign ─→ edits ─→ to_campaign ─→ save
//!  ↑                                                           │
//!  └──────────────── another campaign replaces it ─────────────┘
//! ```
//!
//! Every mutator either applies fully and bumps `version`, or returns a
//! `MutationError` and leaves the document exactly as it was.

use crate::integrity;
use crate::interfaces::InterfaceList;
use crate::layers::LayerTree;
use crate::reorder::{resolve_drop, DropPosition, Reorder};
use crate::MutationError;
use nudge_model::{
    Campaign, CampaignId, CampaignInterface, CampaignMeta, CampaignStatus, IdGenerator,
    InterfaceId, Layer, LayerId, LayerKind, LayerPatch, NudgeType, Schedule,
};

/// Editable campaign document
#[derive(Debug, Clone)]
pub struct Document {
    /// Current version number (increments on each successful mutation)
    pub version: u64,

    meta: CampaignMeta,
    interfaces: InterfaceList,
    layers: LayerTree,

    /// Surface being edited; `None` is the main surface
    active: Option<InterfaceId>,

    ids: IdGenerator,
    dirty: bool,
}

/// Full copy of the document state, used by the undo history
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub campaign: Campaign,
    pub active: Option<InterfaceId>,
}

impl Document {
    /// Start an empty campaign
    pub fn new(id: CampaignId, name: impl Into<String>, nudge_type: NudgeType) -> Self {
        let campaign = Campaign::new(id, name, nudge_type);
        Self::from_parts(campaign, None)
    }

    /// Open a campaign handed over by persistence.
    ///
    /// The structure is checked first; a campaign that breaks an invariant
    /// is refused rather than edited.
    pub fn from_campaign(campaign: Campaign) -> Result<Self, MutationError> {
        integrity::validate(&campaign.interfaces, &campaign.layers)?;
        Ok(Self::from_parts(campaign, None))
    }

    fn from_parts(campaign: Campaign, active: Option<InterfaceId>) -> Self {
        let Campaign {
            meta,
            interfaces,
            layers,
        } = campaign;

        Self {
            version: 0,
            ids: IdGenerator::new(&meta.id),
            meta,
            interfaces: InterfaceList::from_interfaces(interfaces),
            layers: LayerTree::from_layers(layers),
            active,
            dirty: false,
        }
    }

    /// The full aggregate, as handed to persistence on save
    pub fn to_campaign(&self) -> Campaign {
        Campaign {
            meta: self.meta.clone(),
            interfaces: self.interfaces.as_slice().to_vec(),
            layers: self.layers.as_slice().to_vec(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            campaign: self.to_campaign(),
            active: self.active.clone(),
        }
    }

    /// Put back a previously taken snapshot. The id generator keeps counting
    /// so ids handed out after the snapshot are never reissued.
    pub fn restore(&mut self, snapshot: Snapshot) {
        let Campaign {
            meta,
            interfaces,
            layers,
        } = snapshot.campaign;

        self.meta = meta;
        self.interfaces = InterfaceList::from_interfaces(interfaces);
        self.layers = LayerTree::from_layers(layers);
        self.active = snapshot.active;
        self.touch();
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn touch(&mut self) {
        self.version += 1;
        self.dirty = true;
    }

    // ---------------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------------

    pub fn meta(&self) -> &CampaignMeta {
        &self.meta
    }

    pub fn id(&self) -> &CampaignId {
        &self.meta.id
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn nudge_type(&self) -> NudgeType {
        self.meta.nudge_type
    }

    pub fn layers(&self) -> &LayerTree {
        &self.layers
    }

    pub fn layer(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.get(id)
    }

    /// Direct children of a layer, in sibling order
    pub fn children(&self, id: &LayerId) -> Vec<&Layer> {
        self.layers.children(id).collect()
    }

    /// Root layers of a surface, in sibling order
    pub fn roots(&self, surface: Option<&InterfaceId>) -> Vec<&Layer> {
        self.layers.roots(surface).collect()
    }

    /// Interfaces in display order (the main surface is implicit)
    pub fn interfaces(&self) -> &[CampaignInterface] {
        self.interfaces.as_slice()
    }

    pub fn interface(&self, id: &InterfaceId) -> Option<&CampaignInterface> {
        self.interfaces.get(id)
    }

    pub fn active_interface(&self) -> Option<&InterfaceId> {
        self.active.as_ref()
    }

    // ---------------------------------------------------------------------
    // Identifiers
    // ---------------------------------------------------------------------

    pub(crate) fn fresh_layer_id(&mut self) -> LayerId {
        next_free_layer_id(&mut self.ids, &self.layers)
    }

    pub(crate) fn fresh_interface_id(&mut self) -> InterfaceId {
        loop {
            let id = self.ids.next_interface_id();
            if !self.interfaces.contains(&id) {
                return id;
            }
        }
    }

    /// Split borrow for callers that need fresh ids while reading layers
    pub(crate) fn id_source(&mut self) -> (&mut IdGenerator, &LayerTree) {
        (&mut self.ids, &self.layers)
    }

    pub(crate) fn replace_structure(&mut self, interfaces: InterfaceList, layers: LayerTree, active: Option<InterfaceId>) {
        self.interfaces = interfaces;
        self.layers = layers;
        self.active = active;
    }

    pub(crate) fn interface_list(&self) -> &InterfaceList {
        &self.interfaces
    }

    // ---------------------------------------------------------------------
    // Campaign metadata
    // ---------------------------------------------------------------------

    pub fn rename_campaign(&mut self, name: &str) -> Result<(), MutationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(refused("rename_campaign", MutationError::InvalidName));
        }
        if name == self.meta.name {
            return Err(refused("rename_campaign", MutationError::UnchangedName));
        }
        self.meta.name = name.to_string();
        self.touch();
        Ok(())
    }

    pub fn set_nudge_type(&mut self, nudge_type: NudgeType) {
        if self.meta.nudge_type != nudge_type {
            self.meta.nudge_type = nudge_type;
            self.touch();
        }
    }

    pub fn set_status(&mut self, status: CampaignStatus) {
        if self.meta.status != status {
            self.meta.status = status;
            self.touch();
        }
    }

    pub fn add_tag(&mut self, tag: &str) -> Result<(), MutationError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(refused("add_tag", MutationError::InvalidInput("empty tag".to_string())));
        }
        if !self.meta.tags.insert(tag.to_string()) {
            return Err(refused(
                "add_tag",
                MutationError::InvalidInput(format!("already tagged {}", tag)),
            ));
        }
        self.touch();
        Ok(())
    }

    pub fn remove_tag(&mut self, tag: &str) -> Result<(), MutationError> {
        if !self.meta.tags.remove(tag.trim()) {
            return Err(refused(
                "remove_tag",
                MutationError::InvalidInput(format!("not tagged {}", tag)),
            ));
        }
        self.touch();
        Ok(())
    }

    pub fn set_schedule(&mut self, schedule: Option<Schedule>) -> Result<(), MutationError> {
        if let Some(schedule) = &schedule {
            if !schedule.is_valid() {
                return Err(refused(
                    "set_schedule",
                    MutationError::InvalidInput("schedule must end after it starts".to_string()),
                ));
            }
        }
        self.meta.schedule = schedule;
        self.touch();
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Layers
    // ---------------------------------------------------------------------

    /// Add a layer under `parent`, or at the root of the active surface.
    pub fn add_layer(&mut self, kind: LayerKind, parent: Option<&LayerId>) -> Result<LayerId, MutationError> {
        let id = self.fresh_layer_id();
        let surface = self.active.clone();
        let id = self
            .layers
            .add(id, kind, parent, surface.as_ref())
            .map(|layer| layer.id.clone())
            .map_err(|e| refused("add_layer", e))?;

        tracing::debug!("[add_layer] {} {} under {:?}", kind, id, parent);
        self.touch();
        Ok(id)
    }

    pub fn update_layer(&mut self, id: &LayerId, patch: LayerPatch) -> Result<(), MutationError> {
        self.layers
            .update(id, patch)
            .map_err(|e| refused("update_layer", e))?;

        tracing::debug!("[update_layer] {}", id);
        self.touch();
        Ok(())
    }

    /// Delete a layer and all of its descendants. Returns the removed ids.
    pub fn delete_layer(&mut self, id: &LayerId) -> Result<Vec<LayerId>, MutationError> {
        let removed = self.layers.remove(id).map_err(|e| refused("delete_layer", e))?;

        tracing::debug!("[delete_layer] {} ({} removed)", id, removed.len());
        self.touch();
        Ok(removed)
    }

    /// Deep-copy a layer and its descendants next to the original.
    ///
    /// The copy is appended as the last sibling and every copied layer gets
    /// a fresh id. Returns the id of the copied root.
    pub fn duplicate_layer(&mut self, id: &LayerId) -> Result<LayerId, MutationError> {
        let source = self.layers.subtree(id);
        if source.is_empty() {
            return Err(refused("duplicate_layer", MutationError::LayerNotFound(id.clone())));
        }

        let (ids, existing) = self.id_source();
        let copies = LayerTree::copy_layers(&source, || next_free_layer_id(ids, existing), |surface| {
            surface.cloned()
        });

        let root = source
            .iter()
            .zip(copies.iter())
            .find(|(original, _)| &original.id == id)
            .map(|(_, copy)| copy.id.clone())
            .ok_or_else(|| MutationError::LayerNotFound(id.clone()))?;

        tracing::debug!("[duplicate_layer] {} -> {} ({} layers)", id, root, copies.len());
        self.layers.extend(copies);
        self.touch();
        Ok(root)
    }

    /// Re-parent a layer (or make it a root of its surface with `None`)
    pub fn move_layer(&mut self, id: &LayerId, new_parent: Option<&LayerId>) -> Result<(), MutationError> {
        self.layers
            .move_to(id, new_parent)
            .map_err(|e| refused("move_layer", e))?;

        tracing::debug!("[move_layer] {} -> {:?}", id, new_parent);
        self.touch();
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Interfaces
    // ---------------------------------------------------------------------

    /// Append an empty interface with a generated name
    pub fn add_interface(&mut self) -> InterfaceId {
        let id = self.fresh_interface_id();
        let name = self.interfaces.next_default_name();
        self.interfaces.push(id.clone(), name, self.meta.nudge_type);

        tracing::debug!("[add_interface] {}", id);
        self.touch();
        id
    }

    pub fn rename_interface(&mut self, id: &InterfaceId, name: &str) -> Result<(), MutationError> {
        self.interfaces
            .rename(id, name)
            .map_err(|e| refused("rename_interface", e))?;
        self.touch();
        Ok(())
    }

    /// Remove an interface and every layer on it. If it was the active
    /// surface, editing falls back to the main surface.
    pub fn delete_interface(&mut self, id: &InterfaceId) -> Result<Vec<LayerId>, MutationError> {
        self.interfaces
            .remove(id)
            .map_err(|e| refused("delete_interface", e))?;
        let removed = self.layers.remove_surface(id);

        if self.active.as_ref() == Some(id) {
            self.active = None;
        }

        tracing::debug!("[delete_interface] {} ({} layers removed)", id, removed.len());
        self.touch();
        Ok(removed)
    }

    /// Append a copy of an interface, deep-copying all of its layers
    pub fn duplicate_interface(&mut self, id: &InterfaceId) -> Result<InterfaceId, MutationError> {
        let source = self
            .interfaces
            .get(id)
            .cloned()
            .ok_or_else(|| refused("duplicate_interface", MutationError::InterfaceNotFound(id.clone())))?;
        let layers: Vec<Layer> = self.layers.on_surface(Some(id)).cloned().collect();

        let new_id = self.fresh_interface_id();
        let (ids, existing) = self.id_source();
        let copies = LayerTree::copy_layers(&layers, || next_free_layer_id(ids, existing), |_| {
            Some(new_id.clone())
        });

        self.interfaces
            .push(new_id.clone(), format!("{} Copy", source.name), source.nudge_type);
        tracing::debug!("[duplicate_interface] {} -> {} ({} layers)", id, new_id, copies.len());
        self.layers.extend(copies);
        self.touch();
        Ok(new_id)
    }

    /// Move the interface at `from` to `to`
    pub fn reorder_interface(&mut self, from: usize, to: usize) -> Result<(), MutationError> {
        self.interfaces
            .reorder(from, to)
            .map_err(|e| refused("reorder_interface", e))?;
        if from != to {
            tracing::debug!("[reorder_interface] {} -> {}", from, to);
            self.touch();
        }
        Ok(())
    }

    /// Finish a drag of `dragged` over `hovered`.
    ///
    /// Returns the move that was applied, or `None` when the drop does not
    /// change the order (including dropping an interface on itself).
    pub fn drop_interface(
        &mut self,
        dragged: &InterfaceId,
        hovered: &InterfaceId,
        position: DropPosition,
    ) -> Result<Option<Reorder>, MutationError> {
        for id in [dragged, hovered] {
            if !self.interfaces.contains(id) {
                return Err(refused("drop_interface", MutationError::InterfaceNotFound(id.clone())));
            }
        }

        let ordered = self.interfaces.ids();
        let Some(reorder) = resolve_drop(&ordered, dragged, hovered, position) else {
            return Ok(None);
        };
        self.reorder_interface(reorder.from, reorder.to)?;
        Ok(Some(reorder))
    }

    /// Choose the surface to edit; `None` selects the main surface
    pub fn set_active_interface(&mut self, id: Option<&InterfaceId>) -> Result<(), MutationError> {
        if let Some(id) = id {
            if !self.interfaces.contains(id) {
                return Err(refused(
                    "set_active_interface",
                    MutationError::InterfaceNotFound(id.clone()),
                ));
            }
        }
        self.active = id.cloned();
        Ok(())
    }
}

/// Next generated id not already present in `layers`
pub(crate) fn next_free_layer_id(ids: &mut IdGenerator, layers: &LayerTree) -> LayerId {
    loop {
        let id = ids.next_layer_id();
        if !layers.contains(&id) {
            return id;
        }
    }
}

pub(crate) fn refused(op: &str, error: MutationError) -> MutationError {
    tracing::warn!("[{}] refused: {}", op, error);
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use nudge_model::{LayerContent, TextContent};

    fn doc() -> Document {
        Document::new(CampaignId::new("welcome"), "Welcome", NudgeType::Modal)
    }

    #[test]
    fn test_create_document() {
        let doc = doc();
        assert_eq!(doc.version, 0);
        assert!(!doc.is_dirty());
        assert!(doc.interfaces().is_empty());
        assert!(doc.active_interface().is_none());
    }

    #[test]
    fn test_version_only_moves_on_success() {
        let mut doc = doc();
        let _ = doc.update_layer(&LayerId::from("ghost"), LayerPatch::name("x"));
        assert_eq!(doc.version, 0);

        doc.add_layer(LayerKind::Text, None).unwrap();
        assert_eq!(doc.version, 1);
        assert!(doc.is_dirty());

        doc.mark_saved();
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_root_layers_land_on_active_surface() {
        let mut doc = doc();
        let second = doc.add_interface();
        doc.set_active_interface(Some(&second)).unwrap();

        let id = doc.add_layer(LayerKind::Button, None).unwrap();

        assert_eq!(doc.layer(&id).unwrap().interface.as_ref(), Some(&second));
        assert!(doc.roots(None).is_empty());
        assert_eq!(doc.roots(Some(&second)).len(), 1);
    }

    #[test]
    fn test_set_active_interface_rejects_unknown() {
        let mut doc = doc();
        let result = doc.set_active_interface(Some(&InterfaceId::from("nope")));
        assert!(result.is_err());
        assert!(doc.active_interface().is_none());
    }

    #[test]
    fn test_text_content_merge_scenario() {
        let mut doc = doc();
        let id = doc.add_layer(LayerKind::Text, None).unwrap();
        let text = |t: TextContent| LayerPatch::content(LayerContent::Text(t));

        doc.update_layer(
            &id,
            text(TextContent {
                text: Some("hi".to_string()),
                ..Default::default()
            }),
        )
        .unwrap();
        doc.update_layer(
            &id,
            text(TextContent {
                color: Some("red".to_string()),
                ..Default::default()
            }),
        )
        .unwrap();

        let content = doc.layer(&id).unwrap().content.as_text().unwrap();
        assert_eq!(content.text.as_deref(), Some("hi"));
        assert_eq!(content.color.as_deref(), Some("red"));
    }

    #[test]
    fn test_ids_skip_existing_layers() {
        let mut doc = doc();
        let first = doc.add_layer(LayerKind::Text, None).unwrap();

        // Reopen the same campaign; the fresh generator starts from 1 again
        let mut reopened = Document::from_campaign(doc.to_campaign()).unwrap();
        let second = reopened.add_layer(LayerKind::Text, None).unwrap();

        assert_ne!(first, second);
        assert_eq!(reopened.layers().len(), 2);
    }

    #[test]
    fn test_metadata_edits() {
        let mut doc = doc();

        assert_eq!(doc.rename_campaign("  "), Err(MutationError::InvalidName));
        assert_eq!(doc.rename_campaign("Welcome"), Err(MutationError::UnchangedName));
        doc.rename_campaign("Onboarding").unwrap();
        assert_eq!(doc.name(), "Onboarding");

        doc.add_tag(" growth ").unwrap();
        assert!(doc.add_tag("growth").is_err());
        assert!(doc.meta().tags.contains("growth"));
        doc.remove_tag("growth").unwrap();
        assert!(doc.remove_tag("growth").is_err());

        doc.set_status(CampaignStatus::Active);
        assert_eq!(doc.meta().status, CampaignStatus::Active);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut doc = doc();
        let snapshot = doc.snapshot();
        let id = doc.add_layer(LayerKind::Carousel, None).unwrap();

        doc.restore(snapshot);
        assert!(doc.layer(&id).is_none());

        // Ids handed out before the restore are not reused
        let next = doc.add_layer(LayerKind::Carousel, None).unwrap();
        assert_ne!(next, id);
    }
}
