//! # Edit Session Management
//!
//! An EditSession is one editor's view of a campaign: the document, its
//! undo history, and the current layer selection.

use crate::storage::CampaignStore;
use crate::{Document, EditorError, Mutation, MutationError, MutationResult, UndoStack};
use nudge_model::{CampaignId, LayerId};

/// Single edit session
#[derive(Debug)]
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    /// Document being edited
    pub document: Document,

    /// Undo/redo history for `document`
    pub history: UndoStack,

    /// Currently selected layers, in selection order
    pub selected_layers: Vec<LayerId>,
}

impl EditSession {
    /// Create new edit session
    pub fn new(id: impl Into<String>, document: Document) -> Self {
        Self::with_history(id, document, UndoStack::new())
    }

    pub fn with_history_limit(id: impl Into<String>, document: Document, levels: usize) -> Self {
        Self::with_history(id, document, UndoStack::with_max_levels(levels))
    }

    fn with_history(id: impl Into<String>, document: Document, history: UndoStack) -> Self {
        Self {
            id: id.into(),
            document,
            history,
            selected_layers: Vec::new(),
        }
    }

    /// Open a stored campaign in a fresh session
    pub fn open(
        id: impl Into<String>,
        store: &dyn CampaignStore,
        campaign_id: &CampaignId,
    ) -> Result<Self, EditorError> {
        let campaign = store.load(campaign_id)?;
        let document = Document::from_campaign(campaign)?;
        tracing::info!("[session] opened campaign {}", campaign_id);
        Ok(Self::new(id, document))
    }

    /// Hand the full campaign back to the store
    pub fn save(&mut self, store: &mut dyn CampaignStore) -> Result<(), EditorError> {
        store.save(&self.document.to_campaign())?;
        self.document.mark_saved();
        tracing::info!("[session] saved campaign {}", self.document.id());
        Ok(())
    }

    /// Apply a mutation and record it in the history. Layers that no longer
    /// exist afterwards drop out of the selection.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationResult, MutationError> {
        let result = self.history.apply(mutation, &mut self.document)?;
        self.prune_selection();
        Ok(result)
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.document);
        self.prune_selection();
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.document);
        self.prune_selection();
        redone
    }

    /// Swap in another document. History and selection belong to the old one
    /// and are discarded.
    pub fn load(&mut self, document: Document) {
        self.document = document;
        self.history.clear();
        self.selected_layers.clear();
    }

    /// Update selection. Unknown ids are ignored.
    pub fn set_selection(&mut self, layer_ids: Vec<LayerId>) {
        self.selected_layers = layer_ids;
        self.prune_selection();
    }

    fn prune_selection(&mut self) {
        let layers = self.document.layers();
        self.selected_layers.retain(|id| layers.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use nudge_model::{LayerKind, NudgeType};

    fn session() -> EditSession {
        let doc = Document::new(CampaignId::new("welcome"), "Welcome", NudgeType::Modal);
        EditSession::new("client-1", doc)
    }

    #[test]
    fn test_session_creation() {
        let session = session();
        assert_eq!(session.id, "client-1");
        assert!(session.selected_layers.is_empty());
        assert!(!session.history.can_undo());
    }

    #[test]
    fn test_delete_prunes_selection() {
        let mut session = session();
        let container = session.document.add_layer(LayerKind::Container, None).unwrap();
        let text = session
            .document
            .add_layer(LayerKind::Text, Some(&container))
            .unwrap();

        session.set_selection(vec![text.clone(), LayerId::from("ghost")]);
        assert_eq!(session.selected_layers, vec![text.clone()]);

        session
            .apply(&Mutation::DeleteLayer {
                layer_id: container.clone(),
            })
            .unwrap();
        assert!(session.selected_layers.is_empty());

        assert!(session.undo());
        assert!(session.document.layer(&text).is_some());
    }

    #[test]
    fn test_load_resets_history() {
        let mut session = session();
        session.apply(&Mutation::AddInterface).unwrap();
        assert!(session.history.can_undo());

        session.load(Document::new(CampaignId::new("other"), "Other", NudgeType::Banner));
        assert!(!session.history.can_undo());
        assert_eq!(session.document.name(), "Other");
    }

    #[test]
    fn test_open_and_save() {
        let mut store = MemoryStore::new();
        let mut session = session();
        session
            .apply(&Mutation::AddLayer {
                kind: LayerKind::Carousel,
                parent_id: None,
            })
            .unwrap();
        assert!(session.document.is_dirty());

        session.save(&mut store).unwrap();
        assert!(!session.document.is_dirty());

        let reopened = EditSession::open("client-2", &store, &CampaignId::new("welcome")).unwrap();
        assert_eq!(reopened.document.layers().len(), 1);
    }

    #[test]
    fn test_open_missing_campaign() {
        let store = MemoryStore::new();
        let result = EditSession::open("client-1", &store, &CampaignId::new("ghost"));
        assert!(matches!(result, Err(EditorError::Storage(_))));
    }
}
