//! # Document Mutations
//!
//! Every editor action as a serializable value. The UI (or a script) builds a
//! `Mutation`, the document applies it, and the undo history records it.
//!
//! ## Mutation Semantics
//!
//! - **All or nothing**: a mutation either applies fully or returns a
//!   `MutationError` and leaves the document untouched
//! - **Fresh ids**: anything created gets a new id, reported in the outcome
//! - **Cascading deletes**: deleting a layer or an interface removes every
//!   layer beneath it
//! - **Sibling order is insertion order**: new and moved layers are appended

use crate::reorder::{DropPosition, Reorder};
use crate::template::{ImportMode, ImportReport};
use crate::{Document, MutationError};
use nudge_model::{
    CampaignStatus, InterfaceId, LayerId, LayerKind, LayerPatch, NudgeType, Schedule,
    SecondaryNavigation, Template,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Add a layer under `parent_id`, or at the root of the active surface
    AddLayer {
        kind: LayerKind,
        #[serde(default)]
        parent_id: Option<LayerId>,
    },
    UpdateLayer {
        layer_id: LayerId,
        patch: LayerPatch,
    },
    DeleteLayer {
        layer_id: LayerId,
    },
    DuplicateLayer {
        layer_id: LayerId,
    },
    MoveLayer {
        layer_id: LayerId,
        #[serde(default)]
        new_parent_id: Option<LayerId>,
    },

    AddSlide {
        carousel_id: LayerId,
    },
    DeleteSlide {
        slide_id: LayerId,
    },
    SetCarouselNavigation {
        carousel_id: LayerId,
        mode: SecondaryNavigation,
    },

    AddInterface,
    RenameInterface {
        interface_id: InterfaceId,
        name: String,
    },
    DeleteInterface {
        interface_id: InterfaceId,
    },
    DuplicateInterface {
        interface_id: InterfaceId,
    },
    ReorderInterface {
        from_index: usize,
        to_index: usize,
    },
    DropInterface {
        dragged_id: InterfaceId,
        hovered_id: InterfaceId,
        position: DropPosition,
    },
    /// `None` selects the main surface
    SetActiveInterface {
        #[serde(default)]
        interface_id: Option<InterfaceId>,
    },

    RenameCampaign {
        name: String,
    },
    SetNudgeType {
        nudge_type: NudgeType,
    },
    SetStatus {
        status: CampaignStatus,
    },
    AddTag {
        tag: String,
    },
    RemoveTag {
        tag: String,
    },
    SetSchedule {
        #[serde(default)]
        schedule: Option<Schedule>,
    },

    ApplyTemplate {
        template: Template,
        #[serde(default)]
        mode: ImportMode,
    },
}

/// What a successful mutation produced
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Applied,
    LayerCreated(LayerId),
    InterfaceCreated(InterfaceId),
    Removed(Vec<LayerId>),
    Reordered(Option<Reorder>),
    Imported(ImportReport),
}

/// Result of applying a mutation
#[derive(Debug, Clone)]
pub struct MutationResult {
    /// New version number
    pub version: u64,

    pub outcome: MutationOutcome,
}

impl Mutation {
    /// Get a debug name for this mutation
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddLayer { .. } => "Add layer",
            Mutation::UpdateLayer { .. } => "Update layer",
            Mutation::DeleteLayer { .. } => "Delete layer",
            Mutation::DuplicateLayer { .. } => "Duplicate layer",
            Mutation::MoveLayer { .. } => "Move layer",
            Mutation::AddSlide { .. } => "Add slide",
            Mutation::DeleteSlide { .. } => "Delete slide",
            Mutation::SetCarouselNavigation { .. } => "Set carousel navigation",
            Mutation::AddInterface => "Add interface",
            Mutation::RenameInterface { .. } => "Rename interface",
            Mutation::DeleteInterface { .. } => "Delete interface",
            Mutation::DuplicateInterface { .. } => "Duplicate interface",
            Mutation::ReorderInterface { .. } => "Reorder interfaces",
            Mutation::DropInterface { .. } => "Reorder interfaces",
            Mutation::SetActiveInterface { .. } => "Switch interface",
            Mutation::RenameCampaign { .. } => "Rename campaign",
            Mutation::SetNudgeType { .. } => "Change nudge type",
            Mutation::SetStatus { .. } => "Change status",
            Mutation::AddTag { .. } => "Add tag",
            Mutation::RemoveTag { .. } => "Remove tag",
            Mutation::SetSchedule { .. } => "Change schedule",
            Mutation::ApplyTemplate { .. } => "Apply template",
        }
    }

    /// Whether this mutation changes the campaign itself (and so belongs in
    /// the undo history). Switching the edited surface does not.
    pub fn changes_campaign(&self) -> bool {
        !matches!(self, Mutation::SetActiveInterface { .. })
    }

    /// Apply mutation to the document
    pub fn apply(&self, doc: &mut Document) -> Result<MutationOutcome, MutationError> {
        use MutationOutcome::*;

        let outcome = match self {
            Mutation::AddLayer { kind, parent_id } => LayerCreated(doc.add_layer(*kind, parent_id.as_ref())?),
            Mutation::UpdateLayer { layer_id, patch } => {
                doc.update_layer(layer_id, patch.clone())?;
                Applied
            }
            Mutation::DeleteLayer { layer_id } => Removed(doc.delete_layer(layer_id)?),
            Mutation::DuplicateLayer { layer_id } => LayerCreated(doc.duplicate_layer(layer_id)?),
            Mutation::MoveLayer {
                layer_id,
                new_parent_id,
            } => {
                doc.move_layer(layer_id, new_parent_id.as_ref())?;
                Applied
            }

            Mutation::AddSlide { carousel_id } => LayerCreated(doc.add_slide(carousel_id)?),
            Mutation::DeleteSlide { slide_id } => Removed(doc.delete_slide(slide_id)?),
            Mutation::SetCarouselNavigation { carousel_id, mode } => {
                doc.set_carousel_navigation(carousel_id, *mode)?;
                Applied
            }

            Mutation::AddInterface => InterfaceCreated(doc.add_interface()),
            Mutation::RenameInterface { interface_id, name } => {
                doc.rename_interface(interface_id, name)?;
                Applied
            }
            Mutation::DeleteInterface { interface_id } => Removed(doc.delete_interface(interface_id)?),
            Mutation::DuplicateInterface { interface_id } => {
                InterfaceCreated(doc.duplicate_interface(interface_id)?)
            }
            Mutation::ReorderInterface { from_index, to_index } => {
                doc.reorder_interface(*from_index, *to_index)?;
                Reordered((from_index != to_index).then_some(Reorder {
                    from: *from_index,
                    to: *to_index,
                }))
            }
            Mutation::DropInterface {
                dragged_id,
                hovered_id,
                position,
            } => Reordered(doc.drop_interface(dragged_id, hovered_id, *position)?),
            Mutation::SetActiveInterface { interface_id } => {
                doc.set_active_interface(interface_id.as_ref())?;
                Applied
            }

            Mutation::RenameCampaign { name } => {
                doc.rename_campaign(name)?;
                Applied
            }
            Mutation::SetNudgeType { nudge_type } => {
                doc.set_nudge_type(*nudge_type);
                Applied
            }
            Mutation::SetStatus { status } => {
                doc.set_status(*status);
                Applied
            }
            Mutation::AddTag { tag } => {
                doc.add_tag(tag)?;
                Applied
            }
            Mutation::RemoveTag { tag } => {
                doc.remove_tag(tag)?;
                Applied
            }
            Mutation::SetSchedule { schedule } => {
                doc.set_schedule(schedule.clone())?;
                Applied
            }

            Mutation::ApplyTemplate { template, mode } => Imported(doc.apply_template_with(template, *mode)?),
        };

        Ok(outcome)
    }
}

impl Document {
    /// Apply a mutation
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationResult, MutationError> {
        let outcome = mutation.apply(self)?;
        Ok(MutationResult {
            version: self.version,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nudge_model::CampaignId;

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::MoveLayer {
            layer_id: LayerId::from("a-l1"),
            new_parent_id: Some(LayerId::from("a-l2")),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_script_format() {
        let script = r#"[
            { "op": "addInterface" },
            { "op": "addLayer", "kind": "carousel" },
            { "op": "reorderInterface", "fromIndex": 0, "toIndex": 0 },
            { "op": "dropInterface", "draggedId": "a", "hoveredId": "b", "position": "after" }
        ]"#;

        let mutations: Vec<Mutation> = serde_json::from_str(script).unwrap();
        assert_eq!(mutations[0], Mutation::AddInterface);
        assert_eq!(
            mutations[1],
            Mutation::AddLayer {
                kind: LayerKind::Carousel,
                parent_id: None
            }
        );
        assert!(matches!(
            mutations[3],
            Mutation::DropInterface {
                position: DropPosition::After,
                ..
            }
        ));
    }

    #[test]
    fn test_apply_reports_outcome_and_version() {
        let mut doc = Document::new(CampaignId::new("c"), "C", NudgeType::Modal);

        let result = doc
            .apply(&Mutation::AddLayer {
                kind: LayerKind::Carousel,
                parent_id: None,
            })
            .unwrap();
        assert_eq!(result.version, 1);
        let MutationOutcome::LayerCreated(carousel) = result.outcome else {
            panic!("expected a created layer");
        };

        let result = doc
            .apply(&Mutation::AddSlide {
                carousel_id: carousel.clone(),
            })
            .unwrap();
        assert!(matches!(result.outcome, MutationOutcome::LayerCreated(_)));
        assert_eq!(doc.slide_count(&carousel), 1);
    }

    #[test]
    fn test_failed_mutation_is_a_no_op() {
        let mut doc = Document::new(CampaignId::new("c"), "C", NudgeType::Modal);
        let before = doc.to_campaign();

        let result = doc.apply(&Mutation::DeleteLayer {
            layer_id: LayerId::from("ghost"),
        });

        assert_eq!(result.err(), Some(MutationError::LayerNotFound(LayerId::from("ghost"))));
        assert_eq!(doc.to_campaign(), before);
        assert_eq!(doc.version, 0);
    }
}
