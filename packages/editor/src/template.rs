//! # Template Import
//!
//! Copies a template's interfaces and layers into the open campaign. Every
//! id is regenerated and internal parent links are rewritten to the copies.
//! The import is staged on a copy of the structure and only swapped in once
//! the combined result passes the integrity checks; on any failure the
//! document is left as it was.

use crate::document::{next_free_layer_id, refused};
use crate::integrity;
use crate::layers::LayerTree;
use crate::{Document, MutationError};
use nudge_model::{CampaignInterface, InterfaceId, LayerId, Template};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Keep existing content. Template main-surface layers go to the active
    /// surface; template interfaces are appended.
    #[default]
    Merge,
    /// Drop all interfaces and layers first, then install the template.
    Replace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub interfaces: Vec<InterfaceId>,
    pub layers: Vec<LayerId>,
    /// The template was built for another nudge type than the campaign
    pub nudge_type_mismatch: bool,
}

impl Document {
    pub fn apply_template(&mut self, template: &Template) -> Result<ImportReport, MutationError> {
        self.apply_template_with(template, ImportMode::Merge)
    }

    pub fn apply_template_with(
        &mut self,
        template: &Template,
        mode: ImportMode,
    ) -> Result<ImportReport, MutationError> {
        integrity::validate(&template.interfaces, &template.layers)
            .map_err(|e| refused("apply_template", e))?;

        let nudge_type_mismatch = template.nudge_type != self.nudge_type();
        if nudge_type_mismatch {
            tracing::warn!(
                "[apply_template] template {:?} is {} but campaign is {}",
                template.name,
                template.nudge_type,
                self.nudge_type()
            );
        }

        let (mut interfaces, mut layers, target) = match mode {
            ImportMode::Merge => (
                self.interface_list().clone(),
                self.layers().clone(),
                self.active_interface().cloned(),
            ),
            ImportMode::Replace => Default::default(),
        };

        let mut surface_map: HashMap<&InterfaceId, InterfaceId> = HashMap::new();
        let mut new_interfaces = Vec::with_capacity(template.interfaces.len());
        for interface in &template.interfaces {
            let id = self.fresh_interface_id();
            surface_map.insert(&interface.id, id.clone());
            new_interfaces.push(CampaignInterface {
                id,
                ..interface.clone()
            });
        }

        let (ids, existing) = self.id_source();
        let copies = LayerTree::copy_layers(
            &template.layers,
            || next_free_layer_id(ids, existing),
            |surface| match surface {
                None => target.clone(),
                Some(id) => surface_map.get(id).cloned(),
            },
        );

        let report = ImportReport {
            interfaces: new_interfaces.iter().map(|i| i.id.clone()).collect(),
            layers: copies.iter().map(|l| l.id.clone()).collect(),
            nudge_type_mismatch,
        };

        interfaces.extend(new_interfaces);
        layers.extend(copies);
        integrity::validate(interfaces.as_slice(), layers.as_slice())
            .map_err(|e| refused("apply_template", e))?;

        tracing::debug!(
            "[apply_template] {:?}: {} interfaces, {} layers ({:?})",
            template.name,
            report.interfaces.len(),
            report.layers.len(),
            mode
        );
        self.replace_structure(interfaces, layers, target);
        self.touch();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nudge_model::{CampaignId, ContainerContent, Layer, LayerContent, LayerKind, NudgeType};

    fn layer(id: &str, parent: Option<&str>, interface: Option<&str>, kind: LayerKind) -> Layer {
        let content = match kind {
            LayerKind::Carousel => LayerContent::Carousel(Default::default()),
            LayerKind::Text => LayerContent::Text(Default::default()),
            _ => LayerContent::Container(ContainerContent::default()),
        };
        Layer {
            id: LayerId::from(id),
            parent: parent.map(LayerId::from),
            interface: interface.map(InterfaceId::from),
            name: id.to_string(),
            content,
            style: Default::default(),
            size: Default::default(),
        }
    }

    fn template() -> Template {
        Template {
            name: "Promo".to_string(),
            nudge_type: NudgeType::Modal,
            interfaces: vec![CampaignInterface {
                id: InterfaceId::from("t-i1"),
                name: "Thanks".to_string(),
                nudge_type: NudgeType::Banner,
            }],
            layers: vec![
                layer("t-1", None, None, LayerKind::Container),
                layer("t-2", Some("t-1"), None, LayerKind::Text),
                layer("t-3", None, Some("t-i1"), LayerKind::Carousel),
                layer("t-4", Some("t-3"), Some("t-i1"), LayerKind::Container),
            ],
        }
    }

    fn doc() -> Document {
        Document::new(CampaignId::new("c"), "C", NudgeType::Modal)
    }

    #[test]
    fn test_merge_regenerates_ids_and_remaps_parents() {
        let mut doc = doc();
        let existing = doc.add_layer(LayerKind::Text, None).unwrap();

        let report = doc.apply_template(&template()).unwrap();

        assert_eq!(report.layers.len(), 4);
        assert_eq!(report.interfaces.len(), 1);
        assert!(!report.nudge_type_mismatch);
        assert!(doc.layer(&existing).is_some());
        assert_eq!(doc.layers().len(), 5);
        for id in &report.layers {
            assert!(!id.as_str().starts_with("t-"));
        }

        let copied_root = &report.layers[0];
        let copied_child = doc.layer(&report.layers[1]).unwrap();
        assert_eq!(copied_child.parent.as_ref(), Some(copied_root));

        let new_interface = &report.interfaces[0];
        assert_eq!(doc.interface(new_interface).unwrap().name, "Thanks");
        let carousel = doc.layer(&report.layers[2]).unwrap();
        assert_eq!(carousel.interface.as_ref(), Some(new_interface));
        assert_eq!(doc.slide_count(&carousel.id), 1);
    }

    #[test]
    fn test_importing_twice_never_collides() {
        let mut doc = doc();
        let first = doc.apply_template(&template()).unwrap();
        let second = doc.apply_template(&template()).unwrap();

        for id in &second.layers {
            assert!(!first.layers.contains(id));
        }
        assert_eq!(doc.layers().len(), 8);
        assert_eq!(doc.interfaces().len(), 2);
    }

    #[test]
    fn test_main_layers_go_to_active_surface() {
        let mut doc = doc();
        let surface = doc.add_interface();
        doc.set_active_interface(Some(&surface)).unwrap();

        let report = doc.apply_template(&template()).unwrap();

        assert_eq!(doc.layer(&report.layers[0]).unwrap().interface.as_ref(), Some(&surface));
        assert_eq!(doc.layer(&report.layers[1]).unwrap().interface.as_ref(), Some(&surface));
    }

    #[test]
    fn test_replace_drops_existing_content() {
        let mut doc = doc();
        let surface = doc.add_interface();
        doc.set_active_interface(Some(&surface)).unwrap();
        doc.add_layer(LayerKind::Text, None).unwrap();

        doc.apply_template_with(&template(), ImportMode::Replace).unwrap();

        assert_eq!(doc.layers().len(), 4);
        assert_eq!(doc.interfaces().len(), 1);
        assert!(doc.interface(&surface).is_none());
        assert!(doc.active_interface().is_none());
    }

    #[test]
    fn test_inconsistent_template_changes_nothing() {
        let mut doc = doc();
        doc.add_layer(LayerKind::Container, None).unwrap();
        let before = doc.to_campaign();
        let version = doc.version;

        let mut broken = template();
        broken.layers.push(layer("t-5", Some("missing"), None, LayerKind::Text));

        assert!(doc.apply_template(&broken).is_err());
        assert_eq!(doc.to_campaign(), before);
        assert_eq!(doc.version, version);
    }

    #[test]
    fn test_nudge_type_mismatch_is_reported_not_refused() {
        let mut doc = doc();
        let mut banner = template();
        banner.nudge_type = NudgeType::Banner;

        let report = doc.apply_template(&banner).unwrap();
        assert!(report.nudge_type_mismatch);
    }
}
