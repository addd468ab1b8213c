//! Structural checks shared by campaign loading and template import.
//!
//! A structure is valid when:
//! - interface ids and layer ids are unique
//! - every layer's surface is the main surface or a listed interface
//! - every parent reference resolves, lives on the same surface, and is not
//!   the layer itself
//! - carousel children are containers
//! - no carousel enables both dots and thumbnails
//! - no layer is its own ancestor

use crate::MutationError;
use nudge_model::{CampaignInterface, Layer, LayerId, LayerKind};
use std::collections::{HashMap, HashSet};

pub fn validate(interfaces: &[CampaignInterface], layers: &[Layer]) -> Result<(), MutationError> {
    let mut interface_ids = HashSet::new();
    for interface in interfaces {
        if !interface_ids.insert(&interface.id) {
            return Err(invalid(format!("duplicate interface id {}", interface.id)));
        }
    }

    let mut by_id: HashMap<&LayerId, &Layer> = HashMap::with_capacity(layers.len());
    for layer in layers {
        if by_id.insert(&layer.id, layer).is_some() {
            return Err(invalid(format!("duplicate layer id {}", layer.id)));
        }
    }

    for layer in layers {
        if let Some(surface) = &layer.interface {
            if !interface_ids.contains(surface) {
                return Err(invalid(format!("layer {} is on unknown interface {}", layer.id, surface)));
            }
        }

        if layer.content.as_carousel().is_some_and(|c| c.enables_both_navigations()) {
            return Err(invalid(format!("carousel {} enables both dots and thumbnails", layer.id)));
        }

        let Some(parent_id) = &layer.parent else {
            continue;
        };
        if parent_id == &layer.id {
            return Err(MutationError::CycleDetected);
        }
        let parent = by_id
            .get(parent_id)
            .ok_or_else(|| invalid(format!("layer {} has dangling parent {}", layer.id, parent_id)))?;
        if parent.interface != layer.interface {
            return Err(invalid(format!("layer {} is not on its parent's surface", layer.id)));
        }
        if parent.kind() == LayerKind::Carousel && layer.kind() != LayerKind::Container {
            return Err(invalid(format!("carousel slide {} must be a container", layer.id)));
        }
    }

    if has_cycle(&by_id) {
        return Err(MutationError::CycleDetected);
    }

    Ok(())
}

/// Follow each parent chain. A chain longer than the number of layers must
/// revisit a layer.
fn has_cycle(by_id: &HashMap<&LayerId, &Layer>) -> bool {
    let mut acyclic: HashSet<&LayerId> = HashSet::with_capacity(by_id.len());

    for start in by_id.keys() {
        let mut chain = Vec::new();
        let mut current = Some(*start);

        while let Some(id) = current {
            if acyclic.contains(id) {
                break;
            }
            if chain.len() > by_id.len() {
                return true;
            }
            chain.push(id);
            current = by_id.get(id).and_then(|layer| layer.parent.as_ref());
        }

        acyclic.extend(chain);
    }

    false
}

fn invalid(reason: String) -> MutationError {
    MutationError::InvalidStructure(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nudge_model::{CarouselContent, ContainerContent, InterfaceId, LayerContent, NudgeType, TextContent};

    fn container(id: &str, parent: Option<&str>) -> Layer {
        Layer {
            id: LayerId::from(id),
            parent: parent.map(LayerId::from),
            interface: None,
            name: id.to_string(),
            content: LayerContent::Container(ContainerContent::default()),
            style: Default::default(),
            size: Default::default(),
        }
    }

    #[test]
    fn test_valid_tree_passes() {
        let layers = vec![container("a", None), container("b", Some("a")), container("c", Some("b"))];
        assert_eq!(validate(&[], &layers), Ok(()));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let layers = vec![container("a", None), container("a", None)];
        assert!(matches!(validate(&[], &layers), Err(MutationError::InvalidStructure(_))));
    }

    #[test]
    fn test_dangling_parent_rejected() {
        let layers = vec![container("a", Some("ghost"))];
        assert!(matches!(validate(&[], &layers), Err(MutationError::InvalidStructure(_))));
    }

    #[test]
    fn test_cycle_rejected() {
        let layers = vec![container("a", Some("c")), container("b", Some("a")), container("c", Some("b"))];
        assert_eq!(validate(&[], &layers), Err(MutationError::CycleDetected));

        let self_parent = vec![container("a", Some("a"))];
        assert_eq!(validate(&[], &self_parent), Err(MutationError::CycleDetected));
    }

    #[test]
    fn test_surface_rules() {
        let mut orphan_surface = container("a", None);
        orphan_surface.interface = Some(InterfaceId::from("missing"));
        assert!(validate(&[], &[orphan_surface.clone()]).is_err());

        let interface = CampaignInterface {
            id: InterfaceId::from("missing"),
            name: "Second".to_string(),
            nudge_type: NudgeType::Modal,
        };
        assert!(validate(&[interface.clone()], &[orphan_surface.clone()]).is_ok());

        // Child on a different surface than its parent
        let child = container("b", Some("a"));
        assert!(validate(&[interface], &[orphan_surface, child]).is_err());
    }

    #[test]
    fn test_carousel_children_must_be_containers() {
        let carousel = Layer {
            content: LayerContent::Carousel(Default::default()),
            ..container("car", None)
        };
        let text_slide = Layer {
            content: LayerContent::Text(TextContent::default()),
            ..container("t", Some("car"))
        };
        assert!(validate(&[], &[carousel.clone(), container("s", Some("car"))]).is_ok());
        assert!(validate(&[], &[carousel, text_slide]).is_err());
    }

    #[test]
    fn test_carousel_with_both_navigations_rejected() {
        let both = Layer {
            content: LayerContent::Carousel(CarouselContent {
                show_dots: Some(true),
                show_thumbnails: Some(true),
                ..Default::default()
            }),
            ..container("car", None)
        };
        assert!(matches!(validate(&[], &[both.clone()]), Err(MutationError::InvalidStructure(_))));

        let dots_only = Layer {
            content: LayerContent::Carousel(CarouselContent {
                show_dots: Some(true),
                show_thumbnails: Some(false),
                ..Default::default()
            }),
            ..both
        };
        assert_eq!(validate(&[], &[dots_only]), Ok(()));
    }
}
