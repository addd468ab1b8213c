use nudge_model::{Campaign, CampaignInterface, InterfaceId, Layer, LayerId};

/// Visitor pattern for traversing a campaign's layer tree
///
/// Surfaces are visited main-first, then interfaces in list order. Within a
/// surface, layers are walked depth-first with siblings in insertion order.
/// Override specific visit_* methods to act on nodes; call the matching
/// `walk_*` function to keep descending.
///
/// Walking assumes the parent references are acyclic.
pub trait Visitor: Sized {
    fn visit_campaign(&mut self, campaign: &Campaign) {
        walk_campaign(self, campaign);
    }

    /// `interface` is `None` for the main surface
    fn visit_surface(&mut self, layers: &[Layer], interface: Option<&CampaignInterface>) {
        walk_surface(self, layers, interface.map(|i| &i.id));
    }

    fn visit_layer(&mut self, layers: &[Layer], layer: &Layer, depth: usize) {
        walk_layer(self, layers, layer, depth);
    }
}

pub fn walk_campaign<V: Visitor>(visitor: &mut V, campaign: &Campaign) {
    visitor.visit_surface(&campaign.layers, None);
    for interface in &campaign.interfaces {
        visitor.visit_surface(&campaign.layers, Some(interface));
    }
}

pub fn walk_surface<V: Visitor>(visitor: &mut V, layers: &[Layer], surface: Option<&InterfaceId>) {
    for root in layers.iter().filter(|l| l.is_root() && l.is_on(surface)) {
        visitor.visit_layer(layers, root, 0);
    }
}

pub fn walk_layer<V: Visitor>(visitor: &mut V, layers: &[Layer], layer: &Layer, depth: usize) {
    for child in layers.iter().filter(|l| l.is_child_of(&layer.id)) {
        visitor.visit_layer(layers, child, depth + 1);
    }
}

/// Collects the ids of a layer and all of its descendants, root first
#[derive(Debug, Default)]
pub struct SubtreeCollector {
    pub ids: Vec<LayerId>,
}

impl Visitor for SubtreeCollector {
    fn visit_layer(&mut self, layers: &[Layer], layer: &Layer, depth: usize) {
        self.ids.push(layer.id.clone());
        walk_layer(self, layers, layer, depth);
    }
}

/// Ids of `root` and every layer beneath it. Empty if `root` is unknown.
pub fn collect_subtree(layers: &[Layer], root: &LayerId) -> Vec<LayerId> {
    let mut collector = SubtreeCollector::default();
    if let Some(layer) = layers.iter().find(|l| &l.id == root) {
        collector.visit_layer(layers, layer, 0);
    }
    collector.ids
}
