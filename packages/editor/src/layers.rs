//! # Layer Operations
//!
//! The flat layer collection of one campaign. Layers reference their parent
//! by id; "children of X" is always computed by filtering, and sibling order
//! is collection order.

use crate::blueprint::blueprint;
use crate::MutationError;
use nudge_common::collect_subtree;
use nudge_model::{InterfaceId, Layer, LayerId, LayerKind, LayerPatch};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerTree {
    layers: Vec<Layer>,
}

impl LayerTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing collection. The caller is responsible for its
    /// structural validity.
    pub fn from_layers(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    pub fn into_layers(self) -> Vec<Layer> {
        self.layers
    }

    pub fn as_slice(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn get(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| &l.id == id)
    }

    pub fn contains(&self, id: &LayerId) -> bool {
        self.get(id).is_some()
    }

    fn position(&self, id: &LayerId) -> Option<usize> {
        self.layers.iter().position(|l| &l.id == id)
    }

    /// Direct children of `parent`, in sibling order
    pub fn children(&self, parent: &LayerId) -> impl Iterator<Item = &Layer> + '_ {
        let parent = parent.clone();
        self.layers.iter().filter(move |l| l.is_child_of(&parent))
    }

    pub fn child_count(&self, parent: &LayerId) -> usize {
        self.children(parent).count()
    }

    /// Root layers of a surface (`None` = main), in sibling order
    pub fn roots(&self, surface: Option<&InterfaceId>) -> impl Iterator<Item = &Layer> + '_ {
        let surface = surface.cloned();
        self.layers
            .iter()
            .filter(move |l| l.is_root() && l.is_on(surface.as_ref()))
    }

    /// Every layer drawn on a surface, nested or not
    pub fn on_surface(&self, surface: Option<&InterfaceId>) -> impl Iterator<Item = &Layer> + '_ {
        let surface = surface.cloned();
        self.layers.iter().filter(move |l| l.is_on(surface.as_ref()))
    }

    /// Ids of `root` and all its descendants, root first
    pub fn subtree_ids(&self, root: &LayerId) -> Vec<LayerId> {
        collect_subtree(&self.layers, root)
    }

    /// True if `ancestor` appears on the parent chain of `id`
    pub fn is_ancestor(&self, ancestor: &LayerId, id: &LayerId) -> bool {
        let mut current = self.get(id).and_then(|l| l.parent.as_ref());
        let mut steps = 0;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.layers.len() {
                break;
            }
            current = self.get(parent).and_then(|l| l.parent.as_ref());
        }
        false
    }

    /// Append a new layer of `kind` after its future siblings.
    ///
    /// Root layers land on `surface`; nested layers always share their
    /// parent's surface. Only containers may be placed directly in a
    /// carousel.
    pub fn add(
        &mut self,
        id: LayerId,
        kind: LayerKind,
        parent: Option<&LayerId>,
        surface: Option<&InterfaceId>,
    ) -> Result<&Layer, MutationError> {
        if self.contains(&id) {
            return Err(MutationError::InvalidInput(format!("layer id {} is taken", id)));
        }

        let (parent_kind, surface) = match parent {
            Some(parent_id) => {
                let parent = self
                    .get(parent_id)
                    .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
                (Some(parent.kind()), parent.interface.clone())
            }
            None => (None, surface.cloned()),
        };

        if parent_kind == Some(LayerKind::Carousel) && kind != LayerKind::Container {
            return Err(MutationError::InvalidStructure(format!(
                "a carousel can only hold container slides, not {}",
                kind
            )));
        }

        let position = match parent {
            Some(parent_id) => self.child_count(parent_id),
            None => self.roots(surface.as_ref()).count(),
        } + 1;
        let bp = blueprint(kind, parent_kind, position);

        self.layers.push(Layer {
            id,
            parent: parent.cloned(),
            interface: surface,
            name: bp.name,
            content: bp.content,
            style: bp.style,
            size: bp.size,
        });

        Ok(&self.layers[self.layers.len() - 1])
    }

    /// Shallow-merge `patch` into a layer.
    ///
    /// A refused patch leaves the whole layer untouched.
    pub fn update(&mut self, id: &LayerId, patch: LayerPatch) -> Result<(), MutationError> {
        let index = self
            .position(id)
            .ok_or_else(|| MutationError::LayerNotFound(id.clone()))?;
        let layer = &mut self.layers[index];

        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(MutationError::InvalidName);
            }
        }
        if let Some(content) = &patch.content {
            if content.as_carousel().is_some_and(|c| c.enables_both_navigations()) {
                return Err(MutationError::InvalidInput(
                    "dots and thumbnails cannot both be enabled".to_string(),
                ));
            }
        }

        // Content goes first: a kind mismatch is the last way to refuse
        if let Some(content) = patch.content {
            layer
                .content
                .merge(content)
                .map_err(|rejected| MutationError::ContentMismatch {
                    layer: layer.kind().to_string(),
                    patch: rejected.kind().to_string(),
                })?;
        }
        if let Some(name) = patch.name {
            layer.name = name.trim().to_string();
        }
        if let Some(style) = patch.style {
            layer.style.merge(style);
        }
        if let Some(size) = patch.size {
            layer.size.merge(size);
        }
        Ok(())
    }

    /// Remove a layer together with every descendant.
    ///
    /// Returns the removed ids, root first.
    pub fn remove(&mut self, id: &LayerId) -> Result<Vec<LayerId>, MutationError> {
        if !self.contains(id) {
            return Err(MutationError::LayerNotFound(id.clone()));
        }
        let removed = self.subtree_ids(id);
        let doomed: HashSet<&LayerId> = removed.iter().collect();
        self.layers.retain(|l| !doomed.contains(&l.id));
        Ok(removed)
    }

    /// Remove every layer drawn on an interface
    pub fn remove_surface(&mut self, surface: &InterfaceId) -> Vec<LayerId> {
        let removed: Vec<LayerId> = self.on_surface(Some(surface)).map(|l| l.id.clone()).collect();
        self.layers.retain(|l| !l.is_on(Some(surface)));
        removed
    }

    /// Re-parent a layer, appending it after its new siblings.
    ///
    /// Descendants move with it. Moves across surfaces are refused. A
    /// container moved into a carousel becomes a slide and takes the slide
    /// blueprint.
    pub fn move_to(&mut self, id: &LayerId, new_parent: Option<&LayerId>) -> Result<(), MutationError> {
        let index = self
            .position(id)
            .ok_or_else(|| MutationError::LayerNotFound(id.clone()))?;

        let mut becomes_slide = None;
        if let Some(parent_id) = new_parent {
            let parent = self
                .get(parent_id)
                .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
            if parent_id == id || self.is_ancestor(id, parent_id) {
                return Err(MutationError::CycleDetected);
            }
            let layer = &self.layers[index];
            if parent.interface != layer.interface {
                return Err(MutationError::InvalidStructure(
                    "cannot move a layer to another surface".to_string(),
                ));
            }
            if parent.kind() == LayerKind::Carousel && layer.kind() != LayerKind::Container {
                return Err(MutationError::InvalidStructure(format!(
                    "a carousel can only hold container slides, not {}",
                    layer.kind()
                )));
            }
            if parent.kind() == LayerKind::Carousel && layer.parent.as_ref() != Some(parent_id) {
                becomes_slide = Some(self.child_count(parent_id) + 1);
            }
        }

        let mut layer = self.layers.remove(index);
        layer.parent = new_parent.cloned();
        if let Some(position) = becomes_slide {
            let bp = blueprint(LayerKind::Container, Some(LayerKind::Carousel), position);
            layer.name = bp.name;
            layer.style = bp.style;
            layer.size = bp.size;
        }
        self.layers.push(layer);
        Ok(())
    }

    /// Deep-copy `source` layers with fresh ids.
    ///
    /// Parent references inside `source` are rewritten to the copies; parents
    /// outside it are kept. `surface` maps each layer's surface to the
    /// surface of its copy. Copies come back in `source` order, so relative
    /// sibling order survives.
    pub fn copy_layers<F, S>(source: &[Layer], mut next_id: F, surface: S) -> Vec<Layer>
    where
        F: FnMut() -> LayerId,
        S: Fn(Option<&InterfaceId>) -> Option<InterfaceId>,
    {
        let fresh: Vec<LayerId> = source.iter().map(|_| next_id()).collect();
        let mapping: HashMap<&LayerId, &LayerId> =
            source.iter().map(|l| &l.id).zip(fresh.iter()).collect();

        source
            .iter()
            .zip(fresh.iter())
            .map(|(layer, id)| Layer {
                id: id.clone(),
                parent: layer
                    .parent
                    .as_ref()
                    .map(|p| mapping.get(p).map(|n| (*n).clone()).unwrap_or_else(|| p.clone())),
                interface: surface(layer.interface.as_ref()),
                ..layer.clone()
            })
            .collect()
    }

    /// Layers making up the subtree of `root`, in collection order
    pub fn subtree(&self, root: &LayerId) -> Vec<Layer> {
        let ids: HashSet<LayerId> = self.subtree_ids(root).into_iter().collect();
        self.layers.iter().filter(|l| ids.contains(&l.id)).cloned().collect()
    }

    /// Append already-built layers (copies, template content)
    pub fn extend(&mut self, layers: impl IntoIterator<Item = Layer>) {
        self.layers.extend(layers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nudge_model::{LayerContent, Style, TextContent};

    fn id(s: &str) -> LayerId {
        LayerId::from(s)
    }

    fn tree_with(ids: &[(&str, LayerKind, Option<&str>)]) -> LayerTree {
        let mut tree = LayerTree::new();
        for (layer_id, kind, parent) in ids {
            tree.add(id(layer_id), *kind, parent.map(id).as_ref(), None).unwrap();
        }
        tree
    }

    #[test]
    fn test_add_appends_after_siblings() {
        let tree = tree_with(&[
            ("root", LayerKind::Container, None),
            ("a", LayerKind::Text, Some("root")),
            ("b", LayerKind::Image, Some("root")),
        ]);

        let children: Vec<&str> = tree.children(&id("root")).map(|l| l.id.as_str()).collect();
        assert_eq!(children, vec!["a", "b"]);
        assert_eq!(tree.get(&id("b")).unwrap().name, "Image 2");
    }

    #[test]
    fn test_add_with_unknown_parent_fails() {
        let mut tree = LayerTree::new();
        let result = tree.add(id("a"), LayerKind::Text, Some(&id("ghost")), None);

        assert_eq!(result.err(), Some(MutationError::ParentNotFound(id("ghost"))));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_nested_layers_inherit_surface() {
        let surface = InterfaceId::from("second");
        let mut tree = LayerTree::new();
        tree.add(id("root"), LayerKind::Container, None, Some(&surface)).unwrap();
        // Passing a different surface for a nested layer is ignored
        tree.add(id("child"), LayerKind::Text, Some(&id("root")), None).unwrap();

        assert_eq!(tree.get(&id("child")).unwrap().interface, Some(surface));
    }

    #[test]
    fn test_update_rejects_whole_patch_on_mismatch() {
        let mut tree = tree_with(&[("t", LayerKind::Text, None)]);
        let before = tree.get(&id("t")).unwrap().clone();

        let patch = LayerPatch {
            name: Some("Renamed".to_string()),
            content: Some(LayerContent::Image(Default::default())),
            ..Default::default()
        };

        assert_eq!(
            tree.update(&id("t"), patch),
            Err(MutationError::ContentMismatch {
                layer: LayerKind::Text.to_string(),
                patch: LayerKind::Image.to_string(),
            })
        );
        assert_eq!(tree.get(&id("t")).unwrap(), &before);
    }

    #[test]
    fn test_roots_accept_a_temporary_surface() {
        let mut tree = tree_with(&[("main", LayerKind::Text, None)]);
        tree.add(id("side"), LayerKind::Text, None, Some(&InterfaceId::from("second")))
            .unwrap();

        let side: Vec<&str> = tree
            .roots(Some(&InterfaceId::from("second")))
            .map(|l| l.id.as_str())
            .collect();
        let main: Vec<&str> = tree.roots(None).map(|l| l.id.as_str()).collect();

        assert_eq!(side, vec!["side"]);
        assert_eq!(main, vec!["main"]);
        assert_eq!(tree.on_surface(Some(&InterfaceId::from("second"))).count(), 1);
    }

    #[test]
    fn test_move_into_carousel_becomes_slide() {
        let mut tree = tree_with(&[
            ("car", LayerKind::Carousel, None),
            ("s1", LayerKind::Container, Some("car")),
            ("box", LayerKind::Container, None),
        ]);

        tree.move_to(&id("box"), Some(&id("car"))).unwrap();

        let moved = tree.get(&id("box")).unwrap();
        let slide = blueprint(LayerKind::Container, Some(LayerKind::Carousel), 2);
        assert_eq!(moved.name, "Slide 2");
        assert_eq!(moved.style, slide.style);
        assert_eq!(moved.size, slide.size);
        assert_eq!(tree.child_count(&id("car")), 2);
    }

    #[test]
    fn test_update_unknown_layer() {
        let mut tree = LayerTree::new();
        assert_eq!(
            tree.update(&id("x"), LayerPatch::name("X")),
            Err(MutationError::LayerNotFound(id("x")))
        );
    }

    #[test]
    fn test_update_touches_only_target() {
        let mut tree = tree_with(&[("a", LayerKind::Text, None), ("b", LayerKind::Text, None)]);
        let other = tree.get(&id("b")).unwrap().clone();

        tree.update(
            &id("a"),
            LayerPatch::content(LayerContent::Text(TextContent {
                text: Some("hi".to_string()),
                ..Default::default()
            })),
        )
        .unwrap();

        assert_eq!(tree.get(&id("b")).unwrap(), &other);
        assert_eq!(
            tree.get(&id("a")).unwrap().content.as_text().unwrap().text.as_deref(),
            Some("hi")
        );
    }

    #[test]
    fn test_remove_cascades() {
        let mut tree = tree_with(&[
            ("root", LayerKind::Container, None),
            ("a", LayerKind::Container, Some("root")),
            ("b", LayerKind::Text, Some("a")),
            ("other", LayerKind::Text, None),
        ]);

        let removed = tree.remove(&id("root")).unwrap();

        assert_eq!(removed, vec![id("root"), id("a"), id("b")]);
        assert_eq!(tree.len(), 1);
        assert!(tree.contains(&id("other")));
        assert_eq!(tree.remove(&id("root")), Err(MutationError::LayerNotFound(id("root"))));
    }

    #[test]
    fn test_move_rejects_cycles() {
        let mut tree = tree_with(&[
            ("a", LayerKind::Container, None),
            ("b", LayerKind::Container, Some("a")),
            ("c", LayerKind::Container, Some("b")),
        ]);

        assert_eq!(tree.move_to(&id("a"), Some(&id("c"))), Err(MutationError::CycleDetected));
        assert_eq!(tree.move_to(&id("a"), Some(&id("a"))), Err(MutationError::CycleDetected));

        tree.move_to(&id("c"), None).unwrap();
        assert!(tree.get(&id("c")).unwrap().is_root());
        assert_eq!(tree.iter().last().unwrap().id, id("c"));
    }

    #[test]
    fn test_move_into_carousel_requires_container() {
        let mut tree = tree_with(&[("car", LayerKind::Carousel, None), ("t", LayerKind::Text, None)]);
        assert!(matches!(
            tree.move_to(&id("t"), Some(&id("car"))),
            Err(MutationError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_copy_layers_remaps_internal_parents() {
        let tree = tree_with(&[
            ("outer", LayerKind::Container, None),
            ("root", LayerKind::Container, Some("outer")),
            ("child", LayerKind::Text, Some("root")),
        ]);
        let source = tree.subtree(&id("root"));
        let mut n = 0;

        let copies = LayerTree::copy_layers(
            &source,
            || {
                n += 1;
                id(&format!("copy-{}", n))
            },
            |surface| surface.cloned(),
        );

        assert_eq!(copies.len(), 2);
        assert_eq!(copies[0].id, id("copy-1"));
        assert_eq!(copies[0].parent, Some(id("outer")));
        assert_eq!(copies[1].parent, Some(id("copy-1")));
        assert_eq!(copies[1].content, source[1].content);
        assert_eq!(copies[1].style, source[1].style);
    }

    #[test]
    fn test_style_patch_is_shallow() {
        let mut tree = tree_with(&[("c", LayerKind::Container, None)]);
        let before = tree.get(&id("c")).unwrap().style.clone();

        tree.update(
            &id("c"),
            LayerPatch::style(Style {
                z_index: Some(1),
                ..Default::default()
            }),
        )
        .unwrap();

        let after = &tree.get(&id("c")).unwrap().style;
        assert_eq!(after.z_index, Some(1));
        assert_eq!(Style { z_index: None, ..after.clone() }, before);
    }
}
