//! # Carousel Slides
//!
//! A carousel's slides are its direct children. Slides are always
//! containers, created through the regular layer path so they pick up the
//! slide blueprint in one step. The slide count is never stored; it is read
//! off the layer collection every time.

use crate::document::refused;
use crate::{Document, MutationError};
use nudge_model::{
    CarouselContent, Layer, LayerContent, LayerId, LayerKind, LayerPatch, SecondaryNavigation,
};

impl Document {
    /// Append a slide to a carousel. Returns the new slide's id.
    pub fn add_slide(&mut self, carousel: &LayerId) -> Result<LayerId, MutationError> {
        self.ensure_carousel(carousel)?;
        self.add_layer(LayerKind::Container, Some(carousel))
    }

    /// Delete a slide and its contents. Remaining slides keep their names.
    pub fn delete_slide(&mut self, slide: &LayerId) -> Result<Vec<LayerId>, MutationError> {
        let parent = self
            .layer(slide)
            .ok_or_else(|| refused("delete_slide", MutationError::LayerNotFound(slide.clone())))?
            .parent
            .clone();

        match parent {
            Some(parent) if self.is_carousel(&parent) => self.delete_layer(slide),
            _ => Err(refused(
                "delete_slide",
                MutationError::InvalidInput(format!("{} is not a carousel slide", slide)),
            )),
        }
    }

    /// Slides of a carousel, in display order
    pub fn slides(&self, carousel: &LayerId) -> Vec<&Layer> {
        if !self.is_carousel(carousel) {
            return Vec::new();
        }
        self.children(carousel)
    }

    pub fn slide_count(&self, carousel: &LayerId) -> usize {
        self.slides(carousel).len()
    }

    /// Patch carousel settings (effect, autoplay, arrows, navigation...)
    pub fn update_carousel(&mut self, carousel: &LayerId, patch: CarouselContent) -> Result<(), MutationError> {
        self.ensure_carousel(carousel)?;
        self.update_layer(carousel, LayerPatch::content(LayerContent::Carousel(patch)))
    }

    /// Switch secondary navigation, turning the other mode off in the same
    /// update
    pub fn set_carousel_navigation(
        &mut self,
        carousel: &LayerId,
        mode: SecondaryNavigation,
    ) -> Result<(), MutationError> {
        self.update_carousel(carousel, mode.to_patch())
    }

    fn is_carousel(&self, id: &LayerId) -> bool {
        self.layer(id).is_some_and(|l| l.kind() == LayerKind::Carousel)
    }

    fn ensure_carousel(&self, id: &LayerId) -> Result<(), MutationError> {
        match self.layer(id) {
            None => Err(refused("carousel", MutationError::LayerNotFound(id.clone()))),
            Some(layer) if layer.kind() != LayerKind::Carousel => Err(refused(
                "carousel",
                MutationError::InvalidInput(format!("{} is a {}, not a carousel", id, layer.kind())),
            )),
            Some(_) => Ok(()),
        }
    }
}
