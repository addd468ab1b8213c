//! Type-specific layer payloads.
//!
//! `LayerContent` is tagged by layer kind, so a layer's kind is always the
//! kind of its content. Patches reuse the same types with only the changed
//! fields set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Container,
    Text,
    Image,
    Button,
    Carousel,
}

impl LayerKind {
    pub const ALL: [LayerKind; 5] = [
        LayerKind::Container,
        LayerKind::Text,
        LayerKind::Image,
        LayerKind::Button,
        LayerKind::Carousel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Container => "container",
            LayerKind::Text => "text",
            LayerKind::Image => "image",
            LayerKind::Button => "button",
            LayerKind::Carousel => "carousel",
        }
    }

    /// Human-readable label used for default layer names
    pub fn label(&self) -> &'static str {
        match self {
            LayerKind::Container => "Container",
            LayerKind::Text => "Text",
            LayerKind::Image => "Image",
            LayerKind::Button => "Button",
            LayerKind::Carousel => "Carousel",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayerKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown layer type: {}", s))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerContent {
    /// Background media URL (never fetched by the editor)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// Deep link opened when the container is tapped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ContainerContent {
    pub fn merge(&mut self, patch: ContainerContent) {
        merge_fields!(self, patch; background_image, link);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
}

impl TextContent {
    pub fn merge(&mut self, patch: TextContent) {
        merge_fields!(self, patch; text, color, font_size, font_weight, text_align);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<String>,
}

impl ImageContent {
    pub fn merge(&mut self, patch: ImageContent) {
        merge_fields!(self, patch; src, alt, object_fit);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonAction {
    Dismiss,
    OpenUrl,
    NextInterface,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ButtonAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

impl ButtonContent {
    pub fn merge(&mut self, patch: ButtonContent) {
        merge_fields!(self, patch; label, action, url, text_color);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionEffect {
    Slide,
    Fade,
    Coverflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowType {
    Chevron,
    Arrow,
    Circle,
}

/// Secondary navigation shown under a carousel. Dots and thumbnails are
/// mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecondaryNavigation {
    None,
    Dots,
    Thumbnails,
}

impl SecondaryNavigation {
    /// A carousel patch that switches to this mode and turns the other off
    pub fn to_patch(self) -> CarouselContent {
        CarouselContent {
            show_dots: Some(self == SecondaryNavigation::Dots),
            show_thumbnails: Some(self == SecondaryNavigation::Thumbnails),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<TransitionEffect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay_interval_ms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_on_hover: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infinite_loop: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_arrows: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrow_type: Option<ArrowType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrow_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrow_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrow_offset: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_dots: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dot_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_dot_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_thumbnails: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_size: Option<u32>,
}

impl CarouselContent {
    /// Shallow merge that keeps dots and thumbnails mutually exclusive.
    ///
    /// Turning one mode on in the patch turns the other off in the same step.
    pub fn merge(&mut self, patch: CarouselContent) {
        let enables_dots = patch.show_dots == Some(true);
        let enables_thumbnails = patch.show_thumbnails == Some(true);

        merge_fields!(self, patch;
            effect, autoplay, autoplay_interval_ms, pause_on_hover, infinite_loop,
            show_arrows, arrow_type, arrow_size, arrow_color, arrow_offset,
            show_dots, dot_color, active_dot_color,
            show_thumbnails, thumbnail_size,
        );

        if enables_thumbnails {
            self.show_dots = Some(false);
        }
        if enables_dots {
            self.show_thumbnails = Some(false);
        }
    }

    /// True when a patch asks for both navigation modes at once
    pub fn enables_both_navigations(&self) -> bool {
        self.show_dots == Some(true) && self.show_thumbnails == Some(true)
    }

    pub fn secondary_navigation(&self) -> SecondaryNavigation {
        if self.show_thumbnails == Some(true) {
            SecondaryNavigation::Thumbnails
        } else if self.show_dots == Some(true) {
            SecondaryNavigation::Dots
        } else {
            SecondaryNavigation::None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerContent {
    Container(ContainerContent),
    Text(TextContent),
    Image(ImageContent),
    Button(ButtonContent),
    Carousel(CarouselContent),
}

impl LayerContent {
    pub fn kind(&self) -> LayerKind {
        match self {
            LayerContent::Container(_) => LayerKind::Container,
            LayerContent::Text(_) => LayerKind::Text,
            LayerContent::Image(_) => LayerKind::Image,
            LayerContent::Button(_) => LayerKind::Button,
            LayerContent::Carousel(_) => LayerKind::Carousel,
        }
    }

    /// Merge a patch of the same kind. A patch of another kind is handed back
    /// untouched and nothing changes.
    pub fn merge(&mut self, patch: LayerContent) -> Result<(), LayerContent> {
        match (self, patch) {
            (LayerContent::Container(current), LayerContent::Container(patch)) => current.merge(patch),
            (LayerContent::Text(current), LayerContent::Text(patch)) => current.merge(patch),
            (LayerContent::Image(current), LayerContent::Image(patch)) => current.merge(patch),
            (LayerContent::Button(current), LayerContent::Button(patch)) => current.merge(patch),
            (LayerContent::Carousel(current), LayerContent::Carousel(patch)) => current.merge(patch),
            (_, patch) => return Err(patch),
        }
        Ok(())
    }

    pub fn as_carousel(&self) -> Option<&CarouselContent> {
        match self {
            LayerContent::Carousel(content) => Some(content),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextContent> {
        match self {
            LayerContent::Text(content) => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabling_thumbnails_disables_dots() {
        let mut carousel = CarouselContent {
            show_dots: Some(true),
            show_thumbnails: Some(false),
            ..Default::default()
        };

        carousel.merge(CarouselContent {
            show_thumbnails: Some(true),
            ..Default::default()
        });

        assert_eq!(carousel.show_thumbnails, Some(true));
        assert_eq!(carousel.show_dots, Some(false));
        assert_eq!(carousel.secondary_navigation(), SecondaryNavigation::Thumbnails);

        carousel.merge(SecondaryNavigation::Dots.to_patch());
        assert_eq!(carousel.show_dots, Some(true));
        assert_eq!(carousel.show_thumbnails, Some(false));
    }

    #[test]
    fn test_disabling_one_mode_leaves_the_other() {
        let mut carousel = CarouselContent {
            show_dots: Some(true),
            ..Default::default()
        };

        carousel.merge(CarouselContent {
            show_thumbnails: Some(false),
            ..Default::default()
        });

        assert_eq!(carousel.show_dots, Some(true));
    }

    #[test]
    fn test_mismatched_merge_is_rejected() {
        let mut content = LayerContent::Text(TextContent {
            text: Some("hi".to_string()),
            ..Default::default()
        });
        let before = content.clone();

        let result = content.merge(LayerContent::Image(ImageContent::default()));

        assert!(result.is_err());
        assert_eq!(content, before);
    }

    #[test]
    fn test_content_is_tagged_by_type() {
        let json = r#"{ "type": "carousel", "effect": "fade", "showDots": true }"#;
        let content: LayerContent = serde_json::from_str(json).unwrap();

        assert_eq!(content.kind(), LayerKind::Carousel);
        let carousel = content.as_carousel().unwrap();
        assert_eq!(carousel.effect, Some(TransitionEffect::Fade));
        assert_eq!(carousel.show_dots, Some(true));
        assert_eq!(carousel.autoplay, None);
    }
}
