use crate::content::{LayerContent, LayerKind};
use crate::ids::{InterfaceId, LayerId};
use crate::style::{Size, Style};
use serde::{Deserialize, Serialize};

/// A single visual element placed on a surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: LayerId,

    /// Owning layer, or `None` for a root layer of its surface
    #[serde(default)]
    pub parent: Option<LayerId>,

    /// Surface this layer is drawn on; `None` is the main surface
    #[serde(default)]
    pub interface: Option<InterfaceId>,

    pub name: String,
    pub content: LayerContent,

    #[serde(default)]
    pub style: Style,

    #[serde(default)]
    pub size: Size,
}

impl Layer {
    pub fn kind(&self) -> LayerKind {
        self.content.kind()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_child_of(&self, parent: &LayerId) -> bool {
        self.parent.as_ref() == Some(parent)
    }

    pub fn is_on(&self, surface: Option<&InterfaceId>) -> bool {
        self.interface.as_ref() == surface
    }
}

/// Partial update of a layer. Each sub-object is shallow-merged into the
/// existing one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<LayerContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl LayerPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn content(content: LayerContent) -> Self {
        Self {
            content: Some(content),
            ..Default::default()
        }
    }

    pub fn style(style: Style) -> Self {
        Self {
            style: Some(style),
            ..Default::default()
        }
    }

    pub fn size(size: Size) -> Self {
        Self {
            size: Some(size),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none() && self.style.is_none() && self.size.is_none()
    }
}
