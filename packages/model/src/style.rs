//! Positioning, box model and visual style of a layer.
//!
//! Every field is optional. A `Style` doubles as its own patch type: merging
//! overwrites the fields present in the patch and leaves the rest alone.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionMode {
    Static,
    Relative,
    Absolute,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    Block,
    Flex,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexDirection {
    Row,
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    Start,
    Center,
    End,
    SpaceBetween,
    Stretch,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    // Positioning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,

    // Box model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,

    // Layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<Display>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flex_direction: Option<FlexDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<Alignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align_items: Option<Alignment>,

    // Visual
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

impl Style {
    /// Shallow merge: fields set in `patch` overwrite, unset fields are kept
    pub fn merge(&mut self, patch: Style) {
        merge_fields!(self, patch;
            position, top, left, right, bottom, z_index,
            padding, margin, gap,
            display, flex_direction, justify_content, align_items,
            background_color, border, border_radius, box_shadow, opacity,
        );
    }
}

/// Rendered size of a layer as CSS lengths
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

impl Size {
    pub fn new(width: impl Into<String>, height: impl Into<String>) -> Self {
        Self {
            width: Some(width.into()),
            height: Some(height.into()),
        }
    }

    pub fn full() -> Self {
        Self::new("100%", "100%")
    }

    pub fn merge(&mut self, patch: Size) {
        merge_fields!(self, patch; width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unmentioned_fields() {
        let mut style = Style {
            padding: Some("8px".to_string()),
            background_color: Some("#fff".to_string()),
            ..Default::default()
        };

        style.merge(Style {
            background_color: Some("#000".to_string()),
            z_index: Some(3),
            ..Default::default()
        });

        assert_eq!(style.padding.as_deref(), Some("8px"));
        assert_eq!(style.background_color.as_deref(), Some("#000"));
        assert_eq!(style.z_index, Some(3));
        assert_eq!(style.margin, None);
    }

    #[test]
    fn test_style_serializes_sparse_camel_case() {
        let style = Style {
            flex_direction: Some(FlexDirection::Column),
            justify_content: Some(Alignment::SpaceBetween),
            ..Default::default()
        };

        let json = serde_json::to_value(&style).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "flexDirection": "column", "justifyContent": "space-between" })
        );
    }

    #[test]
    fn test_size_merge() {
        let mut size = Size::new("100%", "auto");
        size.merge(Size {
            width: None,
            height: Some("240px".to_string()),
        });
        assert_eq!(size, Size::new("100%", "240px"));
    }
}
