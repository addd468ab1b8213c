//! Default name, content, style and size for each layer kind.
//!
//! A `container` created directly under a `carousel` is a slide and gets the
//! slide contract here, in the same step that creates it.

use nudge_model::{
    Alignment, ArrowType, ButtonAction, ButtonContent, CarouselContent, ContainerContent, Display,
    FlexDirection, ImageContent, LayerContent, LayerKind, PositionMode, Size, Style, TextContent,
    TransitionEffect,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    pub name: String,
    pub content: LayerContent,
    pub style: Style,
    pub size: Size,
}

/// Build the blueprint for a new layer.
///
/// `position` is the 1-based index the layer will have among its siblings.
pub fn blueprint(kind: LayerKind, parent_kind: Option<LayerKind>, position: usize) -> Blueprint {
    if kind == LayerKind::Container && parent_kind == Some(LayerKind::Carousel) {
        return slide(position);
    }

    let name = format!("{} {}", kind.label(), position);
    match kind {
        LayerKind::Container => Blueprint {
            name,
            content: LayerContent::Container(ContainerContent::default()),
            style: Style {
                position: Some(PositionMode::Relative),
                display: Some(Display::Flex),
                flex_direction: Some(FlexDirection::Column),
                padding: Some("16px".to_string()),
                gap: Some("8px".to_string()),
                ..Default::default()
            },
            size: Size::new("100%", "auto"),
        },
        LayerKind::Text => Blueprint {
            name,
            content: LayerContent::Text(TextContent {
                text: Some("Add your text".to_string()),
                color: Some("#111827".to_string()),
                font_size: Some("16px".to_string()),
                font_weight: Some("400".to_string()),
                text_align: Some("left".to_string()),
            }),
            style: Style {
                position: Some(PositionMode::Relative),
                ..Default::default()
            },
            size: Size::new("auto", "auto"),
        },
        LayerKind::Image => Blueprint {
            name,
            content: LayerContent::Image(ImageContent {
                src: None,
                alt: Some(String::new()),
                object_fit: Some("cover".to_string()),
            }),
            style: Style {
                position: Some(PositionMode::Relative),
                ..Default::default()
            },
            size: Size::new("100%", "160px"),
        },
        LayerKind::Button => Blueprint {
            name,
            content: LayerContent::Button(ButtonContent {
                label: Some("Click me".to_string()),
                action: Some(ButtonAction::Dismiss),
                url: None,
                text_color: Some("#ffffff".to_string()),
            }),
            style: Style {
                position: Some(PositionMode::Relative),
                padding: Some("12px 24px".to_string()),
                background_color: Some("#2563eb".to_string()),
                border_radius: Some("8px".to_string()),
                ..Default::default()
            },
            size: Size::new("auto", "auto"),
        },
        LayerKind::Carousel => Blueprint {
            name,
            content: LayerContent::Carousel(CarouselContent {
                effect: Some(TransitionEffect::Slide),
                autoplay: Some(false),
                autoplay_interval_ms: Some(3000),
                pause_on_hover: Some(true),
                infinite_loop: Some(true),
                show_arrows: Some(true),
                arrow_type: Some(ArrowType::Chevron),
                arrow_size: Some(24),
                arrow_color: Some("#ffffff".to_string()),
                arrow_offset: Some(16),
                show_dots: Some(true),
                dot_color: Some("#d1d5db".to_string()),
                active_dot_color: Some("#111827".to_string()),
                show_thumbnails: Some(false),
                thumbnail_size: Some(48),
            }),
            style: Style {
                position: Some(PositionMode::Relative),
                ..Default::default()
            },
            size: Size::new("100%", "240px"),
        },
    }
}

fn slide(position: usize) -> Blueprint {
    Blueprint {
        name: format!("Slide {}", position),
        content: LayerContent::Container(ContainerContent::default()),
        style: Style {
            position: Some(PositionMode::Relative),
            display: Some(Display::Flex),
            flex_direction: Some(FlexDirection::Column),
            justify_content: Some(Alignment::Center),
            align_items: Some(Alignment::Center),
            margin: Some("0".to_string()),
            border: Some("2px dashed #cbd5e1".to_string()),
            ..Default::default()
        },
        size: Size::full(),
    }
}
