//! # Nudge Model
//!
//! Plain data types for one campaign document: the campaign itself, its
//! ordered interfaces, and the flat collection of layers that make up every
//! surface. Nothing in here enforces structure; that is the editor's job.
//!
//! Layers are stored flat with parent back-references. Sibling order is the
//! order of appearance in the collection.

/// Overwrite every field of `$target` that is `Some` in `$patch`.
macro_rules! merge_fields {
    ($target:expr, $patch:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = Some(value);
            }
        )+
    };
}

pub mod campaign;
pub mod content;
pub mod id_generator;
pub mod ids;
pub mod layer;
pub mod style;
pub mod template;

pub use campaign::{Campaign, CampaignInterface, CampaignMeta, CampaignStatus, NudgeType, Schedule};
pub use content::{
    ArrowType, ButtonAction, ButtonContent, CarouselContent, ContainerContent, ImageContent,
    LayerContent, LayerKind, SecondaryNavigation, TextContent, TransitionEffect,
};
pub use id_generator::{get_campaign_seed, IdGenerator};
pub use ids::{CampaignId, InterfaceId, LayerId};
pub use layer::{Layer, LayerPatch};
pub use style::{Alignment, Display, FlexDirection, PositionMode, Size, Style};
pub use template::Template;
