//! # Nudge Editor
//!
//! Document editing engine for nudge campaigns.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: campaign, interfaces, flat layers    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Layer and carousel operations            │
//! │  - Interface ordering and drag reorder      │
//! │  - Template import                          │
//! │  - Undo/redo history                        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ storage: whole campaigns in, whole out      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **All or nothing**: a refused mutation leaves the document untouched
//! 2. **Flat layers**: parent back-references, sibling order is collection order
//! 3. **Derived views**: slide counts and children are read from the layers, never stored
//! 4. **Fresh ids**: every created layer or interface gets an id never seen in the campaign
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nudge_editor::{Document, Mutation};
//! use nudge_model::{CampaignId, LayerKind, NudgeType};
//!
//! let mut doc = Document::new(CampaignId::new("spring"), "Spring sale", NudgeType::Modal);
//!
//! let carousel = doc.add_layer(LayerKind::Carousel, None)?;
//! doc.add_slide(&carousel)?;
//!
//! doc.apply(&Mutation::AddInterface)?;
//! ```

mod blueprint;
mod carousel;
mod document;
mod errors;
mod integrity;
mod interfaces;
mod layers;
mod mutations;
mod reorder;
mod session;
mod storage;
mod template;
mod undo_stack;

pub use blueprint::{blueprint, Blueprint};
pub use document::{Document, Snapshot};
pub use errors::{EditorError, MutationError};
pub use integrity::validate;
pub use interfaces::InterfaceList;
pub use layers::LayerTree;
pub use mutations::{Mutation, MutationOutcome, MutationResult};
pub use reorder::{move_item, resolve_drop, shows_indicator, DropPosition, Reorder};
pub use session::EditSession;
pub use storage::{load_template, CampaignStore, FileStore, MemoryStore};
pub use template::{ImportMode, ImportReport};
pub use undo_stack::{HistoryEntry, UndoStack};
