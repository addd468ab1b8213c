//! # Undo/Redo Stack
//!
//! Tracks edit history and enables undo/redo.
//!
//! ## Design
//!
//! - Before a mutation is applied, the document is snapshotted
//! - Undo restores the snapshot and keeps the current state for redo
//! - Redo restores the state that was current before the undo
//! - New mutations clear the redo stack
//! - Supports batched operations (several mutations, one undo step)
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! let mut doc = Document::new(id, "Welcome", NudgeType::Modal);
//!
//! stack.apply(&Mutation::AddInterface, &mut doc)?;
//! stack.undo(&mut doc);
//! stack.redo(&mut doc);
//! ```

use crate::document::Snapshot;
use crate::{Document, Mutation, MutationError, MutationResult};

/// One undo step
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Document state to go back to
    pub snapshot: Snapshot,

    /// Optional description of this step
    pub description: Option<String>,
}

/// A batch being recorded. The snapshot is taken lazily, right before the
/// first mutation that actually applies.
#[derive(Debug, Clone, Default)]
struct OpenBatch {
    snapshot: Option<Snapshot>,
    description: Option<String>,
}

/// Undo/redo stack for document editing
#[derive(Debug)]
pub struct UndoStack {
    /// Stack of applied steps (most recent last)
    undo_stack: Vec<HistoryEntry>,

    /// Stack of undone steps (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<OpenBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply a mutation and record it for undo.
    ///
    /// A refused mutation leaves both the document and the history alone.
    pub fn apply(&mut self, mutation: &Mutation, doc: &mut Document) -> Result<MutationResult, MutationError> {
        if !mutation.changes_campaign() {
            return doc.apply(mutation);
        }

        let before = doc.snapshot();
        let result = doc.apply(mutation)?;

        if let Some(batch) = &mut self.current_batch {
            if batch.snapshot.is_none() {
                batch.snapshot = Some(before);
                // The batch's first real change invalidates future
                self.redo_stack.clear();
            }
        } else {
            self.push_entry(HistoryEntry {
                snapshot: before,
                description: Some(mutation.name().to_string()),
            });
        }

        Ok(result)
    }

    /// Start a batch of mutations (will be undone/redone together)
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(OpenBatch::default());
    }

    /// End the current batch and push to undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if let Some(snapshot) = batch.snapshot {
                self.push_entry(HistoryEntry {
                    snapshot,
                    description: batch.description,
                });
            }
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates future
        self.redo_stack.clear();
    }

    /// Undo the most recent step. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self, doc: &mut Document) -> bool {
        let Some(entry) = self.undo_stack.pop() else {
            return false;
        };

        self.redo_stack.push(HistoryEntry {
            snapshot: doc.snapshot(),
            description: entry.description.clone(),
        });
        doc.restore(entry.snapshot);
        true
    }

    /// Redo the most recently undone step. Returns `false` if there was
    /// nothing to redo.
    pub fn redo(&mut self, doc: &mut Document) -> bool {
        let Some(entry) = self.redo_stack.pop() else {
            return false;
        };

        self.undo_stack.push(HistoryEntry {
            snapshot: doc.snapshot(),
            description: entry.description.clone(),
        });
        doc.restore(entry.snapshot);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
