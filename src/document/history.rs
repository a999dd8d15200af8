//! Log of the edits made inside a tentative transaction.

use super::Modification;

/// A single edit that can be reverted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    /// Byte offset where the edit occurred
    pub offset: usize,
    /// Text that was deleted (empty for pure inserts)
    pub deleted_text: String,
    /// Text that was inserted (empty for pure deletes)
    pub inserted_text: String,
}

impl EditOperation {
    pub fn insert(offset: usize, text: String) -> Self {
        Self {
            offset,
            deleted_text: String::new(),
            inserted_text: text,
        }
    }

    pub fn delete(offset: usize, text: String) -> Self {
        Self {
            offset,
            deleted_text: text,
            inserted_text: String::new(),
        }
    }

    /// Get the inverse operation for undo
    pub fn inverse(&self) -> Self {
        Self {
            offset: self.offset,
            deleted_text: self.inserted_text.clone(),
            inserted_text: self.deleted_text.clone(),
        }
    }
}

impl From<&Modification> for EditOperation {
    fn from(m: &Modification) -> Self {
        match m {
            Modification::Inserted { position, text } => Self::insert(*position, text.clone()),
            Modification::Deleted { position, text } => Self::delete(*position, text.clone()),
        }
    }
}

/// Operations recorded since the transaction started, oldest first.
#[derive(Debug, Clone, Default)]
pub struct TentativeLog {
    operations: Vec<EditOperation>,
}

impl TentativeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, op: EditOperation) {
        self.operations.push(op);
    }

    /// Inverse operations in the order they must be applied to revert the log
    pub fn drain_inverse(&mut self) -> Vec<EditOperation> {
        self.operations.drain(..).rev().map(|op| op.inverse()).collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
