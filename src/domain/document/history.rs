//! Snapshots of a document taken before each update.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::Document;

/// A copy of a document as it was before an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocHistory {
    document: Document,
    recorded_at: Timestamp,
}

impl DocHistory {
    /// Captures the current state of `document`.
    pub fn snapshot(document: &Document) -> Self {
        Self {
            document: document.clone(),
            recorded_at: Timestamp::now(),
        }
    }

    pub fn reconstitute(document: Document, recorded_at: Timestamp) -> Self {
        Self {
            document,
            recorded_at,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn recorded_at(&self) -> &Timestamp {
        &self.recorded_at
    }
}
