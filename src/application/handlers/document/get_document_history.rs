//! GetDocumentHistoryHandler - the ordered DocEvent log and earlier versions
//! of a document.

use std::sync::Arc;

use serde::Serialize;

use crate::application::support::load_document;
use crate::domain::doc_event::DocEvent;
use crate::domain::document::{DocHistory, DocumentError};
use crate::domain::foundation::DocName;
use crate::ports::{DocEventStore, DocumentRepository};

#[derive(Debug, Clone)]
pub struct GetDocumentHistoryQuery {
    pub name: DocName,
}

/// Events oldest first, and the snapshots taken before each update.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentHistoryView {
    pub events: Vec<DocEvent>,
    pub versions: Vec<DocHistory>,
}

pub struct GetDocumentHistoryHandler {
    documents: Arc<dyn DocumentRepository>,
    events: Arc<dyn DocEventStore>,
}

impl GetDocumentHistoryHandler {
    pub fn new(documents: Arc<dyn DocumentRepository>, events: Arc<dyn DocEventStore>) -> Self {
        Self { documents, events }
    }

    pub async fn handle(
        &self,
        query: GetDocumentHistoryQuery,
    ) -> Result<DocumentHistoryView, DocumentError> {
        let document = load_document(self.documents.as_ref(), &query.name).await?;
        let log = self.events.log_for(document.name()).await?;
        let versions = self.documents.history(document.name()).await?;
        Ok(DocumentHistoryView {
            events: log.events().to_vec(),
            versions,
        })
    }
}
