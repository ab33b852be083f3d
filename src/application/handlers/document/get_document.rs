//! GetDocumentHandler - Query handler for a document and its open ballots.

use std::sync::Arc;

use serde::Serialize;

use crate::application::support::load_document;
use crate::domain::ballot::Ballot;
use crate::domain::document::{Document, DocumentError};
use crate::domain::foundation::DocName;
use crate::ports::{DocEventStore, DocumentRepository};

/// Query to get a document by name.
#[derive(Debug, Clone)]
pub struct GetDocumentQuery {
    pub name: DocName,
}

/// A document with the ballots currently open on it.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentView {
    pub document: Document,
    pub open_ballots: Vec<Ballot>,
}

pub struct GetDocumentHandler {
    documents: Arc<dyn DocumentRepository>,
    events: Arc<dyn DocEventStore>,
}

impl GetDocumentHandler {
    pub fn new(documents: Arc<dyn DocumentRepository>, events: Arc<dyn DocEventStore>) -> Self {
        Self { documents, events }
    }

    pub async fn handle(&self, query: GetDocumentQuery) -> Result<DocumentView, DocumentError> {
        let document = load_document(self.documents.as_ref(), &query.name).await?;
        let log = self.events.log_for(document.name()).await?;
        let open_ballots = log
            .open_ballots()
            .into_iter()
            .filter_map(|t| log.open_ballot(t))
            .collect();
        Ok(DocumentView {
            document,
            open_ballots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{doc_name, TestWorld};
    use crate::domain::ballot::{create_ballot_if_not_open, BallotType};
    use crate::domain::document::Stream;

    #[tokio::test]
    async fn returns_document_with_open_ballots() {
        let world = TestWorld::new().await;
        let doc = world.draft("draft-foo", Stream::Ietf, None).await;
        let recorder = world.recorder();
        let mut log = world.log(doc.name()).await;
        let opened = create_ballot_if_not_open(&log, &doc, world.secretary, BallotType::DraftApprove)
            .unwrap()
            .unwrap();
        recorder.record(&mut log, opened).await.unwrap();

        let view = GetDocumentHandler::new(world.documents.clone(), world.events.clone())
            .handle(GetDocumentQuery {
                name: doc.name().clone(),
            })
            .await
            .unwrap();

        assert_eq!(view.document.name(), doc.name());
        assert_eq!(view.open_ballots.len(), 1);
        assert_eq!(view.open_ballots[0].ballot_type(), BallotType::DraftApprove);
    }

    #[tokio::test]
    async fn unknown_document_is_not_found() {
        let world = TestWorld::new().await;
        let err = GetDocumentHandler::new(world.documents.clone(), world.events.clone())
            .handle(GetDocumentQuery {
                name: doc_name("draft-nothing"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)));
    }
}
