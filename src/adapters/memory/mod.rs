//! In-memory adapters for every store port.
//!
//! Used by the test suite and by the server when no database is configured.

mod doc_event_store;
mod document_repository;
mod group_repository;
mod person_directory;

pub use doc_event_store::InMemoryDocEventStore;
pub use document_repository::InMemoryDocumentRepository;
pub use group_repository::InMemoryGroupRepository;
pub use person_directory::InMemoryPersonDirectory;
