//! PostgreSQL adapters - database implementations of the store ports.
//!
//! - `PostgresDocumentRepository` - documents and their history snapshots
//! - `PostgresDocEventStore` - the DocEvent log
//! - `PostgresGroupRepository` - groups, milestones and group events
//! - `PostgresPersonDirectory` - people

mod codec;
mod doc_event_store;
mod document_repository;
mod group_repository;
mod person_directory;
mod pool;

pub use doc_event_store::PostgresDocEventStore;
pub use document_repository::PostgresDocumentRepository;
pub use group_repository::PostgresGroupRepository;
pub use person_directory::PostgresPersonDirectory;
pub use pool::connect;
