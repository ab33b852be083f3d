//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `DocumentRepository` - Documents and their history snapshots
//! - `DocEventStore` - Append-only DocEvent log
//! - `GroupRepository` - Groups, milestones and group events
//! - `PersonDirectory` - People and their addresses
//! - `CharterTextStorage` - Charter text files per revision
//!
//! ## Outbound Ports
//!
//! - `Mailer` - Mail transport
//! - `EventPublisher` / `EventSubscriber` / `EventHandler` - In-process events

mod charter_text_storage;
mod doc_event_store;
mod document_repository;
mod event_publisher;
mod event_subscriber;
mod group_repository;
mod mailer;
mod person_directory;

pub use charter_text_storage::{CharterTextStorage, StorageError};
pub use doc_event_store::DocEventStore;
pub use document_repository::DocumentRepository;
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use group_repository::GroupRepository;
pub use mailer::{MailError, Mailer};
pub use person_directory::PersonDirectory;
