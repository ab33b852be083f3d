//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory stores
//! - `postgres` - PostgreSQL stores (sqlx)
//! - `storage` - Charter text files
//! - `events` - In-process event bus
//! - `mail` - Mail transports
//! - `http` - axum REST API

pub mod events;
pub mod http;
pub mod mail;
pub mod memory;
pub mod postgres;
pub mod storage;

pub use events::InMemoryEventBus;
