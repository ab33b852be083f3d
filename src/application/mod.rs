//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).
//! Mail notifications run off the published DocEvents.

pub mod handlers;
pub mod notification;
pub mod support;

#[cfg(test)]
pub(crate) mod testing;

pub use notification::MailNotifier;
pub use support::{DocEventRecorder, DocLocks};
