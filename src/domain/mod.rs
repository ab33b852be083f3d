//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `document` - Drafts and charters, revisions and state machines
//! - `doc_event` - The append-only DocEvent log and its queries
//! - `ballot` - Ballot types, positions, projections and voting rules
//! - `group` - Groups, roles and milestones
//! - `charter` - Charter naming and recharter rules
//! - `mail` - Mail triggers, recipient rules and message composition
//! - `person` - People

pub mod ballot;
pub mod charter;
pub mod doc_event;
pub mod document;
pub mod foundation;
pub mod group;
pub mod mail;
pub mod person;
