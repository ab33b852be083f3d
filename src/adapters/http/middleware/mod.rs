//! HTTP middleware and extractors for axum.
//!
//! - `actor` - Acting person taken from the `X-Person-Id` header

pub mod actor;

pub use actor::{Actor, ActorRejection, PERSON_HEADER, REQUEST_ID_HEADER};
