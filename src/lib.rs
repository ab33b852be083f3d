//! Datatracker - document lifecycle, chartering and balloting engine.
//!
//! Tracks IETF drafts through IESG processing and working/research group
//! charters through review, records every change as a DocEvent, runs the
//! IESG, IRSG and RSAB ballots, and mails notifications.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
