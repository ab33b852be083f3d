//! The DocEvent log: append-only history of every change to a document.

mod event;
mod log;

pub use event::{DocEvent, DocEventKind, DocEventType, NewDocEvent, PositionRecord};
pub use log::DocEventLog;
