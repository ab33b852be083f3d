//! Charter text storage adapters.
//!
//! - **LocalCharterTextStorage** - one text file per charter revision on disk
//! - **InMemoryCharterTextStorage** - texts in memory (testing/development)

mod in_memory_charter_text_storage;
mod local_charter_text_storage;

pub use in_memory_charter_text_storage::InMemoryCharterTextStorage;
pub use local_charter_text_storage::LocalCharterTextStorage;
