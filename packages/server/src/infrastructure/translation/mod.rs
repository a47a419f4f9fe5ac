//! Translation provider adapters.

pub mod mymemory;

pub use mymemory::{DEFAULT_ENDPOINT, MyMemoryTranslator};
