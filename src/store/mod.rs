//! Record storage for the overwork tracker.
//!
//! [`SessionSource`] is the seam the reporting code reads through;
//! [`InMemoryStore`] is the mutable store behind the HTTP API.

mod memory;
mod source;

pub use memory::InMemoryStore;
pub use source::SessionSource;
