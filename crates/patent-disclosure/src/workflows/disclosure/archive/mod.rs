//! Draft and document storage behind a key-value boundary, plus the HTTP
//! routes that expose checking and drafting.

pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use repository::{DocumentIndexEntry, KeyValueStore, SavedDocument, StoreError};
pub use router::disclosure_router;
pub use service::{ArchiveError, DisclosureArchive};
