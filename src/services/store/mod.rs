pub mod client;
pub mod memory;
pub mod postgres;

pub use client::{Document, DocumentStore, StoreError};
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
