//! Vector store backends implementing `VectorStoreProvider` (spec §4.J).

mod memory;
mod qdrant;

pub use memory::MemoryVectorStore;
pub use qdrant::QdrantVectorStore;
