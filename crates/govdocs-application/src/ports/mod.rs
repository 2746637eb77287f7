//! Application service port interfaces.
//!
//! Each use case exposes a trait here so `govdocs-server` and integration
//! tests can depend on an interface rather than a concrete struct, and so
//! the struct can be swapped for a mock in unit tests (spec §8).

pub mod services;

pub use services::{
    DocumentProcessorInterface, ExternalDbSyncInterface, HybridRetrieverInterface,
    ScrapeOrchestratorInterface, SourceRegistryInterface,
};
