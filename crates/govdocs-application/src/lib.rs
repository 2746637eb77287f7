//! Application layer - govdocs use-case orchestration.
//!
//! This crate implements the document ingestion and retrieval use cases,
//! orchestrating domain entities and port traits according to Clean
//! Architecture principles.
//!
//! ## Architecture
//!
//! The application layer:
//! - Contains use case implementations (`use_cases::*`)
//! - Exposes each use case as a trait in `ports::services` so callers
//!   (`govdocs-server`, integration tests) depend on an interface rather
//!   than a concrete struct
//! - Orchestrates domain entities and provider ports
//! - Has no dependency on infrastructure or HTTP frameworks
//!
//! ## Use Cases
//!
//! - Scrape source configuration (`source_registry`)
//! - Scrape orchestration (`scrape_orchestrator`)
//! - Document ingestion (`document_processor`)
//! - Hybrid retrieval (`hybrid_retriever`)
//! - External database sync (`external_db_sync`)
//!
//! ## Dependencies
//!
//! This crate depends on:
//! - `govdocs-domain`: entities, value objects, and port traits
//! - `govdocs-extraction`: text/metadata extraction and chunking algorithms
//! - Pure Rust libraries for async, serialization, etc.

pub mod constants;
pub mod ports;
pub mod use_cases;

pub use ports::services;
pub use use_cases::*;
