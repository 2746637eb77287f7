//! # Provider Implementations
//!
//! Concrete implementations of the port traits declared in
//! `govdocs_domain::ports::providers`, registered into that crate's
//! `linkme` distributed slices so `govdocs-infrastructure` can resolve one
//! by name from [`govdocs_domain::value_objects`] configuration without a
//! compile-time dependency on any specific backend.
//!
//! | Module | Provides |
//! |--------|----------|
//! | [`cache`] | `CacheProvider` (Moka in-memory) |
//! | [`object_store`] | `ObjectStoreProvider` (filesystem, S3-compatible) |
//! | [`database`] | `sqlx::AnyPool`-backed repository implementations |
//! | [`embedding`] | `EmbeddingProvider` (Gemini, OpenAI, VoyageAI, Ollama) |
//! | [`llm`] | `LlmProvider` (Anthropic, Gemini, OpenAI-compatible, local) |
//! | [`vector_store`] | `VectorStoreProvider` (in-memory, Qdrant) |
//! | [`constants`] | Provider-specific tunables |

pub mod cache;
pub mod constants;
pub mod database;
pub mod embedding;
pub mod llm;
pub mod object_store;
pub mod vector_store;
