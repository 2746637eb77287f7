//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns that support the application and domain
//! layers: configuration loading, credential encryption, dependency
//! injection wiring, and logging setup. Concrete provider implementations
//! (embedding, vector store, object store, cache, database, external row
//! source) live in `govdocs-providers`, reached through `govdocs_domain`'s
//! `linkme`-backed registries; this crate is where they get resolved into
//! one running [`di::AppContext`].
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered TOML + environment configuration, validated fail-fast |
//! | [`crypto`] | AES-256-GCM implementation of the `CryptoProvider` port |
//! | [`di`] | Composition root: resolves providers, builds `AppContext` |
//! | [`constants`] | Infrastructure-layer constants |
//! | [`logging`] | `tracing`/`tracing-subscriber` setup |
//! | [`retention`] | Background scrape-job history retention sweep |
//! | [`utils`] | Small cross-cutting helpers (timing) |

pub mod config;
pub mod constants;
pub mod crypto;
pub mod di;
pub mod logging;
pub mod retention;
pub mod utils;
