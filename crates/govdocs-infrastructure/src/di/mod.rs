//! Dependency injection composition root.
//!
//! `govdocs-application`'s use cases are generic over `Arc<dyn Trait>` ports;
//! this module is the one place that names concrete `govdocs-providers`/
//! `govdocs-scraping`/`govdocs-extraction` types and wires them together into
//! one [`AppContext`].

pub mod bootstrap;

pub use bootstrap::{init_app, AppContext};
