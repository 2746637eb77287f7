//! HTTP API surface for govdocs (spec §6).
//!
//! Exposes the five application use cases over axum: source management,
//! scraping control, document browsing and embedding, the hybrid-retrieval
//! chat surface, and external data-source sync. The server names no
//! concrete use-case struct; it depends only on the `govdocs-application`
//! service interfaces, resolved once at startup by
//! `govdocs_infrastructure::di::bootstrap::init_app`.
//!
//! Authentication itself is out of scope (spec §1): [`transport::axum_http::auth`]
//! extracts a [`govdocs_domain::value_objects::UserContext`] from plain
//! request headers, standing in for whatever session/token scheme the
//! broader platform owns.

pub mod transport;

pub use transport::axum_http::{build_router, AppState};
