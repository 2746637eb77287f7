//! Transport-layer adapters. Currently only HTTP (`axum_http`); a future
//! gRPC or CLI-only transport would live as a sibling module here without
//! touching `govdocs-application`.

pub mod axum_http;
