//! Composition entry point for the `govdocs` binary.
//!
//! Everything here is thin on purpose: [`commands`] wires the already-built
//! [`govdocs_infrastructure::di::bootstrap::AppContext`] into whichever
//! operation the CLI invoked. No domain or application logic lives in this
//! crate.

pub mod commands;
