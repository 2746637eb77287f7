//! Shared axum application state.

use std::sync::Arc;

use govdocs_infrastructure::di::bootstrap::AppContext;

/// State handed to every handler via `State<AppState>`.
///
/// A thin wrapper around [`AppContext`] rather than a re-export so the
/// transport layer can grow request-scoped additions (rate limiters,
/// request-id generators) without reshaping the composition root.
#[derive(Clone)]
pub struct AppState {
    /// The wired application context (use cases + admin-surface repositories).
    pub ctx: Arc<AppContext>,
}

impl AppState {
    /// Wrap an already-built [`AppContext`].
    #[must_use]
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }
}
