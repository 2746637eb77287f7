//! Caller identity and role used by the retrieval access matrix (spec §4.K).

use serde::{Deserialize, Serialize};

use crate::value_objects::{Role, UserId};

/// The requesting user's identity, role, and institution scope.
///
/// Constructed by the server layer from an authenticated session (auth
/// itself is out of scope per spec §1) and threaded through
/// `HybridRetriever::retrieve` so every candidate can be filtered against
/// [`crate::access::is_visible`] before it leaves the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    /// Identifies the caller, used only to check document ownership.
    pub user_id: UserId,
    /// The caller's role in the access matrix.
    pub role: Role,
    /// The caller's institution, when scoped. `None` for roles without an
    /// institution affiliation (e.g. a platform `Developer`).
    pub institution_id: Option<String>,
}

impl UserContext {
    /// Construct a new user context.
    #[must_use]
    pub fn new(user_id: UserId, role: Role, institution_id: Option<String>) -> Self {
        Self {
            user_id,
            role,
            institution_id,
        }
    }
}
