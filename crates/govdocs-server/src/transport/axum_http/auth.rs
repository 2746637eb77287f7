//! Caller-identity extraction.
//!
//! Authentication proper — sessions, tokens, password/SSO flows — is a
//! named-but-not-designed external collaborator (spec §1). What the access
//! matrix (spec §4.K) actually needs is a resolved [`UserContext`]; this
//! extractor reads one from plain request headers, standing in for
//! whatever the platform's real auth middleware populates upstream of this
//! service.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use std::str::FromStr;

use govdocs_domain::value_objects::{Role, UserContext, UserId};

const USER_ID_HEADER: &str = "x-user-id";
const ROLE_HEADER: &str = "x-user-role";
const INSTITUTION_HEADER: &str = "x-institution-id";

/// Extracts a [`UserContext`] from `X-User-Id` / `X-User-Role` /
/// `X-Institution-Id` headers. Missing headers default to an anonymous
/// `Student` with a fresh id and no institution, the most restrictive
/// role in the access matrix.
pub struct AuthenticatedUser(pub UserContext);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| UserId::from_str(s).ok())
            .unwrap_or_default();

        let role = parts
            .headers
            .get(ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Role::from_str(s).ok())
            .unwrap_or(Role::Student);

        let institution_id = parts
            .headers
            .get(INSTITUTION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(Self(UserContext::new(user_id, role, institution_id)))
    }
}
