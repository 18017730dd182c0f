use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::auth::policy::Role;

/// Authentication & Authorization Module
///
/// Groups the four components of the credential pipeline:
/// - `password`: one-way salted hashing of stored credentials.
/// - `token`: issuing and verifying signed, time-bounded session tokens.
/// - `resolve`: locating a candidate token on the request (header or cookie)
///   and normalizing it into a single verification channel.
/// - `policy`: the role-based allow/deny decision point.
///
/// The pipeline runs once per request: resolution produces at most one token,
/// verification projects it into a `Principal`, and route handlers consult the
/// policy against that `Principal`. Handlers never touch raw tokens or claims.
pub mod password;
pub mod policy;
pub mod resolve;
pub mod token;

pub use policy::{Deny, authorize};
pub use resolve::{AUTH_COOKIE, resolve_token};
pub use token::{Claims, TokenService, VerificationError};

/// Principal
///
/// The request-scoped identity derived from a successfully verified token.
/// It is attached to the request extensions by the credential resolution
/// middleware and is the *only* identity surface handlers see: the raw token,
/// its claims, and the verification outcome never travel further.
///
/// A request with no token (or a token that failed verification) carries the
/// anonymous principal rather than no principal at all, so extraction is
/// infallible and the authorization layer makes the final call.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    /// The unique identifier of the user, taken from the token's `sub` claim.
    pub user_id: Uuid,
    /// The username, taken from the token's `name` claim.
    pub username: String,
    /// The parsed role claim. `None` for anonymous requests *and* for tokens
    /// carrying an unrecognized role value: an unknown role authenticates but
    /// matches no required-role set, never acting as a wildcard.
    pub role: Option<Role>,
    /// Whether a valid token backed this request.
    pub is_authenticated: bool,
}

impl Principal {
    /// The identity assigned to requests that presented no usable credential.
    pub fn anonymous() -> Self {
        Self {
            user_id: Uuid::nil(),
            username: String::new(),
            role: None,
            is_authenticated: false,
        }
    }
}

/// Principal Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making Principal usable as a function
/// argument in any handler. Extraction never fails: the credential resolution
/// middleware has either attached a verified Principal or nothing, and in the
/// latter case the handler receives the anonymous principal.
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Principal>()
            .cloned()
            .unwrap_or_else(Principal::anonymous))
    }
}
