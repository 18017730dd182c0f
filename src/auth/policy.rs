use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::auth::Principal;

/// Role
///
/// The closed set of roles recognized by the authorization layer. Matching is
/// exact and case-sensitive ("Admin", not "admin"), and there is no hierarchy:
/// an Admin does not implicitly satisfy a Teacher-only route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Student,
    Teacher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Student => "Student",
            Role::Teacher => "Teacher",
        }
    }

    /// Parses a stored or claimed role string. Unrecognized values (including
    /// case mismatches) yield `None`, which the decision point treats as
    /// "holds no role" rather than as an error.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Admin" => Some(Role::Admin),
            "Student" => Some(Role::Student),
            "Teacher" => Some(Role::Teacher),
            _ => None,
        }
    }
}

/// Deny
///
/// The two terminal refusal outcomes of the authorization decision point.
/// The distinction matters for the HTTP status (401 vs 403) but deliberately
/// carries no detail about *why* verification failed upstream: an expired
/// token and a forged one are indistinguishable to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deny {
    /// No valid credential backed the request.
    Unauthenticated,
    /// A valid credential was presented but its role does not satisfy the route.
    Forbidden,
}

impl Deny {
    pub fn status(&self) -> StatusCode {
        match self {
            Deny::Unauthenticated => StatusCode::UNAUTHORIZED,
            Deny::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}

/// authorize
///
/// The single authorization decision point. Given the request's Principal and
/// the set of roles a route requires, produces the terminal allow/deny outcome
/// for this request: one pass, no retries.
///
/// Rules, in order:
/// 1. An anonymous principal is denied as `Unauthenticated`.
/// 2. An empty `required` set means "authentication only": any authenticated
///    principal is allowed.
/// 3. Otherwise the principal's role must be a member of `required`. A
///    principal whose token carried no role (or an unrecognized one) holds no
///    role and is denied `Forbidden` on every guarded route.
pub fn authorize(principal: &Principal, required: &[Role]) -> Result<(), Deny> {
    if !principal.is_authenticated {
        return Err(Deny::Unauthenticated);
    }
    if required.is_empty() {
        return Ok(());
    }
    match principal.role {
        Some(role) if required.contains(&role) => Ok(()),
        _ => Err(Deny::Forbidden),
    }
}
