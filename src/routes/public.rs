use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any client
/// (anonymous or logged-in): the credential gateway (login/registration/logout),
/// session inspection, the admin bootstrap, and liveness.
///
/// Note on check-auth: it is mounted twice. The `/api` mount serves machine
/// clients authenticating via the Authorization header; the root-level mount
/// serves browser scripts, whose requests fall outside the API prefix and are
/// therefore eligible for the cookie-sourced credential fallback.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        // Returns "ok" immediately to verify the service is running and responsive.
        .route("/health", get(|| async { "ok" }))
        // POST /api/auth/login
        // Credential verification and token issuance. Sets the auth cookie for
        // browser clients alongside the JSON token for API clients.
        .route("/api/auth/login", post(handlers::login))
        // POST /api/auth/register
        // Student self-registration: creates the login identity and profile,
        // returns a fresh session token.
        .route("/api/auth/register", post(handlers::register))
        // POST /api/auth/logout
        // Clears the auth cookie. No server-side session state exists to revoke.
        .route("/api/auth/logout", post(handlers::logout))
        // POST /api/auth/create-admin
        // Explicit default-admin bootstrap; refuses once an Admin exists.
        .route("/api/auth/create-admin", post(handlers::create_admin))
        // GET /api/auth/check-auth + GET /check-auth
        // Reports the request's resolved identity (or 401 for anonymous).
        .route("/api/auth/check-auth", get(handlers::check_auth))
        .route("/check-auth", get(handlers::check_auth))
}
