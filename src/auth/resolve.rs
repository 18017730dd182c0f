use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    AppState,
    auth::Principal,
    config::{AppConfig, Env},
};

/// The name of the cookie carrying the session token for browser clients.
pub const AUTH_COOKIE: &str = "auth_token";

/// Requests under this prefix belong to machine/API clients and authenticate
/// via the Authorization header only; the cookie fallback does not apply.
pub const API_PREFIX: &str = "/api";

/// resolve_token
///
/// Produces at most one candidate token for the request, with deterministic
/// precedence, before any verification runs:
///
/// 1. An `Authorization: Bearer <token>` header is authoritative. When it is
///    present, cookie-carried tokens are ignored for this request.
/// 2. Without the header, the designated cookie supplies the token, but only
///    for paths outside the API prefix. Browser navigations cannot attach
///    custom headers, while API clients are expected to; funneling both
///    sources through this single function keeps one verification path.
/// 3. Neither source yields a token: the request proceeds as anonymous. That
///    is a normal outcome at this layer, not an error.
pub fn resolve_token(headers: &HeaderMap, cookies: &CookieJar, path: &str) -> Option<String> {
    let header_token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string());

    if header_token.is_some() {
        return header_token;
    }

    if path.starts_with(API_PREFIX) {
        return None;
    }

    cookies
        .get(AUTH_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// resolve_credentials
///
/// The credential resolution middleware, applied to every route. It runs the
/// resolution rules above, verifies the candidate token if one was found, and
/// attaches the resulting Principal to the request extensions. Verification
/// failures are swallowed into the anonymous principal here; they never
/// abort the pipeline, and the reason is logged but not surfaced, so callers
/// cannot probe which validation step rejected them.
pub async fn resolve_credentials(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    let principal = match resolve_token(request.headers(), &jar, &path) {
        Some(token) => match state.tokens.verify(&token) {
            Ok(principal) => principal,
            Err(reason) => {
                tracing::debug!("Rejected credential on {}: {:?}", path, reason);
                Principal::anonymous()
            }
        },
        None => Principal::anonymous(),
    };

    request.extensions_mut().insert(principal);
    next.run(request).await
}

/// auth_cookie
///
/// Builds the session cookie set at login. HttpOnly and SameSite=Lax by
/// default; the Secure attribute follows the runtime environment so local
/// plain-HTTP development keeps working.
pub fn auth_cookie(token: &str, config: &AppConfig) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.env == Env::Production)
        .build()
}

/// clear_auth_cookie
///
/// Builds the removal cookie set at logout: same name and path, expiry in
/// the past, so browsers drop the stored token.
pub fn clear_auth_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((AUTH_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie
}
