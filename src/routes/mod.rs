/// Router Module Index
///
/// Organizes the application's routing logic into security-segregated modules,
/// enforcing a Defense-in-Depth strategy. This structure ensures that
/// access control is applied explicitly at the module level (via Axum layers),
/// preventing accidental exposure of protected endpoints.
///
/// The three modules map directly to the defined access tiers.

/// Routes accessible to all clients (login, registration, session inspection,
/// liveness). Session inspection reports the resolved identity itself, so it
/// needs no guarding layer.
pub mod public;

/// Self-service routes protected by the authentication middleware.
/// Requires a validated session; role checks happen in the handlers.
pub mod authenticated;

/// Routes restricted exclusively to users with the Admin role.
/// Implements mandatory authorization checks in every handler.
pub mod admin;
