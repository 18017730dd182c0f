use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Defines the self-service routes available to any user who has passed the
/// authentication layer. Each handler still narrows access to its own role
/// (Student or Teacher) through the authorization decision point, so a
/// teacher calling a student route receives 403, not data.
///
/// Access Control Strategy:
/// Every route in this module sits behind the `auth_middleware` layer applied
/// in `create_router`, which rejects anonymous requests with 401 before any
/// handler runs. Handlers therefore always observe an authenticated Principal.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /api/students/me
        // The authenticated student's own profile record.
        .route("/api/students/me", get(handlers::get_student_me))
        // GET /api/students/my-courses
        // The authenticated student's enrollments with teacher names and grades.
        .route("/api/students/my-courses", get(handlers::get_my_courses))
        // GET /api/teachers/me
        // The authenticated teacher's own profile record.
        .route("/api/teachers/me", get(handlers::get_teacher_me))
        // GET /api/teachers/my-courses
        // The authenticated teacher's courses with enrollment counts.
        .route("/api/teachers/my-courses", get(handlers::get_teaching_courses))
}
