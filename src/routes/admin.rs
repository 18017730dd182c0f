use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Admin Router Module
///
/// Defines the record-management routes reserved for the Admin role: the full
/// CRUD surface over students, teachers, courses and enrollments, plus the
/// statistics dashboard.
///
/// Access Control:
/// This entire router is wrapped (in `create_router`) in the middleware layer
/// that first authenticates the request; every handler then explicitly checks
/// the Admin role through the authorization decision point before touching the
/// repository. There is no role hierarchy; a Teacher token is rejected here
/// exactly like a Student token.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // --- Student Management ---
        // GET lists all students; POST creates a student with its login identity.
        .route(
            "/api/students",
            get(handlers::get_students).post(handlers::create_student),
        )
        // Retrieve, update or remove a single student record.
        .route(
            "/api/students/{id}",
            get(handlers::get_student)
                .put(handlers::update_student)
                .delete(handlers::delete_student),
        )
        // --- Teacher Management ---
        .route(
            "/api/teachers",
            get(handlers::get_teachers).post(handlers::create_teacher),
        )
        .route(
            "/api/teachers/{id}",
            get(handlers::get_teacher)
                .put(handlers::update_teacher)
                .delete(handlers::delete_teacher),
        )
        // --- Course Management ---
        .route(
            "/api/courses",
            get(handlers::get_courses).post(handlers::create_course),
        )
        // POST /api/courses/enroll
        // Enrolls a student in a course; duplicate pairs answer 409.
        .route("/api/courses/enroll", post(handlers::enroll_student))
        // GET /api/courses/enrollments?course_id=...
        // System-wide enrollment listing with optional course filter.
        .route("/api/courses/enrollments", get(handlers::get_enrollments))
        // DELETE /api/courses/enrollments/{id}
        // Withdraws a student by removing the enrollment row.
        .route(
            "/api/courses/enrollments/{id}",
            delete(handlers::remove_enrollment),
        )
        .route(
            "/api/courses/{id}",
            get(handlers::get_course)
                .put(handlers::update_course)
                .delete(handlers::delete_course),
        )
        // GET /api/courses/{id}/students
        // The roster of one course.
        .route("/api/courses/{id}/students", get(handlers::get_course_students))
        // POST /api/courses/{id}/assign-teacher
        // Reassigns the teaching position of a course.
        .route(
            "/api/courses/{id}/assign-teacher",
            post(handlers::assign_teacher),
        )
        // --- Dashboard ---
        // GET /api/admin/stats
        // Retrieves core dashboard metrics (student/teacher/course/enrollment counts).
        .route("/api/admin/stats", get(handlers::get_admin_stats))
}
