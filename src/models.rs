use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// Raw Database Row (Internal Use). The canonical credential record stored in the
/// `users` table: one row per login identity, whatever the role. The password hash
/// never leaves the server; it is excluded from serialization entirely.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Default)]
pub struct User {
    pub id: Uuid,
    // The unique login identifier.
    pub username: String,
    // bcrypt hash; never serialized into any response.
    #[serde(skip_serializing)]
    pub password_hash: String,
    // The RBAC field: 'Admin', 'Student' or 'Teacher'. Stored as text; parsed
    // into a typed Role only at the authorization boundary.
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Student
///
/// The student record as served over the wire, enriched with the login username
/// (a JOIN against `users`). One student row maps to exactly one user row.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Student {
    pub id: Uuid,
    // FK to users.id (login identity).
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    // The institutional identifier (e.g. "S20250001"), distinct from the row id.
    pub student_code: String,
    pub phone_number: Option<String>,
    #[ts(type = "string")]
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    // Loaded via a JOIN against the users table.
    pub username: String,
}

/// Teacher
///
/// The teacher record as served over the wire, enriched with the login username.
/// Mirrors Student, plus the teaching-specific fields.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Teacher {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub teacher_code: String,
    pub phone_number: Option<String>,
    #[ts(type = "string | null")]
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub department: Option<String>,
    pub specialization: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    pub username: String,
}

/// Course
///
/// A course record, optionally carrying the assigned teacher's display name
/// (a LEFT JOIN, since courses may exist without a teacher).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    // The unique course code (e.g. "CS101").
    pub code: String,
    pub description: Option<String>,
    pub credits: i32,
    pub teacher_id: Option<Uuid>,
    #[sqlx(default)]
    pub teacher_name: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Enrollment
///
/// A student-course membership row, enriched with display names for the UI
/// (JOINs against students, courses and the course's teacher).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub student_name: String,
    pub course_name: String,
    pub course_code: String,
    #[sqlx(default)]
    pub teacher_name: Option<String>,
    #[ts(type = "string")]
    pub enrolled_at: DateTime<Utc>,
    // Populated once graded; both stay null at enrollment time.
    pub grade: Option<f64>,
    pub letter_grade: Option<String>,
}

/// TeacherCourse
///
/// A course as seen from its teacher's dashboard: the course fields plus the
/// current number of enrolled students (a COUNT aggregate).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct TeacherCourse {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub credits: i32,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    pub enrolled_students: i64,
}

/// --- Authentication Payloads ---

/// LoginRequest
///
/// Input payload for POST /api/auth/login.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// RegisterRequest
///
/// Input payload for the public student self-registration endpoint
/// (POST /api/auth/register). The password is hashed before persistence and
/// never stored or logged in plaintext. A missing `student_code` is generated
/// server-side from the registration timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub student_code: Option<String>,
    pub phone_number: Option<String>,
    #[ts(type = "string")]
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
}

/// AuthResponse
///
/// Output of a successful login or registration: the signed session token plus
/// the identity echo the frontend needs to render the session.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    pub role: String,
    pub user_id: Uuid,
}

/// SessionInfo
///
/// Output of the check-auth endpoints: the request's resolved identity, or an
/// all-empty shape with `is_authenticated = false` for anonymous requests.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SessionInfo {
    pub is_authenticated: bool,
    pub username: Option<String>,
    pub role: Option<String>,
    pub user_id: Option<Uuid>,
}

/// --- Request Payloads (Input Schemas) ---

/// CreateStudentRequest
///
/// Admin payload for creating a student together with its login identity
/// (POST /api/students). The user row (role Student) is created first, then
/// the student row referencing it.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub student_code: String,
    pub username: String,
    pub password: String,
    pub phone_number: Option<String>,
    #[ts(type = "string")]
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
}

/// UpdateStudentRequest
///
/// Admin payload for updating a student and its login identity
/// (PUT /api/students/{id}). The password is optional: absent means unchanged,
/// present means re-hash and replace.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub student_code: String,
    pub username: String,
    pub password: Option<String>,
    pub phone_number: Option<String>,
    #[ts(type = "string")]
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
}

/// CreateTeacherRequest
///
/// Admin payload for creating a teacher together with its login identity
/// (POST /api/teachers).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateTeacherRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub teacher_code: String,
    pub username: String,
    pub password: String,
    pub phone_number: Option<String>,
    #[ts(type = "string | null")]
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub department: Option<String>,
    pub specialization: Option<String>,
}

/// UpdateTeacherRequest
///
/// Admin payload for updating a teacher and its login identity
/// (PUT /api/teachers/{id}). Password semantics match UpdateStudentRequest.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateTeacherRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub teacher_code: String,
    pub username: String,
    pub password: Option<String>,
    pub phone_number: Option<String>,
    #[ts(type = "string | null")]
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub department: Option<String>,
    pub specialization: Option<String>,
}

/// CreateCourseRequest
///
/// Admin payload for creating a course (POST /api/courses). The referenced
/// teacher must exist.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateCourseRequest {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub credits: i32,
    pub teacher_id: Uuid,
}

/// UpdateCourseRequest
///
/// Admin payload for updating a course (PUT /api/courses/{id}).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateCourseRequest {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub credits: i32,
    pub teacher_id: Uuid,
}

/// EnrollStudentRequest
///
/// Admin payload for enrolling a student in a course (POST /api/courses/enroll).
/// The (student, course) pair is unique; re-enrolling is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct EnrollStudentRequest {
    pub student_id: Uuid,
    pub course_id: Uuid,
}

/// AssignTeacherRequest
///
/// Admin payload for (re)assigning the teacher of a course
/// (POST /api/courses/{id}/assign-teacher).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AssignTeacherRequest {
    pub teacher_id: Uuid,
}

/// --- Dashboard Schemas (Output) ---

/// AdminDashboardStats
///
/// Output schema for the administrative statistics dashboard (GET /api/admin/stats).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AdminDashboardStats {
    pub total_students: i64,
    pub total_teachers: i64,
    pub total_courses: i64,
    pub total_enrollments: i64,
}
