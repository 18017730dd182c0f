use crate::{
    AppState,
    auth::{
        Principal, authorize,
        password::{hash_password, verify_password},
        policy::Role,
        resolve::{auth_cookie, clear_auth_cookie},
    },
    models::{
        AdminDashboardStats, AssignTeacherRequest, AuthResponse, Course,
        CreateCourseRequest, CreateStudentRequest, CreateTeacherRequest, EnrollStudentRequest,
        Enrollment, LoginRequest, RegisterRequest, SessionInfo, Student, Teacher, TeacherCourse,
        UpdateCourseRequest, UpdateStudentRequest, UpdateTeacherRequest,
    },
    repository::RepositoryState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

// Bootstrap credentials for the very first login. Meant to be rotated
// immediately after initial setup.
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

// --- Filter Structs ---

/// EnrollmentFilter
///
/// Defines the accepted query parameters for the enrollment listing endpoint
/// (GET /api/courses/enrollments). Used by Axum's Query extractor to safely bind
/// HTTP query parameters.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct EnrollmentFilter {
    /// Optional filter restricting the listing to a single course.
    pub course_id: Option<Uuid>,
}

// --- Bootstrap ---

/// ensure_default_admin
///
/// Idempotent default-admin bootstrap shared by startup and the explicit
/// create-admin endpoint. Creates the `admin` account only when no Admin
/// exists yet; returns whether a record was created. Store errors propagate so
/// the caller decides whether they are fatal (they are not at startup; the
/// endpoint can be retried later).
pub async fn ensure_default_admin(repo: &RepositoryState) -> Result<bool, sqlx::Error> {
    if repo.admin_exists().await? {
        return Ok(false);
    }

    let password_hash = match hash_password(DEFAULT_ADMIN_PASSWORD) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash default admin password: {:?}", e);
            return Ok(false);
        }
    };

    repo.create_user(DEFAULT_ADMIN_USERNAME, &password_hash, Role::Admin.as_str())
        .await?;

    tracing::info!("Default admin user created (username: admin)");
    tracing::warn!("Change the default admin password before exposing this instance.");
    Ok(true)
}

// --- Authentication Handlers ---

/// login
///
/// [Public Route] Verifies the submitted credentials against the credential
/// store and, on success, issues a fresh session token. The token travels back
/// twice: in the JSON body for API clients, and as the auth cookie for browser
/// navigation.
///
/// *Security*: unknown username and wrong password collapse into the same 401,
/// so the endpoint cannot be used to probe which usernames exist.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), StatusCode> {
    let user = state
        .repo
        .find_user_by_username(&payload.username)
        .await
        .map_err(|e| {
            tracing::error!("Credential lookup failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let token = state.tokens.issue(&user).map_err(|e| {
        tracing::error!("Token issuance failed: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    tracing::info!("Login successful for user {} ({})", user.username, user.id);

    let jar = jar.add(auth_cookie(&token, &state.config));
    Ok((
        jar,
        Json(AuthResponse {
            token,
            username: user.username,
            role: user.role,
            user_id: user.id,
        }),
    ))
}

/// register
///
/// [Public Route] Student self-registration: creates the login identity (role
/// Student, hashed password) and the student profile in one flow, then issues
/// a session token so the new student is signed in immediately.
///
/// A missing student code is generated from the registration timestamp; a
/// generated code that happens to collide gets a short random suffix.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered", body = AuthResponse),
        (status = 400, description = "Username or email already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, StatusCode> {
    let existing = state
        .repo
        .find_user_by_username(&payload.username)
        .await
        .map_err(|e| {
            tracing::error!("Credential lookup failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    if existing.is_some() {
        return Err(StatusCode::BAD_REQUEST);
    }
    if state.repo.student_email_exists(&payload.email, None).await {
        return Err(StatusCode::BAD_REQUEST);
    }

    // Generate a student code when the client did not supply one.
    let mut student_code = match payload.student_code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => format!("S{}", Utc::now().format("%Y%m%d%H%M%S%3f")),
    };
    if state.repo.student_code_exists(&student_code, None).await {
        let suffix = Uuid::new_v4().simple().to_string();
        student_code = format!("{}-{}", student_code, &suffix[4..8]);
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        tracing::error!("Password hashing failed: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let user = state
        .repo
        .create_user(&payload.username, &password_hash, Role::Student.as_str())
        .await
        .map_err(|e| {
            tracing::error!("User creation failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let profile = CreateStudentRequest {
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        student_code,
        username: user.username.clone(),
        password: String::new(), // already persisted as a hash on the user row
        phone_number: payload.phone_number,
        date_of_birth: payload.date_of_birth,
        address: payload.address,
    };
    state
        .repo
        .create_student(user.id, &profile)
        .await
        .map_err(|e| {
            tracing::error!("Student profile creation failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    tracing::info!("Registration successful for user {} ({})", user.username, user.id);

    let token = state.tokens.issue(&user).map_err(|e| {
        tracing::error!("Token issuance failed: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(AuthResponse {
        token,
        username: user.username,
        role: user.role,
        user_id: user.id,
    }))
}

/// logout
///
/// [Public Route] Clears the auth cookie. The token itself stays valid until
/// its own expiry (tokens are verified, never stored), so logout is purely a
/// client-side cleanup.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 204, description = "Logged out"))
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (jar.add(clear_auth_cookie()), StatusCode::NO_CONTENT)
}

/// check_auth
///
/// [Public Route] Reports the request's resolved identity. Served both under
/// /api (header clients) and at the root path (browser clients via the cookie
/// fallback). Anonymous requests receive 401 with an empty session shape.
#[utoipa::path(
    get,
    path = "/api/auth/check-auth",
    responses(
        (status = 200, description = "Authenticated session", body = SessionInfo),
        (status = 401, description = "Anonymous", body = SessionInfo)
    )
)]
pub async fn check_auth(principal: Principal) -> impl IntoResponse {
    if principal.is_authenticated {
        (
            StatusCode::OK,
            Json(SessionInfo {
                is_authenticated: true,
                username: Some(principal.username),
                role: principal.role.map(|r| r.as_str().to_string()),
                user_id: Some(principal.user_id),
            }),
        )
    } else {
        (StatusCode::UNAUTHORIZED, Json(SessionInfo::default()))
    }
}

/// create_admin
///
/// [Public Route] Explicit trigger for the default-admin bootstrap, useful when
/// the startup seeding was skipped (e.g. the database came up late). Refuses
/// once an Admin account exists.
#[utoipa::path(
    post,
    path = "/api/auth/create-admin",
    responses(
        (status = 201, description = "Default admin created"),
        (status = 400, description = "Admin already exists")
    )
)]
pub async fn create_admin(State(state): State<AppState>) -> StatusCode {
    match ensure_default_admin(&state.repo).await {
        Ok(true) => StatusCode::CREATED,
        Ok(false) => StatusCode::BAD_REQUEST,
        Err(e) => {
            tracing::error!("Admin bootstrap failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// --- Student Handlers ---

/// get_students
///
/// [Admin Route] Lists all student records with their login usernames.
#[utoipa::path(
    get,
    path = "/api/students",
    responses((status = 200, description = "All students", body = [Student]))
)]
pub async fn get_students(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, StatusCode> {
    authorize(&principal, &[Role::Admin]).map_err(|d| d.status())?;
    Ok(Json(state.repo.get_students().await))
}

/// get_student
///
/// [Admin Route] Retrieves a single student record by id.
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses((status = 200, description = "Found", body = Student))
)]
pub async fn get_student(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, StatusCode> {
    authorize(&principal, &[Role::Admin]).map_err(|d| d.status())?;
    match state.repo.get_student(id).await {
        Some(student) => Ok(Json(student)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// create_student
///
/// [Admin Route] Creates a student together with its login identity. The user
/// row (role Student) is persisted first, then the profile referencing it,
/// mirroring the registration flow but driven by an administrator.
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Created", body = Student),
        (status = 400, description = "Duplicate username, email or student code")
    )
)]
pub async fn create_student(
    principal: Principal,
    State(state): State<AppState>,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<Student>), StatusCode> {
    authorize(&principal, &[Role::Admin]).map_err(|d| d.status())?;

    let username_taken = state
        .repo
        .find_user_by_username(&payload.username)
        .await
        .map_err(|e| {
            tracing::error!("Credential lookup failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .is_some();
    if username_taken
        || state.repo.student_email_exists(&payload.email, None).await
        || state
            .repo
            .student_code_exists(&payload.student_code, None)
            .await
    {
        return Err(StatusCode::BAD_REQUEST);
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        tracing::error!("Password hashing failed: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let user = state
        .repo
        .create_user(&payload.username, &password_hash, Role::Student.as_str())
        .await
        .map_err(|e| {
            tracing::error!("User creation failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let student = state
        .repo
        .create_student(user.id, &payload)
        .await
        .map_err(|e| {
            tracing::error!("Student creation failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok((StatusCode::CREATED, Json(student)))
}

/// update_student
///
/// [Admin Route] Updates a student profile and its login identity. The password
/// is re-hashed only when the payload carries one; uniqueness checks exclude
/// the record being updated.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Updated", body = Student),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_student(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStudentRequest>,
) -> Result<Json<Student>, StatusCode> {
    authorize(&principal, &[Role::Admin]).map_err(|d| d.status())?;

    let current = state
        .repo
        .get_student(id)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    if state
        .repo
        .student_email_exists(&payload.email, Some(id))
        .await
        || state
            .repo
            .student_code_exists(&payload.student_code, Some(id))
            .await
    {
        return Err(StatusCode::BAD_REQUEST);
    }
    // The new username must not belong to a different login identity.
    let username_clash = state
        .repo
        .find_user_by_username(&payload.username)
        .await
        .map_err(|e| {
            tracing::error!("Credential lookup failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .is_some_and(|u| u.id != current.user_id);
    if username_clash {
        return Err(StatusCode::BAD_REQUEST);
    }

    let password_hash = match payload.password.as_deref() {
        Some(p) if !p.is_empty() => Some(hash_password(p).map_err(|e| {
            tracing::error!("Password hashing failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?),
        _ => None,
    };

    match state.repo.update_student(id, &payload, password_hash).await {
        Some(student) => Ok(Json(student)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// delete_student
///
/// [Admin Route] Removes a student and its login identity.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_student(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if let Err(deny) = authorize(&principal, &[Role::Admin]) {
        return deny.status();
    }
    if state.repo.delete_student(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// get_student_me
///
/// [Student Route] The authenticated student's own profile, resolved through
/// the login identity carried by the Principal.
#[utoipa::path(
    get,
    path = "/api/students/me",
    responses((status = 200, description = "Profile", body = Student))
)]
pub async fn get_student_me(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<Student>, StatusCode> {
    authorize(&principal, &[Role::Student]).map_err(|d| d.status())?;
    match state.repo.get_student_by_user(principal.user_id).await {
        Some(student) => Ok(Json(student)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// get_my_courses
///
/// [Student Route] The authenticated student's enrollments, including the
/// assigned teacher and any recorded grades.
#[utoipa::path(
    get,
    path = "/api/students/my-courses",
    responses((status = 200, description = "My enrollments", body = [Enrollment]))
)]
pub async fn get_my_courses(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<Vec<Enrollment>>, StatusCode> {
    authorize(&principal, &[Role::Student]).map_err(|d| d.status())?;
    let student = state
        .repo
        .get_student_by_user(principal.user_id)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(state.repo.get_student_enrollments(student.id).await))
}

// --- Teacher Handlers ---

/// get_teachers
///
/// [Admin Route] Lists all teacher records with their login usernames.
#[utoipa::path(
    get,
    path = "/api/teachers",
    responses((status = 200, description = "All teachers", body = [Teacher]))
)]
pub async fn get_teachers(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<Vec<Teacher>>, StatusCode> {
    authorize(&principal, &[Role::Admin]).map_err(|d| d.status())?;
    Ok(Json(state.repo.get_teachers().await))
}

/// get_teacher
///
/// [Admin Route] Retrieves a single teacher record by id.
#[utoipa::path(
    get,
    path = "/api/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    responses((status = 200, description = "Found", body = Teacher))
)]
pub async fn get_teacher(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Teacher>, StatusCode> {
    authorize(&principal, &[Role::Admin]).map_err(|d| d.status())?;
    match state.repo.get_teacher(id).await {
        Some(teacher) => Ok(Json(teacher)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// create_teacher
///
/// [Admin Route] Creates a teacher together with its login identity (role
/// Teacher). Same two-step flow as create_student.
#[utoipa::path(
    post,
    path = "/api/teachers",
    request_body = CreateTeacherRequest,
    responses(
        (status = 201, description = "Created", body = Teacher),
        (status = 400, description = "Duplicate username, email or teacher code")
    )
)]
pub async fn create_teacher(
    principal: Principal,
    State(state): State<AppState>,
    Json(payload): Json<CreateTeacherRequest>,
) -> Result<(StatusCode, Json<Teacher>), StatusCode> {
    authorize(&principal, &[Role::Admin]).map_err(|d| d.status())?;

    let username_taken = state
        .repo
        .find_user_by_username(&payload.username)
        .await
        .map_err(|e| {
            tracing::error!("Credential lookup failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .is_some();
    if username_taken
        || state.repo.teacher_email_exists(&payload.email, None).await
        || state
            .repo
            .teacher_code_exists(&payload.teacher_code, None)
            .await
    {
        return Err(StatusCode::BAD_REQUEST);
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        tracing::error!("Password hashing failed: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let user = state
        .repo
        .create_user(&payload.username, &password_hash, Role::Teacher.as_str())
        .await
        .map_err(|e| {
            tracing::error!("User creation failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let teacher = state
        .repo
        .create_teacher(user.id, &payload)
        .await
        .map_err(|e| {
            tracing::error!("Teacher creation failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok((StatusCode::CREATED, Json(teacher)))
}

/// update_teacher
///
/// [Admin Route] Updates a teacher profile and its login identity; password
/// semantics match update_student.
#[utoipa::path(
    put,
    path = "/api/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    request_body = UpdateTeacherRequest,
    responses(
        (status = 200, description = "Updated", body = Teacher),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_teacher(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTeacherRequest>,
) -> Result<Json<Teacher>, StatusCode> {
    authorize(&principal, &[Role::Admin]).map_err(|d| d.status())?;

    let current = state
        .repo
        .get_teacher(id)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    if state
        .repo
        .teacher_email_exists(&payload.email, Some(id))
        .await
        || state
            .repo
            .teacher_code_exists(&payload.teacher_code, Some(id))
            .await
    {
        return Err(StatusCode::BAD_REQUEST);
    }
    let username_clash = state
        .repo
        .find_user_by_username(&payload.username)
        .await
        .map_err(|e| {
            tracing::error!("Credential lookup failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .is_some_and(|u| u.id != current.user_id);
    if username_clash {
        return Err(StatusCode::BAD_REQUEST);
    }

    let password_hash = match payload.password.as_deref() {
        Some(p) if !p.is_empty() => Some(hash_password(p).map_err(|e| {
            tracing::error!("Password hashing failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?),
        _ => None,
    };

    match state.repo.update_teacher(id, &payload, password_hash).await {
        Some(teacher) => Ok(Json(teacher)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// delete_teacher
///
/// [Admin Route] Removes a teacher and its login identity. Courses the teacher
/// taught remain, unassigned.
#[utoipa::path(
    delete,
    path = "/api/teachers/{id}",
    params(("id" = Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_teacher(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if let Err(deny) = authorize(&principal, &[Role::Admin]) {
        return deny.status();
    }
    if state.repo.delete_teacher(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// get_teacher_me
///
/// [Teacher Route] The authenticated teacher's own profile.
#[utoipa::path(
    get,
    path = "/api/teachers/me",
    responses((status = 200, description = "Profile", body = Teacher))
)]
pub async fn get_teacher_me(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<Teacher>, StatusCode> {
    authorize(&principal, &[Role::Teacher]).map_err(|d| d.status())?;
    match state.repo.get_teacher_by_user(principal.user_id).await {
        Some(teacher) => Ok(Json(teacher)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// get_teaching_courses
///
/// [Teacher Route] The authenticated teacher's courses with per-course
/// enrollment counts.
#[utoipa::path(
    get,
    path = "/api/teachers/my-courses",
    responses((status = 200, description = "My courses", body = [TeacherCourse]))
)]
pub async fn get_teaching_courses(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<Vec<TeacherCourse>>, StatusCode> {
    authorize(&principal, &[Role::Teacher]).map_err(|d| d.status())?;
    let teacher = state
        .repo
        .get_teacher_by_user(principal.user_id)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(state.repo.get_teacher_courses(teacher.id).await))
}

// --- Course Handlers ---

/// get_courses
///
/// [Admin Route] Lists all courses with their assigned teacher names.
#[utoipa::path(
    get,
    path = "/api/courses",
    responses((status = 200, description = "All courses", body = [Course]))
)]
pub async fn get_courses(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<Vec<Course>>, StatusCode> {
    authorize(&principal, &[Role::Admin]).map_err(|d| d.status())?;
    Ok(Json(state.repo.get_courses().await))
}

/// get_course
///
/// [Admin Route] Retrieves a single course by id.
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses((status = 200, description = "Found", body = Course))
)]
pub async fn get_course(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, StatusCode> {
    authorize(&principal, &[Role::Admin]).map_err(|d| d.status())?;
    match state.repo.get_course(id).await {
        Some(course) => Ok(Json(course)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// create_course
///
/// [Admin Route] Creates a course. The course code must be unique and the
/// referenced teacher must exist.
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Created", body = Course),
        (status = 400, description = "Duplicate code or unknown teacher")
    )
)]
pub async fn create_course(
    principal: Principal,
    State(state): State<AppState>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<Course>), StatusCode> {
    authorize(&principal, &[Role::Admin]).map_err(|d| d.status())?;

    if state.repo.course_code_exists(&payload.code, None).await {
        return Err(StatusCode::BAD_REQUEST);
    }
    if state.repo.get_teacher(payload.teacher_id).await.is_none() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let course = state.repo.create_course(&payload).await.map_err(|e| {
        tracing::error!("Course creation failed: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((StatusCode::CREATED, Json(course)))
}

/// update_course
///
/// [Admin Route] Updates a course; uniqueness and teacher-existence rules
/// match create_course, with the code check excluding the course itself.
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Updated", body = Course),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_course(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<Json<Course>, StatusCode> {
    authorize(&principal, &[Role::Admin]).map_err(|d| d.status())?;

    if state.repo.course_code_exists(&payload.code, Some(id)).await {
        return Err(StatusCode::BAD_REQUEST);
    }
    if state.repo.get_teacher(payload.teacher_id).await.is_none() {
        return Err(StatusCode::BAD_REQUEST);
    }

    match state.repo.update_course(id, &payload).await {
        Some(course) => Ok(Json(course)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// delete_course
///
/// [Admin Route] Removes a course and, by cascade, its enrollments.
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_course(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if let Err(deny) = authorize(&principal, &[Role::Admin]) {
        return deny.status();
    }
    if state.repo.delete_course(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// enroll_student
///
/// [Admin Route] Enrolls a student in a course.
///
/// *Idempotency*: The repository method uses the unique (student, course) pair
/// to enforce the **one-enrollment-per-student-per-course** rule, returning a
/// 409 Conflict if violated.
#[utoipa::path(
    post,
    path = "/api/courses/enroll",
    request_body = EnrollStudentRequest,
    responses(
        (status = 200, description = "Enrolled"),
        (status = 400, description = "Unknown student or course"),
        (status = 409, description = "Already enrolled")
    )
)]
pub async fn enroll_student(
    principal: Principal,
    State(state): State<AppState>,
    Json(payload): Json<EnrollStudentRequest>,
) -> Result<StatusCode, StatusCode> {
    authorize(&principal, &[Role::Admin]).map_err(|d| d.status())?;

    if state.repo.get_student(payload.student_id).await.is_none() {
        return Err(StatusCode::BAD_REQUEST);
    }
    if state.repo.get_course(payload.course_id).await.is_none() {
        return Err(StatusCode::BAD_REQUEST);
    }

    match state
        .repo
        .enroll_student(payload.student_id, payload.course_id)
        .await
    {
        true => Ok(StatusCode::OK),
        false => Err(StatusCode::CONFLICT),
    }
}

/// get_enrollments
///
/// [Admin Route] Lists enrollments across the system, optionally filtered to a
/// single course via query parameter.
#[utoipa::path(
    get,
    path = "/api/courses/enrollments",
    params(EnrollmentFilter),
    responses((status = 200, description = "Enrollments", body = [Enrollment]))
)]
pub async fn get_enrollments(
    principal: Principal,
    State(state): State<AppState>,
    Query(filter): Query<EnrollmentFilter>,
) -> Result<Json<Vec<Enrollment>>, StatusCode> {
    authorize(&principal, &[Role::Admin]).map_err(|d| d.status())?;
    Ok(Json(state.repo.get_enrollments(filter.course_id).await))
}

/// get_course_students
///
/// [Admin Route] Lists the students enrolled in one course.
#[utoipa::path(
    get,
    path = "/api/courses/{id}/students",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses((status = 200, description = "Enrolled students", body = [Enrollment]))
)]
pub async fn get_course_students(
    principal: Principal,
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Vec<Enrollment>>, StatusCode> {
    authorize(&principal, &[Role::Admin]).map_err(|d| d.status())?;
    if state.repo.get_course(course_id).await.is_none() {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(state.repo.get_enrollments(Some(course_id)).await))
}

/// remove_enrollment
///
/// [Admin Route] Withdraws a student from a course by deleting the enrollment row.
#[utoipa::path(
    delete,
    path = "/api/courses/enrollments/{id}",
    params(("id" = Uuid, Path, description = "Enrollment ID")),
    responses(
        (status = 204, description = "Removed"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn remove_enrollment(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if let Err(deny) = authorize(&principal, &[Role::Admin]) {
        return deny.status();
    }
    if state.repo.remove_enrollment(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// assign_teacher
///
/// [Admin Route] Assigns (or reassigns) the teacher of a course.
#[utoipa::path(
    post,
    path = "/api/courses/{id}/assign-teacher",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = AssignTeacherRequest,
    responses(
        (status = 200, description = "Assigned"),
        (status = 400, description = "Unknown teacher"),
        (status = 404, description = "Course Not Found")
    )
)]
pub async fn assign_teacher(
    principal: Principal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignTeacherRequest>,
) -> Result<StatusCode, StatusCode> {
    authorize(&principal, &[Role::Admin]).map_err(|d| d.status())?;

    if state.repo.get_course(id).await.is_none() {
        return Err(StatusCode::NOT_FOUND);
    }
    if state.repo.get_teacher(payload.teacher_id).await.is_none() {
        return Err(StatusCode::BAD_REQUEST);
    }

    match state.repo.assign_teacher(id, payload.teacher_id).await {
        true => Ok(StatusCode::OK),
        false => Err(StatusCode::NOT_FOUND),
    }
}

// --- Dashboard Handlers ---

/// get_admin_stats
///
/// [Admin Route] Retrieves core application statistics for the dashboard.
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses((status = 200, description = "Stats", body = AdminDashboardStats))
)]
pub async fn get_admin_stats(
    principal: Principal,
    State(state): State<AppState>,
) -> Result<Json<AdminDashboardStats>, StatusCode> {
    authorize(&principal, &[Role::Admin]).map_err(|d| d.status())?;
    Ok(Json(state.repo.get_stats().await))
}
