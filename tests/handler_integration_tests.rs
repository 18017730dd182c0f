use async_trait::async_trait;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{NaiveDate, Utc};
use sims_backend::{
    AppState,
    auth::{AUTH_COOKIE, Principal, password::hash_password, policy::Role, token::TokenService},
    config::AppConfig,
    handlers,
    models::{
        AdminDashboardStats, AssignTeacherRequest, Course, CreateCourseRequest,
        CreateStudentRequest, CreateTeacherRequest, EnrollStudentRequest, Enrollment,
        LoginRequest, RegisterRequest, Student, Teacher, TeacherCourse, UpdateCourseRequest,
        UpdateStudentRequest, UpdateTeacherRequest, User,
    },
    repository::Repository,
};
use std::sync::Arc;
use uuid::Uuid;

// --- MOCK REPOSITORY IMPLEMENTATION ---

// This struct is the central control point for testing handler logic.
// Handlers rely on the Repository trait, so we mock the trait implementation
// with pre-canned outputs per call family.
pub struct MockRepoControl {
    pub user_to_return: Option<User>,
    pub admin_present: bool,

    pub students_to_return: Vec<Student>,
    pub student_to_return: Option<Student>,
    pub teachers_to_return: Vec<Teacher>,
    pub teacher_to_return: Option<Teacher>,
    pub courses_to_return: Vec<Course>,
    pub course_to_return: Option<Course>,
    pub enrollments_to_return: Vec<Enrollment>,
    pub teacher_courses_to_return: Vec<TeacherCourse>,

    pub enroll_result: bool,
    pub mutation_result: bool,
    pub email_exists: bool,
    pub code_exists: bool,
    pub stats_to_return: AdminDashboardStats,
}

impl Default for MockRepoControl {
    fn default() -> Self {
        MockRepoControl {
            user_to_return: None,
            admin_present: false,
            students_to_return: vec![],
            student_to_return: None,
            teachers_to_return: vec![],
            teacher_to_return: None,
            courses_to_return: vec![],
            course_to_return: None,
            enrollments_to_return: vec![],
            teacher_courses_to_return: vec![],
            enroll_result: true, // Default to success for simpler tests
            mutation_result: true,
            email_exists: false,
            code_exists: false,
            stats_to_return: AdminDashboardStats::default(),
        }
    }
}

#[async_trait]
impl Repository for MockRepoControl {
    async fn find_user_by_username(&self, _username: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(self.user_to_return.clone())
    }
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<User, sqlx::Error> {
        Ok(User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            role: role.to_string(),
            created_at: Utc::now(),
        })
    }
    async fn admin_exists(&self) -> Result<bool, sqlx::Error> {
        Ok(self.admin_present)
    }

    async fn get_students(&self) -> Vec<Student> {
        self.students_to_return.clone()
    }
    async fn get_student(&self, _id: Uuid) -> Option<Student> {
        self.student_to_return.clone()
    }
    async fn get_student_by_user(&self, _user_id: Uuid) -> Option<Student> {
        self.student_to_return.clone()
    }
    async fn create_student(
        &self,
        user_id: Uuid,
        req: &CreateStudentRequest,
    ) -> Result<Student, sqlx::Error> {
        Ok(Student {
            id: Uuid::new_v4(),
            user_id,
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
            student_code: req.student_code.clone(),
            phone_number: req.phone_number.clone(),
            date_of_birth: req.date_of_birth,
            address: req.address.clone(),
            created_at: Utc::now(),
            username: req.username.clone(),
        })
    }
    async fn update_student(
        &self,
        _id: Uuid,
        _req: &UpdateStudentRequest,
        _password_hash: Option<String>,
    ) -> Option<Student> {
        self.student_to_return.clone()
    }
    async fn delete_student(&self, _id: Uuid) -> bool {
        self.mutation_result
    }
    async fn student_email_exists(&self, _email: &str, _exclude: Option<Uuid>) -> bool {
        self.email_exists
    }
    async fn student_code_exists(&self, _code: &str, _exclude: Option<Uuid>) -> bool {
        self.code_exists
    }

    async fn get_teachers(&self) -> Vec<Teacher> {
        self.teachers_to_return.clone()
    }
    async fn get_teacher(&self, _id: Uuid) -> Option<Teacher> {
        self.teacher_to_return.clone()
    }
    async fn get_teacher_by_user(&self, _user_id: Uuid) -> Option<Teacher> {
        self.teacher_to_return.clone()
    }
    async fn create_teacher(
        &self,
        user_id: Uuid,
        req: &CreateTeacherRequest,
    ) -> Result<Teacher, sqlx::Error> {
        Ok(Teacher {
            id: Uuid::new_v4(),
            user_id,
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            email: req.email.clone(),
            teacher_code: req.teacher_code.clone(),
            phone_number: req.phone_number.clone(),
            date_of_birth: req.date_of_birth,
            address: req.address.clone(),
            department: req.department.clone(),
            specialization: req.specialization.clone(),
            created_at: Utc::now(),
            username: req.username.clone(),
        })
    }
    async fn update_teacher(
        &self,
        _id: Uuid,
        _req: &UpdateTeacherRequest,
        _password_hash: Option<String>,
    ) -> Option<Teacher> {
        self.teacher_to_return.clone()
    }
    async fn delete_teacher(&self, _id: Uuid) -> bool {
        self.mutation_result
    }
    async fn teacher_email_exists(&self, _email: &str, _exclude: Option<Uuid>) -> bool {
        self.email_exists
    }
    async fn teacher_code_exists(&self, _code: &str, _exclude: Option<Uuid>) -> bool {
        self.code_exists
    }

    async fn get_courses(&self) -> Vec<Course> {
        self.courses_to_return.clone()
    }
    async fn get_course(&self, _id: Uuid) -> Option<Course> {
        self.course_to_return.clone()
    }
    async fn create_course(&self, req: &CreateCourseRequest) -> Result<Course, sqlx::Error> {
        Ok(Course {
            id: Uuid::new_v4(),
            name: req.name.clone(),
            code: req.code.clone(),
            description: req.description.clone(),
            credits: req.credits,
            teacher_id: Some(req.teacher_id),
            teacher_name: None,
            created_at: Utc::now(),
        })
    }
    async fn update_course(&self, _id: Uuid, _req: &UpdateCourseRequest) -> Option<Course> {
        self.course_to_return.clone()
    }
    async fn delete_course(&self, _id: Uuid) -> bool {
        self.mutation_result
    }
    async fn course_code_exists(&self, _code: &str, _exclude: Option<Uuid>) -> bool {
        self.code_exists
    }
    async fn assign_teacher(&self, _course_id: Uuid, _teacher_id: Uuid) -> bool {
        self.mutation_result
    }

    async fn enroll_student(&self, _student_id: Uuid, _course_id: Uuid) -> bool {
        self.enroll_result
    }
    async fn get_enrollments(&self, _course_id: Option<Uuid>) -> Vec<Enrollment> {
        self.enrollments_to_return.clone()
    }
    async fn get_student_enrollments(&self, _student_id: Uuid) -> Vec<Enrollment> {
        self.enrollments_to_return.clone()
    }
    async fn get_teacher_courses(&self, _teacher_id: Uuid) -> Vec<TeacherCourse> {
        self.teacher_courses_to_return.clone()
    }
    async fn remove_enrollment(&self, _id: Uuid) -> bool {
        self.mutation_result
    }

    async fn get_stats(&self) -> AdminDashboardStats {
        self.stats_to_return.clone()
    }
}

// --- Helper Functions ---

fn create_app_state(repo: MockRepoControl) -> AppState {
    let config = AppConfig::default();
    AppState {
        repo: Arc::new(repo),
        tokens: Arc::new(TokenService::new(&config)),
        config,
    }
}

fn principal_with_role(role: Option<Role>) -> Principal {
    Principal {
        user_id: Uuid::new_v4(),
        username: "testuser".to_string(),
        role,
        is_authenticated: true,
    }
}

fn stored_user(username: &str, password: &str, role: &str) -> User {
    User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        password_hash: hash_password(password).unwrap(),
        role: role.to_string(),
        created_at: Utc::now(),
    }
}

fn sample_student() -> Student {
    Student {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        student_code: "S001".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        username: "ada".to_string(),
        ..Default::default()
    }
}

fn dob() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
}

// --- Authentication Flow Tests ---

#[tokio::test]
async fn test_login_success_issues_verifiable_token_and_cookie() {
    let user = stored_user("admin", "admin123", "Admin");
    let user_id = user.id;
    let state = create_app_state(MockRepoControl {
        user_to_return: Some(user),
        ..Default::default()
    });

    let result = handlers::login(
        State(state.clone()),
        CookieJar::new(),
        Json(LoginRequest {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }),
    )
    .await;

    let (jar, Json(auth)) = result.expect("login should succeed");
    assert_eq!(auth.username, "admin");
    assert_eq!(auth.role, "Admin");
    assert_eq!(auth.user_id, user_id);

    // The issued token verifies back to the same identity.
    let principal = state.tokens.verify(&auth.token).unwrap();
    assert_eq!(principal.user_id, user_id);
    assert_eq!(principal.role, Some(Role::Admin));

    // And the browser channel received the same token.
    let cookie = jar.get(AUTH_COOKIE).expect("auth cookie set");
    assert_eq!(cookie.value(), auth.token);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    // Unknown username.
    let state = create_app_state(MockRepoControl::default());
    let unknown = handlers::login(
        State(state),
        CookieJar::new(),
        Json(LoginRequest {
            username: "ghost".to_string(),
            password: "whatever".to_string(),
        }),
    )
    .await
    .unwrap_err();

    // Known username, wrong password.
    let state = create_app_state(MockRepoControl {
        user_to_return: Some(stored_user("admin", "admin123", "Admin")),
        ..Default::default()
    });
    let wrong_password = handlers::login(
        State(state),
        CookieJar::new(),
        Json(LoginRequest {
            username: "admin".to_string(),
            password: "nope".to_string(),
        }),
    )
    .await
    .unwrap_err();

    assert_eq!(unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, wrong_password);
}

#[tokio::test]
async fn test_register_creates_student_identity() {
    let state = create_app_state(MockRepoControl::default());

    let result = handlers::register(
        State(state.clone()),
        Json(RegisterRequest {
            username: "newstudent".to_string(),
            password: "hunter22".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            student_code: None,
            phone_number: None,
            date_of_birth: dob(),
            address: None,
        }),
    )
    .await;

    let Json(auth) = result.expect("registration should succeed");
    assert_eq!(auth.username, "newstudent");
    assert_eq!(auth.role, "Student");

    let principal = state.tokens.verify(&auth.token).unwrap();
    assert_eq!(principal.role, Some(Role::Student));
}

#[tokio::test]
async fn test_register_rejects_taken_username() {
    let state = create_app_state(MockRepoControl {
        user_to_return: Some(stored_user("taken", "pw", "Student")),
        ..Default::default()
    });

    let result = handlers::register(
        State(state),
        Json(RegisterRequest {
            username: "taken".to_string(),
            password: "pw123456".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "ab@example.com".to_string(),
            student_code: None,
            phone_number: None,
            date_of_birth: dob(),
            address: None,
        }),
    )
    .await;

    assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let state = create_app_state(MockRepoControl {
        email_exists: true,
        ..Default::default()
    });

    let result = handlers::register(
        State(state),
        Json(RegisterRequest {
            username: "fresh".to_string(),
            password: "pw123456".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "dup@example.com".to_string(),
            student_code: None,
            phone_number: None,
            date_of_birth: dob(),
            address: None,
        }),
    )
    .await;

    assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_check_auth_reports_the_resolved_identity() {
    let principal = principal_with_role(Some(Role::Teacher));
    let response = handlers::check_auth(principal).await.into_response();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let session: sims_backend::models::SessionInfo = serde_json::from_slice(&body).unwrap();
    assert!(session.is_authenticated);
    assert_eq!(session.role.as_deref(), Some("Teacher"));
    assert_eq!(session.username.as_deref(), Some("testuser"));
}

#[tokio::test]
async fn test_check_auth_anonymous_is_unauthorized() {
    let response = handlers::check_auth(Principal::anonymous())
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_the_cookie() {
    let (jar, status) = handlers::logout(CookieJar::new()).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    let cookie = jar.get(AUTH_COOKIE).expect("removal cookie present");
    assert_eq!(cookie.value(), "");
}

#[tokio::test]
async fn test_create_admin_bootstrap_is_idempotent() {
    let state = create_app_state(MockRepoControl::default());
    assert_eq!(
        handlers::create_admin(State(state)).await,
        StatusCode::CREATED
    );

    let state = create_app_state(MockRepoControl {
        admin_present: true,
        ..Default::default()
    });
    assert_eq!(
        handlers::create_admin(State(state)).await,
        StatusCode::BAD_REQUEST
    );
}

// --- Role Gating Tests ---

#[tokio::test]
async fn test_get_students_role_matrix() {
    // Anonymous: 401.
    let state = create_app_state(MockRepoControl::default());
    let result = handlers::get_students(Principal::anonymous(), State(state)).await;
    assert_eq!(result.unwrap_err(), StatusCode::UNAUTHORIZED);

    // Authenticated non-admin: 403.
    let state = create_app_state(MockRepoControl::default());
    let result =
        handlers::get_students(principal_with_role(Some(Role::Student)), State(state)).await;
    assert_eq!(result.unwrap_err(), StatusCode::FORBIDDEN);

    // Admin: 200.
    let state = create_app_state(MockRepoControl {
        students_to_return: vec![sample_student()],
        ..Default::default()
    });
    let Json(students) = handlers::get_students(principal_with_role(Some(Role::Admin)), State(state))
        .await
        .expect("admin is allowed");
    assert_eq!(students.len(), 1);
}

#[tokio::test]
async fn test_roleless_principal_is_forbidden_on_admin_routes() {
    // e.g. a token minted with role "SuperAdmin": authenticated, no recognized role.
    let state = create_app_state(MockRepoControl::default());
    let result = handlers::get_students(principal_with_role(None), State(state)).await;

    assert_eq!(result.unwrap_err(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_stats_requires_admin() {
    let state = create_app_state(MockRepoControl {
        stats_to_return: AdminDashboardStats {
            total_students: 7,
            total_teachers: 2,
            total_courses: 3,
            total_enrollments: 12,
        },
        ..Default::default()
    });

    let result =
        handlers::get_admin_stats(principal_with_role(Some(Role::Teacher)), State(state.clone()))
            .await;
    assert_eq!(result.unwrap_err(), StatusCode::FORBIDDEN);

    let Json(stats) = handlers::get_admin_stats(principal_with_role(Some(Role::Admin)), State(state))
        .await
        .unwrap();
    assert_eq!(stats.total_students, 7);
}

// --- Self-Service Tests ---

#[tokio::test]
async fn test_student_me_requires_student_role_and_profile() {
    // A teacher calling the student profile route is forbidden.
    let state = create_app_state(MockRepoControl::default());
    let result = handlers::get_student_me(principal_with_role(Some(Role::Teacher)), State(state)).await;
    assert_eq!(result.unwrap_err(), StatusCode::FORBIDDEN);

    // A student without a profile row gets 404.
    let state = create_app_state(MockRepoControl::default());
    let result = handlers::get_student_me(principal_with_role(Some(Role::Student)), State(state)).await;
    assert_eq!(result.unwrap_err(), StatusCode::NOT_FOUND);

    // A student with a profile gets it back.
    let state = create_app_state(MockRepoControl {
        student_to_return: Some(sample_student()),
        ..Default::default()
    });
    let Json(student) = handlers::get_student_me(principal_with_role(Some(Role::Student)), State(state))
        .await
        .unwrap();
    assert_eq!(student.email, "ada@example.com");
}

#[tokio::test]
async fn test_student_my_courses_lists_enrollments() {
    let state = create_app_state(MockRepoControl {
        student_to_return: Some(sample_student()),
        enrollments_to_return: vec![Enrollment::default(), Enrollment::default()],
        ..Default::default()
    });

    let Json(enrollments) =
        handlers::get_my_courses(principal_with_role(Some(Role::Student)), State(state))
            .await
            .unwrap();

    assert_eq!(enrollments.len(), 2);
}

#[tokio::test]
async fn test_teacher_my_courses_counts_enrollments() {
    let state = create_app_state(MockRepoControl {
        teacher_to_return: Some(Teacher::default()),
        teacher_courses_to_return: vec![TeacherCourse {
            enrolled_students: 31,
            ..Default::default()
        }],
        ..Default::default()
    });

    let Json(courses) =
        handlers::get_teaching_courses(principal_with_role(Some(Role::Teacher)), State(state))
            .await
            .unwrap();

    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].enrolled_students, 31);
}

// --- Record Management Tests ---

#[tokio::test]
async fn test_create_student_rejects_duplicates() {
    let payload = CreateStudentRequest {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        student_code: "S001".to_string(),
        username: "ada".to_string(),
        password: "pw123456".to_string(),
        date_of_birth: dob(),
        ..Default::default()
    };

    // Username already belongs to someone.
    let state = create_app_state(MockRepoControl {
        user_to_return: Some(stored_user("ada", "pw", "Student")),
        ..Default::default()
    });
    let result = handlers::create_student(
        principal_with_role(Some(Role::Admin)),
        State(state),
        Json(payload.clone()),
    )
    .await;
    assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);

    // Clean path creates and answers 201.
    let state = create_app_state(MockRepoControl::default());
    let (status, Json(student)) = handlers::create_student(
        principal_with_role(Some(Role::Admin)),
        State(state),
        Json(payload),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(student.username, "ada");
}

#[tokio::test]
async fn test_update_student_rejects_duplicate_email() {
    let state = create_app_state(MockRepoControl {
        student_to_return: Some(sample_student()),
        email_exists: true,
        ..Default::default()
    });

    let result = handlers::update_student(
        principal_with_role(Some(Role::Admin)),
        State(state),
        Path(Uuid::new_v4()),
        Json(UpdateStudentRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "taken@example.com".to_string(),
            student_code: "S001".to_string(),
            username: "ada".to_string(),
            date_of_birth: dob(),
            ..Default::default()
        }),
    )
    .await;

    assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_student_status_mapping() {
    let state = create_app_state(MockRepoControl::default());
    let status = handlers::delete_student(
        principal_with_role(Some(Role::Admin)),
        State(state),
        Path(Uuid::new_v4()),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let state = create_app_state(MockRepoControl {
        mutation_result: false,
        ..Default::default()
    });
    let status = handlers::delete_student(
        principal_with_role(Some(Role::Admin)),
        State(state),
        Path(Uuid::new_v4()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_course_validates_code_and_teacher() {
    let payload = CreateCourseRequest {
        name: "Databases".to_string(),
        code: "CS305".to_string(),
        description: None,
        credits: 5,
        teacher_id: Uuid::new_v4(),
    };

    // Duplicate code.
    let state = create_app_state(MockRepoControl {
        code_exists: true,
        teacher_to_return: Some(Teacher::default()),
        ..Default::default()
    });
    let result = handlers::create_course(
        principal_with_role(Some(Role::Admin)),
        State(state),
        Json(payload.clone()),
    )
    .await;
    assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);

    // Unknown teacher.
    let state = create_app_state(MockRepoControl::default());
    let result = handlers::create_course(
        principal_with_role(Some(Role::Admin)),
        State(state),
        Json(payload.clone()),
    )
    .await;
    assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);

    // Clean path.
    let state = create_app_state(MockRepoControl {
        teacher_to_return: Some(Teacher::default()),
        ..Default::default()
    });
    let (status, Json(course)) = handlers::create_course(
        principal_with_role(Some(Role::Admin)),
        State(state),
        Json(payload),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(course.code, "CS305");
}

#[tokio::test]
async fn test_enroll_student_conflict_maps_to_409() {
    let existing = MockRepoControl {
        student_to_return: Some(sample_student()),
        course_to_return: Some(Course::default()),
        enroll_result: false,
        ..Default::default()
    };
    let state = create_app_state(existing);

    let result = handlers::enroll_student(
        principal_with_role(Some(Role::Admin)),
        State(state),
        Json(EnrollStudentRequest {
            student_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
        }),
    )
    .await;

    assert_eq!(result.unwrap_err(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_enroll_student_rejects_unknown_references() {
    // Unknown student (course present).
    let state = create_app_state(MockRepoControl {
        course_to_return: Some(Course::default()),
        ..Default::default()
    });
    let result = handlers::enroll_student(
        principal_with_role(Some(Role::Admin)),
        State(state),
        Json(EnrollStudentRequest {
            student_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
        }),
    )
    .await;
    assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_assign_teacher_validates_both_sides() {
    // Course missing: 404.
    let state = create_app_state(MockRepoControl {
        teacher_to_return: Some(Teacher::default()),
        course_to_return: None,
        ..Default::default()
    });
    let result = handlers::assign_teacher(
        principal_with_role(Some(Role::Admin)),
        State(state),
        Path(Uuid::new_v4()),
        Json(AssignTeacherRequest {
            teacher_id: Uuid::new_v4(),
        }),
    )
    .await;
    assert_eq!(result.unwrap_err(), StatusCode::NOT_FOUND);

    // Teacher missing: 400.
    let state = create_app_state(MockRepoControl {
        course_to_return: Some(Course::default()),
        teacher_to_return: None,
        ..Default::default()
    });
    let result = handlers::assign_teacher(
        principal_with_role(Some(Role::Admin)),
        State(state),
        Path(Uuid::new_v4()),
        Json(AssignTeacherRequest {
            teacher_id: Uuid::new_v4(),
        }),
    )
    .await;
    assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);
}
