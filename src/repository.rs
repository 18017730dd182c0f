use crate::models::{
    AdminDashboardStats, Course, CreateCourseRequest, CreateStudentRequest, CreateTeacherRequest,
    Enrollment, Student, Teacher, TeacherCourse, UpdateCourseRequest, UpdateStudentRequest,
    UpdateTeacherRequest, User,
};
use async_trait::async_trait;
use sqlx::{PgPool, query_builder::QueryBuilder};
use std::sync::Arc;
use uuid::Uuid;

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations. This is the core
/// of the Repository Abstraction pattern, allowing the handlers to interact with
/// the data layer without knowing the specific implementation (Postgres, Mock, etc.).
///
/// **Send + Sync + async_trait** are required to make the trait object (`Arc<dyn Repository>`)
/// safely shareable and usable across Axum's asynchronous task boundaries.
///
/// Error discipline: the credential-store methods (users) surface `sqlx::Error`
/// so a store outage is distinguishable from "no such user" on the login path.
/// The entity CRUD methods follow the lenient log-and-degrade convention.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Credential Store ---
    // Lookup must be linearizable with registration: a just-created user is
    // immediately loadable for the login that follows.
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<User, sqlx::Error>;
    // Used by the default-admin bootstrap at startup.
    async fn admin_exists(&self) -> Result<bool, sqlx::Error>;

    // --- Students ---
    async fn get_students(&self) -> Vec<Student>;
    async fn get_student(&self, id: Uuid) -> Option<Student>;
    // Resolves the student profile behind a login identity (self-service routes).
    async fn get_student_by_user(&self, user_id: Uuid) -> Option<Student>;
    async fn create_student(
        &self,
        user_id: Uuid,
        req: &CreateStudentRequest,
    ) -> Result<Student, sqlx::Error>;
    // `password_hash` is Some only when the caller supplied a new password.
    async fn update_student(
        &self,
        id: Uuid,
        req: &UpdateStudentRequest,
        password_hash: Option<String>,
    ) -> Option<Student>;
    // Deletes the owning user row; the student row follows by cascade.
    async fn delete_student(&self, id: Uuid) -> bool;
    async fn student_email_exists(&self, email: &str, exclude: Option<Uuid>) -> bool;
    async fn student_code_exists(&self, code: &str, exclude: Option<Uuid>) -> bool;

    // --- Teachers ---
    async fn get_teachers(&self) -> Vec<Teacher>;
    async fn get_teacher(&self, id: Uuid) -> Option<Teacher>;
    async fn get_teacher_by_user(&self, user_id: Uuid) -> Option<Teacher>;
    async fn create_teacher(
        &self,
        user_id: Uuid,
        req: &CreateTeacherRequest,
    ) -> Result<Teacher, sqlx::Error>;
    async fn update_teacher(
        &self,
        id: Uuid,
        req: &UpdateTeacherRequest,
        password_hash: Option<String>,
    ) -> Option<Teacher>;
    async fn delete_teacher(&self, id: Uuid) -> bool;
    async fn teacher_email_exists(&self, email: &str, exclude: Option<Uuid>) -> bool;
    async fn teacher_code_exists(&self, code: &str, exclude: Option<Uuid>) -> bool;

    // --- Courses ---
    async fn get_courses(&self) -> Vec<Course>;
    async fn get_course(&self, id: Uuid) -> Option<Course>;
    async fn create_course(&self, req: &CreateCourseRequest) -> Result<Course, sqlx::Error>;
    async fn update_course(&self, id: Uuid, req: &UpdateCourseRequest) -> Option<Course>;
    async fn delete_course(&self, id: Uuid) -> bool;
    async fn course_code_exists(&self, code: &str, exclude: Option<Uuid>) -> bool;
    async fn assign_teacher(&self, course_id: Uuid, teacher_id: Uuid) -> bool;

    // --- Enrollments ---
    // Idempotent at the storage level: returns true only if a row was inserted.
    async fn enroll_student(&self, student_id: Uuid, course_id: Uuid) -> bool;
    async fn get_enrollments(&self, course_id: Option<Uuid>) -> Vec<Enrollment>;
    async fn get_student_enrollments(&self, student_id: Uuid) -> Vec<Enrollment>;
    async fn get_teacher_courses(&self, teacher_id: Uuid) -> Vec<TeacherCourse>;
    async fn remove_enrollment(&self, id: Uuid) -> bool;

    // --- Dashboard ---
    async fn get_stats(&self) -> AdminDashboardStats;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer access across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by the PostgreSQL database.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Shared SELECT fragments. Every wire model joins the users table for the
// username, so the column lists live in one place.
const STUDENT_COLUMNS: &str = r#"
    s.id, s.user_id, s.first_name, s.last_name, s.email, s.student_code,
    s.phone_number, s.date_of_birth, s.address, s.created_at, u.username
"#;

const TEACHER_COLUMNS: &str = r#"
    t.id, t.user_id, t.first_name, t.last_name, t.email, t.teacher_code,
    t.phone_number, t.date_of_birth, t.address, t.department, t.specialization,
    t.created_at, u.username
"#;

const COURSE_COLUMNS: &str = r#"
    c.id, c.name, c.code, c.description, c.credits, c.teacher_id,
    CASE WHEN t.id IS NULL THEN NULL ELSE t.first_name || ' ' || t.last_name END AS teacher_name,
    c.created_at
"#;

const ENROLLMENT_COLUMNS: &str = r#"
    e.id, e.student_id, e.course_id,
    s.first_name || ' ' || s.last_name AS student_name,
    c.name AS course_name, c.code AS course_code,
    CASE WHEN t.id IS NULL THEN NULL ELSE t.first_name || ' ' || t.last_name END AS teacher_name,
    e.enrolled_at, e.grade, e.letter_grade
"#;

#[async_trait]
impl Repository for PostgresRepository {
    // --- CREDENTIAL STORE ---

    /// find_user_by_username
    ///
    /// The credential lookup backing login. Propagates database errors so the
    /// caller can distinguish "unknown user" from "store unavailable".
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, role, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    /// create_user
    ///
    /// Inserts a new login identity. The unique index on `username` enforces
    /// the one-identity-per-username rule at the storage level.
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (id, username, password_hash, role, created_at)
               VALUES ($1, $2, $3, $4, NOW())
               RETURNING id, username, password_hash, role, created_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
    }

    /// admin_exists
    ///
    /// Checks whether any Admin account is present. Backs the idempotent
    /// default-admin bootstrap.
    async fn admin_exists(&self) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE role = 'Admin')")
            .fetch_one(&self.pool)
            .await
    }

    // --- STUDENTS ---

    /// get_students
    ///
    /// Full listing with the login username joined in. Admin-only at the route level.
    async fn get_students(&self) -> Vec<Student> {
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM students s JOIN users u ON s.user_id = u.id ORDER BY s.created_at DESC"
        );
        match sqlx::query_as::<_, Student>(&sql).fetch_all(&self.pool).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("get_students error: {:?}", e);
                vec![]
            }
        }
    }

    /// get_student
    ///
    /// Single-record retrieval by row id.
    async fn get_student(&self, id: Uuid) -> Option<Student> {
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM students s JOIN users u ON s.user_id = u.id WHERE s.id = $1"
        );
        sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_student error: {:?}", e);
                None
            })
    }

    /// get_student_by_user
    ///
    /// Resolves the student profile for an authenticated login identity.
    async fn get_student_by_user(&self, user_id: Uuid) -> Option<Student> {
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM students s JOIN users u ON s.user_id = u.id WHERE s.user_id = $1"
        );
        sqlx::query_as::<_, Student>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_student_by_user error: {:?}", e);
                None
            })
    }

    /// create_student
    ///
    /// Inserts the student profile referencing an already-created user row.
    /// Uses a CTE to return the enriched record (with username) in one round trip.
    async fn create_student(
        &self,
        user_id: Uuid,
        req: &CreateStudentRequest,
    ) -> Result<Student, sqlx::Error> {
        sqlx::query_as::<_, Student>(
            r#"
            WITH inserted AS (
                INSERT INTO students (id, user_id, first_name, last_name, email, student_code,
                                      phone_number, date_of_birth, address, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
                RETURNING *
            )
            SELECT i.id, i.user_id, i.first_name, i.last_name, i.email, i.student_code,
                   i.phone_number, i.date_of_birth, i.address, i.created_at, u.username
            FROM inserted i JOIN users u ON i.user_id = u.id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(&req.student_code)
        .bind(&req.phone_number)
        .bind(req.date_of_birth)
        .bind(&req.address)
        .fetch_one(&self.pool)
        .await
    }

    /// update_student
    ///
    /// Updates the student profile and its login identity. The username always
    /// follows the request; the password hash is replaced only when supplied.
    async fn update_student(
        &self,
        id: Uuid,
        req: &UpdateStudentRequest,
        password_hash: Option<String>,
    ) -> Option<Student> {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"UPDATE students
               SET first_name = $2, last_name = $3, email = $4, student_code = $5,
                   phone_number = $6, date_of_birth = $7, address = $8
               WHERE id = $1
               RETURNING user_id"#,
        )
        .bind(id)
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(&req.student_code)
        .bind(&req.phone_number)
        .bind(req.date_of_birth)
        .bind(&req.address)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update_student error: {:?}", e);
            None
        })?;

        let credentials_updated = sqlx::query(
            "UPDATE users SET username = $2, password_hash = COALESCE($3, password_hash) WHERE id = $1",
        )
        .bind(user_id)
        .bind(&req.username)
        .bind(password_hash)
        .execute(&self.pool)
        .await;

        if let Err(e) = credentials_updated {
            tracing::error!("update_student credentials error: {:?}", e);
            return None;
        }

        self.get_student(id).await
    }

    /// delete_student
    ///
    /// Deletes the owning user row; the profile row follows via ON DELETE CASCADE.
    async fn delete_student(&self, id: Uuid) -> bool {
        match sqlx::query(
            "DELETE FROM users WHERE id = (SELECT user_id FROM students WHERE id = $1)",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete_student error: {:?}", e);
                false
            }
        }
    }

    async fn student_email_exists(&self, email: &str, exclude: Option<Uuid>) -> bool {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(email)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .unwrap_or(false)
    }

    async fn student_code_exists(&self, code: &str, exclude: Option<Uuid>) -> bool {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE student_code = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(code)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .unwrap_or(false)
    }

    // --- TEACHERS ---

    /// get_teachers
    ///
    /// Full listing with the login username joined in. Admin-only at the route level.
    async fn get_teachers(&self) -> Vec<Teacher> {
        let sql = format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers t JOIN users u ON t.user_id = u.id ORDER BY t.created_at DESC"
        );
        match sqlx::query_as::<_, Teacher>(&sql).fetch_all(&self.pool).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("get_teachers error: {:?}", e);
                vec![]
            }
        }
    }

    async fn get_teacher(&self, id: Uuid) -> Option<Teacher> {
        let sql = format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers t JOIN users u ON t.user_id = u.id WHERE t.id = $1"
        );
        sqlx::query_as::<_, Teacher>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_teacher error: {:?}", e);
                None
            })
    }

    async fn get_teacher_by_user(&self, user_id: Uuid) -> Option<Teacher> {
        let sql = format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers t JOIN users u ON t.user_id = u.id WHERE t.user_id = $1"
        );
        sqlx::query_as::<_, Teacher>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_teacher_by_user error: {:?}", e);
                None
            })
    }

    /// create_teacher
    ///
    /// Inserts the teacher profile referencing an already-created user row.
    async fn create_teacher(
        &self,
        user_id: Uuid,
        req: &CreateTeacherRequest,
    ) -> Result<Teacher, sqlx::Error> {
        sqlx::query_as::<_, Teacher>(
            r#"
            WITH inserted AS (
                INSERT INTO teachers (id, user_id, first_name, last_name, email, teacher_code,
                                      phone_number, date_of_birth, address, department,
                                      specialization, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())
                RETURNING *
            )
            SELECT i.id, i.user_id, i.first_name, i.last_name, i.email, i.teacher_code,
                   i.phone_number, i.date_of_birth, i.address, i.department, i.specialization,
                   i.created_at, u.username
            FROM inserted i JOIN users u ON i.user_id = u.id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(&req.teacher_code)
        .bind(&req.phone_number)
        .bind(req.date_of_birth)
        .bind(&req.address)
        .bind(&req.department)
        .bind(&req.specialization)
        .fetch_one(&self.pool)
        .await
    }

    /// update_teacher
    ///
    /// Updates the teacher profile and its login identity; password semantics
    /// match update_student.
    async fn update_teacher(
        &self,
        id: Uuid,
        req: &UpdateTeacherRequest,
        password_hash: Option<String>,
    ) -> Option<Teacher> {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"UPDATE teachers
               SET first_name = $2, last_name = $3, email = $4, teacher_code = $5,
                   phone_number = $6, date_of_birth = $7, address = $8,
                   department = $9, specialization = $10
               WHERE id = $1
               RETURNING user_id"#,
        )
        .bind(id)
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(&req.teacher_code)
        .bind(&req.phone_number)
        .bind(req.date_of_birth)
        .bind(&req.address)
        .bind(&req.department)
        .bind(&req.specialization)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update_teacher error: {:?}", e);
            None
        })?;

        let credentials_updated = sqlx::query(
            "UPDATE users SET username = $2, password_hash = COALESCE($3, password_hash) WHERE id = $1",
        )
        .bind(user_id)
        .bind(&req.username)
        .bind(password_hash)
        .execute(&self.pool)
        .await;

        if let Err(e) = credentials_updated {
            tracing::error!("update_teacher credentials error: {:?}", e);
            return None;
        }

        self.get_teacher(id).await
    }

    /// delete_teacher
    ///
    /// Deletes the owning user row; the profile row follows via ON DELETE CASCADE.
    /// Courses taught by the teacher keep existing with `teacher_id` set NULL.
    async fn delete_teacher(&self, id: Uuid) -> bool {
        match sqlx::query(
            "DELETE FROM users WHERE id = (SELECT user_id FROM teachers WHERE id = $1)",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete_teacher error: {:?}", e);
                false
            }
        }
    }

    async fn teacher_email_exists(&self, email: &str, exclude: Option<Uuid>) -> bool {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM teachers WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(email)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .unwrap_or(false)
    }

    async fn teacher_code_exists(&self, code: &str, exclude: Option<Uuid>) -> bool {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM teachers WHERE teacher_code = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(code)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .unwrap_or(false)
    }

    // --- COURSES ---

    /// get_courses
    ///
    /// Lists all courses with the assigned teacher's display name (LEFT JOIN:
    /// unassigned courses are included with a null teacher).
    async fn get_courses(&self) -> Vec<Course> {
        let sql = format!(
            "SELECT {COURSE_COLUMNS} FROM courses c LEFT JOIN teachers t ON c.teacher_id = t.id ORDER BY c.created_at DESC"
        );
        match sqlx::query_as::<_, Course>(&sql).fetch_all(&self.pool).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("get_courses error: {:?}", e);
                vec![]
            }
        }
    }

    async fn get_course(&self, id: Uuid) -> Option<Course> {
        let sql = format!(
            "SELECT {COURSE_COLUMNS} FROM courses c LEFT JOIN teachers t ON c.teacher_id = t.id WHERE c.id = $1"
        );
        sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_course error: {:?}", e);
                None
            })
    }

    /// create_course
    ///
    /// Inserts a new course. The unique index on `code` enforces course-code
    /// uniqueness at the storage level.
    async fn create_course(&self, req: &CreateCourseRequest) -> Result<Course, sqlx::Error> {
        sqlx::query_as::<_, Course>(
            r#"
            WITH inserted AS (
                INSERT INTO courses (id, name, code, description, credits, teacher_id, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, NOW())
                RETURNING *
            )
            SELECT i.id, i.name, i.code, i.description, i.credits, i.teacher_id,
                   CASE WHEN t.id IS NULL THEN NULL ELSE t.first_name || ' ' || t.last_name END AS teacher_name,
                   i.created_at
            FROM inserted i LEFT JOIN teachers t ON i.teacher_id = t.id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(&req.code)
        .bind(&req.description)
        .bind(req.credits)
        .bind(req.teacher_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_course(&self, id: Uuid, req: &UpdateCourseRequest) -> Option<Course> {
        let updated = sqlx::query(
            r#"UPDATE courses
               SET name = $2, code = $3, description = $4, credits = $5, teacher_id = $6
               WHERE id = $1"#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.code)
        .bind(&req.description)
        .bind(req.credits)
        .bind(req.teacher_id)
        .execute(&self.pool)
        .await;

        match updated {
            Ok(res) if res.rows_affected() > 0 => self.get_course(id).await,
            Ok(_) => None,
            Err(e) => {
                tracing::error!("update_course error: {:?}", e);
                None
            }
        }
    }

    async fn delete_course(&self, id: Uuid) -> bool {
        match sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete_course error: {:?}", e);
                false
            }
        }
    }

    async fn course_code_exists(&self, code: &str, exclude: Option<Uuid>) -> bool {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM courses WHERE code = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(code)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .unwrap_or(false)
    }

    async fn assign_teacher(&self, course_id: Uuid, teacher_id: Uuid) -> bool {
        match sqlx::query("UPDATE courses SET teacher_id = $2 WHERE id = $1")
            .bind(course_id)
            .bind(teacher_id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("assign_teacher error: {:?}", e);
                false
            }
        }
    }

    // --- ENROLLMENTS ---

    /// enroll_student
    ///
    /// Inserts an enrollment. Uses `ON CONFLICT DO NOTHING` to ensure **idempotency**
    /// against the unique (student_id, course_id) pair; the function returns true
    /// only if a new row was inserted (`rows_affected > 0`).
    async fn enroll_student(&self, student_id: Uuid, course_id: Uuid) -> bool {
        let result = sqlx::query(
            r#"INSERT INTO enrollments (id, student_id, course_id, enrolled_at)
               VALUES ($1, $2, $3, NOW()) ON CONFLICT DO NOTHING"#,
        )
        .bind(Uuid::new_v4())
        .bind(student_id)
        .bind(course_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                // A duplicate enrollment does not error; only database errors land here.
                tracing::error!("enroll_student error: {:?}", e);
                false
            }
        }
    }

    /// get_enrollments
    ///
    /// Lists enrollments with display names joined in, optionally filtered to a
    /// single course. Implements the filter using QueryBuilder for safe
    /// parameterization.
    async fn get_enrollments(&self, course_id: Option<Uuid>) -> Vec<Enrollment> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(format!(
            r#"SELECT {ENROLLMENT_COLUMNS}
               FROM enrollments e
               JOIN students s ON e.student_id = s.id
               JOIN courses c ON e.course_id = c.id
               LEFT JOIN teachers t ON c.teacher_id = t.id
               WHERE 1 = 1 "#
        ));

        if let Some(id) = course_id {
            builder.push(" AND e.course_id = ");
            builder.push_bind(id);
        }

        builder.push(" ORDER BY e.enrolled_at DESC");

        match builder
            .build_query_as::<Enrollment>()
            .fetch_all(&self.pool)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("get_enrollments error: {:?}", e);
                vec![]
            }
        }
    }

    /// get_student_enrollments
    ///
    /// The student's own course list, including the assigned teacher per course.
    async fn get_student_enrollments(&self, student_id: Uuid) -> Vec<Enrollment> {
        let sql = format!(
            r#"SELECT {ENROLLMENT_COLUMNS}
               FROM enrollments e
               JOIN students s ON e.student_id = s.id
               JOIN courses c ON e.course_id = c.id
               LEFT JOIN teachers t ON c.teacher_id = t.id
               WHERE e.student_id = $1
               ORDER BY e.enrolled_at DESC"#
        );
        match sqlx::query_as::<_, Enrollment>(&sql)
            .bind(student_id)
            .fetch_all(&self.pool)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("get_student_enrollments error: {:?}", e);
                vec![]
            }
        }
    }

    /// get_teacher_courses
    ///
    /// The teacher's own course list with per-course enrollment counts
    /// (LEFT JOIN + COUNT so empty courses report zero).
    async fn get_teacher_courses(&self, teacher_id: Uuid) -> Vec<TeacherCourse> {
        match sqlx::query_as::<_, TeacherCourse>(
            r#"SELECT c.id, c.name, c.code, c.description, c.credits, c.created_at,
                      COUNT(e.id) AS enrolled_students
               FROM courses c
               LEFT JOIN enrollments e ON e.course_id = c.id
               WHERE c.teacher_id = $1
               GROUP BY c.id, c.name, c.code, c.description, c.credits, c.created_at
               ORDER BY c.created_at DESC"#,
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await
        {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("get_teacher_courses error: {:?}", e);
                vec![]
            }
        }
    }

    async fn remove_enrollment(&self, id: Uuid) -> bool {
        match sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("remove_enrollment error: {:?}", e);
                false
            }
        }
    }

    // --- DASHBOARD ---

    /// get_stats
    ///
    /// Compiles all necessary counters for the administrative dashboard in a single call.
    async fn get_stats(&self) -> AdminDashboardStats {
        let total_students = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await
            .unwrap_or(0);
        let total_teachers = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers")
            .fetch_one(&self.pool)
            .await
            .unwrap_or(0);
        let total_courses = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
            .fetch_one(&self.pool)
            .await
            .unwrap_or(0);
        let total_enrollments = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM enrollments")
            .fetch_one(&self.pool)
            .await
            .unwrap_or(0);
        AdminDashboardStats {
            total_students,
            total_teachers,
            total_courses,
            total_enrollments,
        }
    }
}
