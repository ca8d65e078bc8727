//! Application state shared across handlers

use sqlx::SqlitePool;

use crate::{
    jwt::TokenService,
    rate_limiter::RateLimiter,
    repositories::{
        EventRepository, GradeRepository, QuestionRepository, ScheduleRepository,
        SubjectRepository, UserRepository,
    },
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub token_service: TokenService,
    /// Whether session cookies are marked `Secure`
    pub secure_cookies: bool,
    pub login_limiter: RateLimiter,
    pub user_repository: UserRepository,
    pub grade_repository: GradeRepository,
    pub schedule_repository: ScheduleRepository,
    pub event_repository: EventRepository,
    pub subject_repository: SubjectRepository,
    pub question_repository: QuestionRepository,
}

impl AppState {
    pub fn new(
        db_pool: SqlitePool,
        token_service: TokenService,
        secure_cookies: bool,
        login_limiter: RateLimiter,
    ) -> Self {
        Self {
            user_repository: UserRepository::new(db_pool.clone()),
            grade_repository: GradeRepository::new(db_pool.clone()),
            schedule_repository: ScheduleRepository::new(db_pool.clone()),
            event_repository: EventRepository::new(db_pool.clone()),
            subject_repository: SubjectRepository::new(db_pool.clone()),
            question_repository: QuestionRepository::new(db_pool.clone()),
            db_pool,
            token_service,
            secure_cookies,
            login_limiter,
        }
    }
}
