//! Repositories for database operations
//!
//! Every mutation of account-owned rows carries the owner in its `WHERE`
//! clause, so a row belonging to someone else behaves exactly like a
//! missing one.

pub mod event;
pub mod grade;
pub mod question;
pub mod schedule;
pub mod subject;
pub mod user;

pub use event::EventRepository;
pub use grade::GradeRepository;
pub use question::QuestionRepository;
pub use schedule::ScheduleRepository;
pub use subject::SubjectRepository;
pub use user::UserRepository;
