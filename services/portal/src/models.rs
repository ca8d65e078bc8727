//! API models for rows, request payloads and response bodies

pub mod calendar;
pub mod event;
pub mod grade;
pub mod question;
pub mod schedule;
pub mod subject;
pub mod user;

pub use calendar::{CalendarDay, CalendarItem, CalendarItemKind, CalendarQuery};
pub use event::{Event, EventPayload, EventQuery, NewEvent};
pub use grade::{Grade, GradePayload, GradeQuery, GradeSummary, NewGrade, ScoreType};
pub use question::{
    Answer, AnswerPayload, AnswerResult, NewQuestion, OptionPayload, QuestionDetail,
    QuestionOption, QuestionPayload, QuestionQuery, QuestionSummary,
};
pub use schedule::{CourseType, NewSchedule, ScheduleEntry, SchedulePayload, ScheduleQuery};
pub use subject::{NewSubject, Subject, SubjectPayload};
pub use user::{
    ChangePasswordRequest, LoginRequest, NewUser, SignupRequest, UpdateUser, UpdateUserRequest,
    User, UserResponse,
};

/// Serialize clock times as `HH:MM`
pub(crate) mod clock {
    use chrono::NaiveTime;
    use serde::Serializer;

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(time) => super::serialize(time, serializer),
                None => serializer.serialize_none(),
            }
        }
    }
}
