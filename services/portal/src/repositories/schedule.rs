//! Schedule repository for database operations

use chrono::Utc;
use common::error::DatabaseResult;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::{NewSchedule, ScheduleEntry};

const SCHEDULE_COLUMNS: &str = "id, account, semester, title, day_of_week, start_time, end_time, \
     location, instructor, course_type, created_at, updated_at";

/// Schedule repository
#[derive(Clone)]
pub struct ScheduleRepository {
    pool: SqlitePool,
}

impl ScheduleRepository {
    /// Create a new schedule repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List an account's weekly entries, optionally for one semester
    pub async fn list(
        &self,
        account: &str,
        semester: Option<&str>,
    ) -> DatabaseResult<Vec<ScheduleEntry>> {
        let entries = sqlx::query_as::<_, ScheduleEntry>(&format!(
            r#"
            SELECT {SCHEDULE_COLUMNS} FROM schedules
            WHERE account = ? AND (? IS NULL OR semester = ?)
            ORDER BY day_of_week, start_time, id
            "#
        ))
        .bind(account)
        .bind(semester)
        .bind(semester)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn create(
        &self,
        account: &str,
        entry: &NewSchedule,
    ) -> DatabaseResult<ScheduleEntry> {
        info!("Creating schedule entry '{}' for {}", entry.title, account);

        let now = Utc::now();
        let entry = sqlx::query_as::<_, ScheduleEntry>(&format!(
            r#"
            INSERT INTO schedules (account, semester, title, day_of_week, start_time, end_time,
                                   location, instructor, course_type, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {SCHEDULE_COLUMNS}
            "#
        ))
        .bind(account)
        .bind(&entry.semester)
        .bind(&entry.title)
        .bind(entry.day_of_week)
        .bind(entry.start_time)
        .bind(entry.end_time)
        .bind(&entry.location)
        .bind(&entry.instructor)
        .bind(&entry.course_type)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    pub async fn update(
        &self,
        id: i64,
        account: &str,
        entry: &NewSchedule,
    ) -> DatabaseResult<Option<ScheduleEntry>> {
        let entry = sqlx::query_as::<_, ScheduleEntry>(&format!(
            r#"
            UPDATE schedules
            SET semester = ?, title = ?, day_of_week = ?, start_time = ?, end_time = ?,
                location = ?, instructor = ?, course_type = ?, updated_at = ?
            WHERE id = ? AND account = ?
            RETURNING {SCHEDULE_COLUMNS}
            "#
        ))
        .bind(&entry.semester)
        .bind(&entry.title)
        .bind(entry.day_of_week)
        .bind(entry.start_time)
        .bind(entry.end_time)
        .bind(&entry.location)
        .bind(&entry.instructor)
        .bind(&entry.course_type)
        .bind(Utc::now())
        .bind(id)
        .bind(account)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    pub async fn delete(&self, id: i64, account: &str) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = ? AND account = ?")
            .bind(id)
            .bind(account)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::pool_with_accounts;
    use chrono::NaiveTime;

    fn entry(title: &str, day_of_week: i64, semester: &str) -> NewSchedule {
        NewSchedule {
            semester: semester.to_string(),
            title: title.to_string(),
            day_of_week,
            start_time: NaiveTime::from_hms_opt(9, 10, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            location: Some("EE-201".to_string()),
            instructor: None,
            course_type: "lecture".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_weekday_and_filters_semester() {
        let schedules = ScheduleRepository::new(pool_with_accounts(&["alice"]).await);
        schedules
            .create("alice", &entry("Physics", 3, "113-1"))
            .await
            .unwrap();
        schedules
            .create("alice", &entry("Calculus", 1, "113-1"))
            .await
            .unwrap();
        schedules
            .create("alice", &entry("Chemistry", 2, "113-2"))
            .await
            .unwrap();

        let all = schedules.list("alice", None).await.unwrap();
        let titles: Vec<_> = all.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Calculus", "Chemistry", "Physics"]);
        assert_eq!(all[0].start_time, NaiveTime::from_hms_opt(9, 10, 0).unwrap());

        let first = schedules.list("alice", Some("113-1")).await.unwrap();
        assert_eq!(first.len(), 2);
    }

    #[tokio::test]
    async fn test_foreign_rows_are_untouchable() {
        let schedules = ScheduleRepository::new(pool_with_accounts(&["alice", "bob"]).await);
        let created = schedules
            .create("alice", &entry("Physics", 3, "113-1"))
            .await
            .unwrap();

        assert!(!schedules.delete(created.id, "bob").await.unwrap());
        assert!(
            schedules
                .update(created.id, "bob", &entry("Hijacked", 1, "113-1"))
                .await
                .unwrap()
                .is_none()
        );
        assert!(schedules.list("bob", None).await.unwrap().is_empty());

        let kept = schedules.list("alice", None).await.unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "Physics");

        assert!(schedules.delete(created.id, "alice").await.unwrap());
    }
}
