//! Day-by-day calendar built from weekly schedule slots and one-off events

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ApiResult},
    models::{Event, ScheduleEntry, clock},
    validation::{parse_date, required_text},
};

/// Longest range a single calendar request may cover, in days
pub const MAX_CALENDAR_DAYS: i64 = 62;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub semester: Option<String>,
}

impl CalendarQuery {
    /// Parse and bound the requested date range
    pub fn range(&self) -> ApiResult<(NaiveDate, NaiveDate)> {
        let from = parse_date(&required_text(self.from.clone(), "from")?, "from")?;
        let to = parse_date(&required_text(self.to.clone(), "to")?, "to")?;

        if from > to {
            return Err(ApiError::BadRequest(
                "`from` must not be after `to`".to_string(),
            ));
        }
        if (to - from).num_days() + 1 > MAX_CALENDAR_DAYS {
            return Err(ApiError::BadRequest(format!(
                "calendar range is limited to {} days",
                MAX_CALENDAR_DAYS
            )));
        }

        Ok((from, to))
    }

    /// Weekly slots are expanded for one semester at a time
    pub fn semester(&self) -> ApiResult<String> {
        required_text(self.semester.clone(), "semester")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarItemKind {
    Class,
    Event,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarItem {
    pub kind: CalendarItemKind,
    pub id: i64,
    pub title: String,
    #[serde(serialize_with = "clock::option::serialize")]
    pub start_time: Option<NaiveTime>,
    #[serde(serialize_with = "clock::option::serialize")]
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// 1 = Monday .. 7 = Sunday
    pub weekday: u32,
    pub items: Vec<CalendarItem>,
}

impl From<&ScheduleEntry> for CalendarItem {
    fn from(entry: &ScheduleEntry) -> Self {
        Self {
            kind: CalendarItemKind::Class,
            id: entry.id,
            title: entry.title.clone(),
            start_time: Some(entry.start_time),
            end_time: Some(entry.end_time),
            location: entry.location.clone(),
            course_type: Some(entry.course_type.clone()),
        }
    }
}

impl From<&Event> for CalendarItem {
    fn from(event: &Event) -> Self {
        Self {
            kind: CalendarItemKind::Event,
            id: event.id,
            title: event.title.clone(),
            start_time: event.start_time,
            end_time: event.end_time,
            location: event.location.clone(),
            course_type: None,
        }
    }
}

/// Expand weekly slots over `from..=to` and merge in events
///
/// Every date in the range gets an entry, even when empty. Items on a date
/// are ordered by start time, untimed items first.
pub fn build_calendar(
    from: NaiveDate,
    to: NaiveDate,
    schedules: &[ScheduleEntry],
    events: &[Event],
) -> Vec<CalendarDay> {
    from.iter_days()
        .take_while(|date| *date <= to)
        .map(|date| {
            let weekday = date.weekday().number_from_monday();

            let mut items: Vec<CalendarItem> = schedules
                .iter()
                .filter(|s| s.day_of_week == i64::from(weekday))
                .map(CalendarItem::from)
                .chain(
                    events
                        .iter()
                        .filter(|e| e.event_date == date)
                        .map(CalendarItem::from),
                )
                .collect();
            items.sort_by_key(|item| item.start_time);

            CalendarDay {
                date,
                weekday,
                items,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn slot(id: i64, day_of_week: i64, start: NaiveTime) -> ScheduleEntry {
        ScheduleEntry {
            id,
            account: "s1120345".to_string(),
            semester: "113-1".to_string(),
            title: format!("Class {id}"),
            day_of_week,
            start_time: start,
            end_time: time(23, 0),
            location: None,
            instructor: None,
            course_type: "lecture".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn event(id: i64, on: NaiveDate, start: Option<NaiveTime>) -> Event {
        Event {
            id,
            account: "s1120345".to_string(),
            title: format!("Event {id}"),
            event_date: on,
            start_time: start,
            end_time: None,
            location: None,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_weekly_slots_repeat_on_matching_weekdays() {
        // 2024-09-02 is a Monday
        let days = build_calendar(
            date(2024, 9, 2),
            date(2024, 9, 15),
            &[slot(1, 1, time(8, 10)), slot(2, 3, time(13, 10))],
            &[],
        );

        assert_eq!(days.len(), 14);
        assert_eq!(days[0].weekday, 1);
        let mondays: Vec<NaiveDate> = days
            .iter()
            .filter(|d| d.items.iter().any(|i| i.id == 1))
            .map(|d| d.date)
            .collect();
        assert_eq!(mondays, vec![date(2024, 9, 2), date(2024, 9, 9)]);
        assert!(days[1].items.is_empty());
        assert_eq!(days[2].items[0].kind, CalendarItemKind::Class);
    }

    #[test]
    fn test_items_are_ordered_with_untimed_first() {
        let monday = date(2024, 9, 2);
        let days = build_calendar(
            monday,
            monday,
            &[slot(1, 1, time(10, 0))],
            &[
                event(7, monday, Some(time(9, 0))),
                event(8, monday, None),
                event(9, date(2024, 9, 3), None),
            ],
        );

        let order: Vec<(CalendarItemKind, i64)> =
            days[0].items.iter().map(|i| (i.kind, i.id)).collect();
        assert_eq!(
            order,
            vec![
                (CalendarItemKind::Event, 8),
                (CalendarItemKind::Event, 7),
                (CalendarItemKind::Class, 1),
            ]
        );
    }

    #[test]
    fn test_range_bounds() {
        let query = |from: &str, to: &str| CalendarQuery {
            from: Some(from.to_string()),
            to: Some(to.to_string()),
            semester: None,
        };

        assert!(query("2024-09-01", "2024-09-30").range().is_ok());
        assert!(query("2024-09-30", "2024-09-01").range().is_err());
        assert!(query("2024-09-01", "2024-11-01").range().is_ok());
        assert!(query("2024-09-01", "2024-11-02").range().is_err());
        assert!(CalendarQuery::default().range().is_err());
    }

    #[test]
    fn test_semester_is_required() {
        let query = |semester: Option<&str>| CalendarQuery {
            from: Some("2024-11-04".to_string()),
            to: Some("2024-11-10".to_string()),
            semester: semester.map(str::to_string),
        };

        assert_eq!(query(Some(" 113-1 ")).semester().unwrap(), "113-1");
        for missing in [None, Some(""), Some("  ")] {
            match query(missing).semester() {
                Err(ApiError::BadRequest(msg)) => assert!(msg.contains("semester"), "{msg}"),
                other => panic!("expected bad request, got {other:?}"),
            }
        }
    }
}
