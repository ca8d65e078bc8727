//! One-off calendar events

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    error::{ApiError, ApiResult},
    models::clock,
    validation::{optional_text, parse_date, parse_time, required_text},
};

/// Event entity
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub account: String,
    pub title: String,
    #[serde(rename = "date")]
    pub event_date: NaiveDate,
    #[serde(serialize_with = "clock::option::serialize")]
    pub start_time: Option<NaiveTime>,
    #[serde(serialize_with = "clock::option::serialize")]
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flat event payload as sent by clients
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    pub title: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Validated event fields
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub event_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<EventPayload> for NewEvent {
    type Error = ApiError;

    fn try_from(payload: EventPayload) -> ApiResult<Self> {
        let title = required_text(payload.title, "title")?;
        let date_raw = required_text(payload.date, "date")?;
        let event_date = parse_date(&date_raw, "date")?;

        let start_time = optional_text(payload.start_time)
            .map(|raw| parse_time(&raw, "start_time"))
            .transpose()?;
        let end_time = optional_text(payload.end_time)
            .map(|raw| parse_time(&raw, "end_time"))
            .transpose()?;

        match (start_time, end_time) {
            (None, Some(_)) => {
                return Err(ApiError::BadRequest(
                    "`end_time` requires a `start_time`".to_string(),
                ));
            }
            (Some(start), Some(end)) if start >= end => {
                return Err(ApiError::BadRequest(
                    "`start_time` must be before `end_time`".to_string(),
                ));
            }
            _ => {}
        }

        Ok(Self {
            title,
            event_date,
            start_time,
            end_time,
            location: optional_text(payload.location),
            description: optional_text(payload.description),
        })
    }
}

/// Query parameters for event listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}
