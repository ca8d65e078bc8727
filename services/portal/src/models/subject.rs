//! Subjects the question bank is organised by

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    error::{ApiError, ApiResult},
    validation::{optional_text, required_text},
};

/// Subject entity
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Subject {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectPayload {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewSubject {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

impl TryFrom<SubjectPayload> for NewSubject {
    type Error = ApiError;

    fn try_from(payload: SubjectPayload) -> ApiResult<Self> {
        let code = required_text(payload.code, "code")?.to_uppercase();
        let name = required_text(payload.name, "name")?;

        Ok(Self {
            code,
            name,
            description: optional_text(payload.description),
        })
    }
}
