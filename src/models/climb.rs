use chrono::NaiveDateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::utils::dates::parse_record_datetime;

pub const UNKNOWN_GRADE: &str = "Unknown";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClimbRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub date: Option<String>,
}

impl ClimbRecord {
    pub fn new(grade: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: None,
            grade: grade.into(),
            date: Some(date.into()),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Wall-clock time of the climb in `tz`, or `None` when the stored date
    /// is missing or unparseable.
    pub fn local_datetime(&self, tz: Tz) -> Option<NaiveDateTime> {
        parse_record_datetime(&self.date, tz)
    }

    pub fn grade_key(&self) -> &str {
        if self.grade.is_empty() {
            UNKNOWN_GRADE
        } else {
            self.grade.as_str()
        }
    }
}
