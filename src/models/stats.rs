use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimeScale {
    Week,
    Month,
    Year,
}

impl TimeScale {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeScale::Week => "week",
            TimeScale::Month => "month",
            TimeScale::Year => "year",
        }
    }

    /// Expands a bucket label into the heading shown above the detail view.
    pub fn full_label(&self, label: &str) -> String {
        let expanded = match self {
            TimeScale::Week => match label {
                "Sun" => Some("Sunday"),
                "Mon" => Some("Monday"),
                "Tue" => Some("Tuesday"),
                "Wed" => Some("Wednesday"),
                "Thu" => Some("Thursday"),
                "Fri" => Some("Friday"),
                "Sat" => Some("Saturday"),
                _ => None,
            },
            TimeScale::Month => match label {
                "Jan" => Some("January"),
                "Feb" => Some("February"),
                "Mar" => Some("March"),
                "Apr" => Some("April"),
                "May" => Some("May"),
                "Jun" => Some("June"),
                "Jul" => Some("July"),
                "Aug" => Some("August"),
                "Sep" => Some("September"),
                "Oct" => Some("October"),
                "Nov" => Some("November"),
                "Dec" => Some("December"),
                _ => None,
            },
            TimeScale::Year => None,
        };

        expanded.map(str::to_string).unwrap_or_else(|| label.to_string())
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        TimeScale::Week
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeScale {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(TimeScale::Week),
            "month" => Ok(TimeScale::Month),
            "year" => Ok(TimeScale::Year),
            other => Err(AppError::validation(format!("unknown time scale: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub label: String,
    pub count: u32,
}

impl Bucket {
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            count: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GradeGroup {
    pub grade: String,
    pub count: u32,
    pub color: String,
    pub display_label: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LabelPoint {
    pub x: f64,
    pub y: f64,
}

impl LabelPoint {
    pub fn distance_to(&self, other: &LabelPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PieLabels {
    pub outer: Vec<LabelPoint>,
    pub inner: Vec<LabelPoint>,
    pub percentages: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetailedStats {
    pub scale: TimeScale,
    pub label: String,
    pub title: String,
    pub total_climbs: usize,
    pub groups: Vec<GradeGroup>,
    pub columns: Vec<Vec<GradeGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<PieLabels>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_climbs: usize,
    pub last_climbed: Option<NaiveDate>,
}
