use std::collections::BTreeSet;

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::models::climb::ClimbRecord;
use crate::models::stats::OverallStats;
use crate::services::bucket_service::local_datetimes;

pub fn overall_stats(records: &[ClimbRecord], tz: Tz) -> OverallStats {
    let last_climbed = local_datetimes(records, tz)
        .into_iter()
        .max()
        .map(|at| at.date());

    OverallStats {
        total_climbs: records.len(),
        last_climbed,
    }
}

/// Narrows the record browser to one grade and/or one local calendar day.
pub fn filter_by_grade_and_day(
    records: &[ClimbRecord],
    grade: Option<&str>,
    day: Option<NaiveDate>,
    tz: Tz,
) -> Vec<ClimbRecord> {
    records
        .iter()
        .filter(|record| grade.map_or(true, |grade| record.grade == grade))
        .filter(|record| {
            day.map_or(true, |day| {
                record
                    .local_datetime(tz)
                    .map(|at| at.date() == day)
                    .unwrap_or(false)
            })
        })
        .cloned()
        .collect()
}

/// Every day with at least one climb, newest first.
pub fn distinct_days(records: &[ClimbRecord], tz: Tz) -> Vec<NaiveDate> {
    let days: BTreeSet<NaiveDate> = local_datetimes(records, tz)
        .into_iter()
        .map(|at| at.date())
        .collect();
    days.into_iter().rev().collect()
}
