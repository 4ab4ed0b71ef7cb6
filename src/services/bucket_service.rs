use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use tracing::debug;

use crate::models::climb::ClimbRecord;
use crate::models::stats::{Bucket, TimeScale};
use crate::utils::dates::{day_label, month_label, DAY_LABELS};

const MONTHS_IN_WINDOW: usize = 12;

/// Sunday 00:00:00.000 through Saturday 23:59:59.999 of one calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekSpan {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl WeekSpan {
    pub fn containing(reference: NaiveDate) -> Self {
        let offset = i64::from(reference.weekday().num_days_from_sunday());
        let sunday = reference - Duration::days(offset);
        let start = sunday.and_time(NaiveTime::MIN);
        let end = (sunday + Duration::days(7)).and_time(NaiveTime::MIN) - Duration::milliseconds(1);
        Self { start, end }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthKey {
    pub month0: u32,
    pub year: i32,
}

impl MonthKey {
    pub fn of(at: NaiveDateTime) -> Self {
        Self {
            month0: at.month0(),
            year: at.year(),
        }
    }

    pub fn label(&self) -> &'static str {
        month_label(self.month0)
    }
}

/// The twelve (month, year) keys ending at the reference month, oldest first.
pub fn trailing_months(reference: NaiveDate) -> Vec<MonthKey> {
    let mut month0 = reference.month0() as i32;
    let mut year = reference.year();
    let mut keys = Vec::with_capacity(MONTHS_IN_WINDOW);

    for _ in 0..MONTHS_IN_WINDOW {
        keys.push(MonthKey {
            month0: month0 as u32,
            year,
        });
        month0 -= 1;
        if month0 < 0 {
            month0 = 11;
            year -= 1;
        }
    }

    keys.reverse();
    keys
}

/// Counts climbs per bucket for the bar chart. Climbs without a usable date
/// are left out.
pub fn bucketize(
    records: &[ClimbRecord],
    scale: TimeScale,
    reference: NaiveDate,
    tz: Tz,
) -> Vec<Bucket> {
    let dated = local_datetimes(records, tz);

    let buckets = match scale {
        TimeScale::Week => week_buckets(&dated, reference),
        TimeScale::Month => month_buckets(&dated, reference),
        TimeScale::Year => year_buckets(&dated),
    };

    debug!(
        target: "app::stats",
        scale = %scale,
        records = records.len(),
        buckets = buckets.len(),
        "bucketized climbs"
    );
    buckets
}

pub(crate) fn local_datetimes(records: &[ClimbRecord], tz: Tz) -> Vec<NaiveDateTime> {
    let parsed: Vec<NaiveDateTime> = records
        .iter()
        .filter_map(|record| record.local_datetime(tz))
        .collect();

    let skipped = records.len() - parsed.len();
    if skipped > 0 {
        debug!(target: "app::stats", skipped, "skipping climbs without a parseable date");
    }
    parsed
}

fn week_buckets(dated: &[NaiveDateTime], reference: NaiveDate) -> Vec<Bucket> {
    let span = WeekSpan::containing(reference);
    let mut buckets: Vec<Bucket> = DAY_LABELS.iter().map(|label| Bucket::empty(*label)).collect();

    for at in dated.iter().filter(|at| span.contains(**at)) {
        let index = at.weekday().num_days_from_sunday() as usize;
        buckets[index].count += 1;
    }

    buckets
}

fn month_buckets(dated: &[NaiveDateTime], reference: NaiveDate) -> Vec<Bucket> {
    let keys = trailing_months(reference);
    let positions: HashMap<MonthKey, usize> = keys
        .iter()
        .enumerate()
        .map(|(index, key)| (*key, index))
        .collect();
    let mut buckets: Vec<Bucket> = keys.iter().map(|key| Bucket::empty(key.label())).collect();

    for at in dated {
        if let Some(index) = positions.get(&MonthKey::of(*at)) {
            buckets[*index].count += 1;
        }
    }

    buckets
}

fn year_buckets(dated: &[NaiveDateTime]) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut positions: HashMap<i32, usize> = HashMap::new();

    for at in dated {
        let index = *positions.entry(at.year()).or_insert_with(|| {
            buckets.push(Bucket::empty(at.year().to_string()));
            buckets.len() - 1
        });
        buckets[index].count += 1;
    }

    buckets
}

/// Day-of-week label for a local timestamp, matching the week buckets.
pub fn weekday_label(at: NaiveDateTime) -> &'static str {
    day_label(at.weekday().num_days_from_sunday())
}
