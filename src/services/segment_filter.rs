use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use tracing::debug;

use crate::models::climb::ClimbRecord;
use crate::models::stats::TimeScale;
use crate::services::bucket_service::{weekday_label, WeekSpan};
use crate::utils::dates::month_label;

/// Returns the climbs behind one bar of the chart.
///
/// Week and Year use the same boundaries as [`bucketize`]. Month matches the
/// month name in any year, which is wider than the (month, year) key the
/// month buckets are counted with.
///
/// [`bucketize`]: crate::services::bucket_service::bucketize
pub fn filter_by_bucket(
    records: &[ClimbRecord],
    scale: TimeScale,
    label: &str,
    reference: NaiveDate,
    tz: Tz,
) -> Vec<ClimbRecord> {
    let span = WeekSpan::containing(reference);

    let filtered: Vec<ClimbRecord> = records
        .iter()
        .filter(|record| {
            let Some(at) = record.local_datetime(tz) else {
                return false;
            };
            match scale {
                TimeScale::Week => span.contains(at) && weekday_label(at) == label,
                TimeScale::Month => month_label(at.month0()) == label,
                TimeScale::Year => at.year().to_string() == label,
            }
        })
        .cloned()
        .collect();

    debug!(
        target: "app::stats",
        scale = %scale,
        %label,
        matched = filtered.len(),
        "filtered climbs for bucket"
    );
    filtered
}
