use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::debug;

use crate::error::AppResult;
use crate::models::climb::ClimbRecord;
use crate::models::settings::{GradePalette, StatsConfig};
use crate::models::stats::{Bucket, DetailedStats, OverallStats, TimeScale};
use crate::services::bucket_service::bucketize;
use crate::services::climb_query::overall_stats;
use crate::services::color_service::{ColorGenerator, RandomColorGenerator};
use crate::services::grade_classifier::{classify, partition_columns, ColorCache};
use crate::services::pie_layout::layout_pie;
use crate::services::segment_filter::filter_by_bucket;
use crate::services::settings_service::validate_config;
use crate::utils::dates::{parse_timezone, today_in};

/// Statistics for one observer of a climb stream.
///
/// Every call takes a fresh record snapshot. The only state carried between
/// calls is the grade colour cache, so colours stay put as data arrives.
pub struct StatsService {
    config: StatsConfig,
    tz: Tz,
    palette: GradePalette,
    cache: ColorCache,
    generator: Box<dyn ColorGenerator + Send>,
}

impl StatsService {
    pub fn new(config: StatsConfig, palette: GradePalette) -> AppResult<Self> {
        let generator = RandomColorGenerator::new(config.colors.seed, config.colors.max_attempts);
        Self::with_generator(config, palette, Box::new(generator))
    }

    pub fn with_generator(
        config: StatsConfig,
        palette: GradePalette,
        generator: Box<dyn ColorGenerator + Send>,
    ) -> AppResult<Self> {
        validate_config(&config)?;
        let tz = parse_timezone(&config.timezone)?;
        Ok(Self {
            config,
            tz,
            palette,
            cache: ColorCache::new(),
            generator,
        })
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn today(&self) -> NaiveDate {
        today_in(self.tz)
    }

    /// Swaps the palette after a settings change. Colours already handed out
    /// stay cached.
    pub fn set_palette(&mut self, palette: GradePalette) {
        debug!(
            target: "app::stats",
            chromatic = palette.chromatic_active,
            colors = palette.len(),
            "palette replaced"
        );
        self.palette = palette;
    }

    pub fn palette(&self) -> &GradePalette {
        &self.palette
    }

    pub fn color_cache(&self) -> &ColorCache {
        &self.cache
    }

    pub fn bar_chart(
        &self,
        records: &[ClimbRecord],
        scale: TimeScale,
        reference: NaiveDate,
    ) -> Vec<Bucket> {
        bucketize(records, scale, reference, self.tz)
    }

    pub fn bar_chart_today(&self, records: &[ClimbRecord], scale: TimeScale) -> Vec<Bucket> {
        self.bar_chart(records, scale, self.today())
    }

    /// Pie chart and legend for the bar the user selected.
    pub fn detailed_stats(
        &mut self,
        records: &[ClimbRecord],
        scale: TimeScale,
        label: &str,
        reference: NaiveDate,
    ) -> DetailedStats {
        let selected = filter_by_bucket(records, scale, label, reference, self.tz);
        let groups = classify(
            &selected,
            &self.palette,
            &mut self.cache,
            self.generator.as_mut(),
        );
        let columns = partition_columns(&groups, self.config.legend_columns);
        let values: Vec<f64> = groups.iter().map(|group| f64::from(group.count)).collect();
        let labels = layout_pie(&values, &self.config.chart);

        DetailedStats {
            scale,
            label: label.to_string(),
            title: scale.full_label(label),
            total_climbs: selected.len(),
            groups,
            columns,
            labels,
        }
    }

    pub fn overall_stats(&self, records: &[ClimbRecord]) -> OverallStats {
        overall_stats(records, self.tz)
    }
}
