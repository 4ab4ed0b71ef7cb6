use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::climb::ClimbRecord;
use crate::models::settings::GradePalette;
use crate::models::stats::GradeGroup;
use crate::services::color_service::ColorGenerator;

/// Grade → colour assignments remembered across classifier calls.
///
/// Entries are only ever added; a grade keeps its first colour for the life
/// of the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCache {
    entries: HashMap<String, String>,
}

impl ColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, grade: &str) -> Option<&str> {
        self.entries.get(grade).map(String::as_str)
    }

    /// Stores `color` for `grade` unless the grade already has one, and
    /// returns the colour now on record.
    pub fn remember(&mut self, grade: &str, color: String) -> &str {
        self.entries.entry(grade.to_string()).or_insert(color).as_str()
    }

    pub fn colors(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Groups climbs by grade, most climbed first, and gives each grade a colour.
///
/// Ties keep the order in which the grades were first seen.
pub fn classify(
    records: &[ClimbRecord],
    palette: &GradePalette,
    cache: &mut ColorCache,
    generator: &mut dyn ColorGenerator,
) -> Vec<GradeGroup> {
    let mut counts: Vec<(String, u32)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let grade = record.grade_key();
        match positions.get(grade) {
            Some(index) => counts[*index].1 += 1,
            None => {
                positions.insert(grade, counts.len());
                counts.push((grade.to_string(), 1));
            }
        }
    }

    counts.sort_by(|left, right| right.1.cmp(&left.1));

    let groups: Vec<GradeGroup> = counts
        .into_iter()
        .map(|(grade, count)| {
            let color = color_for_grade(&grade, palette, cache, generator);
            GradeGroup {
                display_label: display_label(&grade),
                grade,
                count,
                color,
            }
        })
        .collect();

    debug!(
        target: "app::stats",
        records = records.len(),
        grades = groups.len(),
        cached_colors = cache.len(),
        "classified climbs by grade"
    );
    groups
}

pub fn color_for_grade(
    grade: &str,
    palette: &GradePalette,
    cache: &mut ColorCache,
    generator: &mut dyn ColorGenerator,
) -> String {
    if palette.chromatic_active && palette.contains(grade) {
        return grade.to_string();
    }

    if let Some(color) = cache.get(grade) {
        return color.to_string();
    }

    let forbidden: HashSet<String> = palette
        .colors()
        .map(str::to_string)
        .chain(cache.colors().map(str::to_lowercase))
        .collect();
    let color = generator.next_color(grade, &forbidden);
    debug!(target: "app::colors", %grade, %color, "assigned new grade color");
    cache.remember(grade, color).to_string()
}

/// Colour grades render as swatches, so they carry no text label.
pub fn display_label(grade: &str) -> String {
    if grade.starts_with('#') {
        String::new()
    } else {
        grade.to_string()
    }
}

/// Splits the legend into `columns` contiguous slices of `ceil(n / columns)`
/// groups each. Trailing columns can be empty.
pub fn partition_columns(groups: &[GradeGroup], columns: usize) -> Vec<Vec<GradeGroup>> {
    if columns == 0 {
        return Vec::new();
    }

    let per_column = groups.len().div_ceil(columns);
    (0..columns)
        .map(|column| {
            let start = (column * per_column).min(groups.len());
            let end = ((column + 1) * per_column).min(groups.len());
            groups[start..end].to_vec()
        })
        .collect()
}
