use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_LEGEND_COLUMNS: usize = 4;
pub const DEFAULT_CHART_SIZE: f64 = 450.0;
pub const DEFAULT_LABEL_RADIUS: f64 = 180.0;
pub const DEFAULT_INNER_LABEL_RADIUS: f64 = 150.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GradingSystem {
    #[serde(rename = "Hueco (USA)")]
    Hueco,
    Fontainebleau,
    #[serde(rename = "Yosemite Decimal System")]
    Yosemite,
    Chromatic,
}

impl GradingSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            GradingSystem::Hueco => "Hueco (USA)",
            GradingSystem::Fontainebleau => "Fontainebleau",
            GradingSystem::Yosemite => "Yosemite Decimal System",
            GradingSystem::Chromatic => "Chromatic",
        }
    }

    pub fn is_color_based(&self) -> bool {
        matches!(self, GradingSystem::Chromatic)
    }
}

impl Default for GradingSystem {
    fn default() -> Self {
        GradingSystem::Hueco
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChromaticGrade {
    pub color: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GradingSettings {
    #[serde(default)]
    pub grading_system: GradingSystem,
    #[serde(default)]
    pub chromatic_grades: Vec<ChromaticGrade>,
}

/// Lower-cases a colour and expands the `#rgb` shorthand to `#rrggbb`.
pub fn canonical_hex(color: &str) -> String {
    let lower = color.to_lowercase();
    match lower.strip_prefix('#') {
        Some(digits) if digits.len() == 3 && digits.chars().all(|c| c.is_ascii_hexdigit()) => {
            let mut expanded = String::with_capacity(7);
            expanded.push('#');
            for digit in digits.chars() {
                expanded.push(digit);
                expanded.push(digit);
            }
            expanded
        }
        _ => lower,
    }
}

/// The colours the classifier must respect: grades that are their own colour
/// when the chromatic system is active, and colours random picks must avoid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradePalette {
    pub chromatic_active: bool,
    colors: HashSet<String>,
}

impl GradePalette {
    pub fn new<I, S>(chromatic_active: bool, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            chromatic_active,
            colors: colors
                .into_iter()
                .map(|color| canonical_hex(color.as_ref()))
                .collect(),
        }
    }

    pub fn from_settings(settings: &GradingSettings) -> Self {
        Self::new(
            settings.grading_system.is_color_based(),
            settings.chromatic_grades.iter().map(|grade| &grade.color),
        )
    }

    pub fn contains(&self, color: &str) -> bool {
        self.colors.contains(&canonical_hex(color))
    }

    pub fn colors(&self) -> impl Iterator<Item = &str> {
        self.colors.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GradeOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(default = "default_chart_size")]
    pub width: f64,
    #[serde(default = "default_chart_size")]
    pub height: f64,
    #[serde(default = "default_label_radius")]
    pub label_radius: f64,
    #[serde(default = "default_inner_label_radius")]
    pub inner_label_radius: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHART_SIZE,
            height: DEFAULT_CHART_SIZE,
            label_radius: DEFAULT_LABEL_RADIUS,
            inner_label_radius: DEFAULT_INNER_LABEL_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ColorConfig {
    /// Cap on random redraws before falling back to a hashed colour.
    /// `None` keeps drawing until a free colour turns up.
    #[serde(default)]
    pub max_attempts: Option<u32>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsConfig {
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_legend_columns")]
    pub legend_columns: usize,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub colors: ColorConfig,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            legend_columns: DEFAULT_LEGEND_COLUMNS,
            chart: ChartConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_legend_columns() -> usize {
    DEFAULT_LEGEND_COLUMNS
}

fn default_chart_size() -> f64 {
    DEFAULT_CHART_SIZE
}

fn default_label_radius() -> f64 {
    DEFAULT_LABEL_RADIUS
}

fn default_inner_label_radius() -> f64 {
    DEFAULT_INNER_LABEL_RADIUS
}
