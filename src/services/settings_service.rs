use std::collections::HashSet;
use std::path::Path;
use std::sync::{RwLock, RwLockWriteGuard};

use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::settings::{
    ChromaticGrade, GradeOption, GradePalette, GradingSettings, GradingSystem, StatsConfig,
};
use crate::services::color_service::is_hex_color;
use crate::services::grade_classifier::display_label;
use crate::services::grading_catalog::grades_for;
use crate::utils::dates::parse_timezone;

#[derive(Debug, Default, Clone)]
pub struct SettingsUpdateInput {
    pub grading_system: Option<GradingSystem>,
    pub chromatic_colors: Option<Vec<String>>,
}

/// Holds the active grading system and the user's chromatic palette.
pub struct SettingsService {
    cache: RwLock<GradingSettings>,
}

impl SettingsService {
    pub fn new(initial: GradingSettings) -> AppResult<Self> {
        let colors: Vec<String> = initial
            .chromatic_grades
            .iter()
            .map(|grade| grade.color.clone())
            .collect();
        let chromatic_grades = validate_chromatic_colors(&colors)?;

        Ok(Self {
            cache: RwLock::new(GradingSettings {
                grading_system: initial.grading_system,
                chromatic_grades,
            }),
        })
    }

    pub fn get(&self) -> AppResult<GradingSettings> {
        self.cache
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| AppError::other("settings lock poisoned"))
    }

    pub fn update(&self, input: SettingsUpdateInput) -> AppResult<GradingSettings> {
        let chromatic_grades = input
            .chromatic_colors
            .as_deref()
            .map(validate_chromatic_colors)
            .transpose()?;

        let mut guard = self.write_guard()?;
        if let Some(grades) = chromatic_grades {
            guard.chromatic_grades = grades;
        }
        if let Some(system) = input.grading_system {
            guard.grading_system = system;
        }

        info!(
            target: "app::settings",
            grading_system = guard.grading_system.as_str(),
            chromatic_colors = guard.chromatic_grades.len(),
            "grading settings updated"
        );
        Ok(guard.clone())
    }

    /// Flips between Hueco and Fontainebleau; any other system goes back to Hueco.
    pub fn toggle_grading_system(&self) -> AppResult<GradingSettings> {
        let mut guard = self.write_guard()?;
        guard.grading_system = match guard.grading_system {
            GradingSystem::Hueco => GradingSystem::Fontainebleau,
            _ => GradingSystem::Hueco,
        };

        info!(
            target: "app::settings",
            grading_system = guard.grading_system.as_str(),
            "grading system toggled"
        );
        Ok(guard.clone())
    }

    pub fn palette(&self) -> AppResult<GradePalette> {
        Ok(GradePalette::from_settings(&self.get()?))
    }

    /// Pick-list entries for the active grading system.
    pub fn grade_options(&self) -> AppResult<Vec<GradeOption>> {
        let settings = self.get()?;
        let values: Vec<String> = match settings.grading_system {
            GradingSystem::Chromatic => settings
                .chromatic_grades
                .into_iter()
                .map(|grade| grade.color)
                .collect(),
            system => grades_for(system),
        };

        Ok(values
            .into_iter()
            .map(|value| GradeOption {
                label: if is_hex_color(&value) {
                    String::new()
                } else {
                    display_label(&value)
                },
                value,
            })
            .collect())
    }

    fn write_guard(&self) -> AppResult<RwLockWriteGuard<'_, GradingSettings>> {
        self.cache
            .write()
            .map_err(|_| AppError::other("settings lock poisoned"))
    }
}

fn validate_chromatic_colors(colors: &[String]) -> AppResult<Vec<ChromaticGrade>> {
    let mut seen = HashSet::new();
    let mut grades = Vec::with_capacity(colors.len());

    for raw in colors {
        let color = raw.trim();
        if !is_hex_color(color) {
            return Err(AppError::invalid_color(color));
        }
        if !seen.insert(color.to_lowercase()) {
            return Err(AppError::validation(format!(
                "chromatic color {color} is listed more than once"
            )));
        }
        grades.push(ChromaticGrade {
            color: color.to_string(),
        });
    }

    Ok(grades)
}

/// Reads a `StatsConfig` from a `.yaml`, `.yml` or `.json` file.
pub fn load_config(path: &Path) -> AppResult<StatsConfig> {
    let raw = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);

    let config: StatsConfig = match extension.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&raw)?,
        Some("json") => serde_json::from_str(&raw)?,
        _ => {
            return Err(AppError::validation(format!(
                "unsupported config format: {}",
                path.display()
            )))
        }
    };

    validate_config(&config)?;
    debug!(
        target: "app::config",
        path = %path.display(),
        timezone = %config.timezone,
        "loaded stats config"
    );
    Ok(config)
}

pub fn validate_config(config: &StatsConfig) -> AppResult<()> {
    parse_timezone(&config.timezone)?;

    if config.legend_columns == 0 {
        return Err(AppError::validation("legendColumns must be at least 1"));
    }

    let chart = &config.chart;
    let dimensions = [
        chart.width,
        chart.height,
        chart.label_radius,
        chart.inner_label_radius,
    ];
    if dimensions
        .iter()
        .any(|value| !value.is_finite() || *value <= 0.0)
    {
        return Err(AppError::validation("chart dimensions must be positive"));
    }

    if chart.inner_label_radius > chart.label_radius {
        return Err(AppError::validation(
            "innerLabelRadius must not exceed labelRadius",
        ));
    }

    if config.colors.max_attempts == Some(0) {
        return Err(AppError::validation("colors.maxAttempts must be at least 1"));
    }

    Ok(())
}
