use std::fs;

use climblog_stats::error::AppError;
use climblog_stats::models::settings::{GradePalette, GradingSettings, GradingSystem, StatsConfig};
use climblog_stats::services::settings_service::{load_config, SettingsService, SettingsUpdateInput};
use climblog_stats::services::stats_service::StatsService;
use climblog_stats::utils::logger::init_logging;
use tempfile::tempdir;

#[test]
fn yaml_config_overrides_defaults() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("stats.yaml");
    fs::write(
        &path,
        r#"
timezone: America/Denver
legendColumns: 3
chart:
  width: 300
  height: 320
  labelRadius: 120
  innerLabelRadius: 90
colors:
  maxAttempts: 500
  seed: 7
"#,
    )
    .expect("write config");

    let config = load_config(&path).expect("load yaml config");
    assert_eq!(config.timezone, "America/Denver");
    assert_eq!(config.legend_columns, 3);
    assert_eq!(config.chart.width, 300.0);
    assert_eq!(config.chart.height, 320.0);
    assert_eq!(config.chart.label_radius, 120.0);
    assert_eq!(config.chart.inner_label_radius, 90.0);
    assert_eq!(config.colors.max_attempts, Some(500));
    assert_eq!(config.colors.seed, Some(7));

    let service = StatsService::new(config, GradePalette::default()).expect("service");
    assert_eq!(service.timezone().name(), "America/Denver");
}

#[test]
fn json_config_uses_defaults_for_missing_fields() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("stats.json");
    fs::write(&path, r#"{ "legendColumns": 2 }"#).expect("write config");

    let config = load_config(&path).expect("load json config");
    assert_eq!(config.legend_columns, 2);
    assert_eq!(config.timezone, "UTC");
    assert_eq!(config.chart, StatsConfig::default().chart);
    assert!(config.colors.max_attempts.is_none());
}

#[test]
fn config_errors_are_reported() {
    let dir = tempdir().expect("temp dir");

    let unsupported = dir.path().join("stats.toml");
    fs::write(&unsupported, "legendColumns = 2").expect("write config");
    assert!(matches!(
        load_config(&unsupported),
        Err(AppError::Validation { .. })
    ));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ legendColumns: ").expect("write config");
    assert!(matches!(
        load_config(&broken),
        Err(AppError::Serialization(_))
    ));

    let bad_zone = dir.path().join("zone.yml");
    fs::write(&bad_zone, "timezone: Moon/Tranquility\n").expect("write config");
    assert!(load_config(&bad_zone).expect_err("unknown zone").is_validation());

    let missing = dir.path().join("missing.yaml");
    assert!(matches!(load_config(&missing), Err(AppError::Io(_))));
}

#[test]
fn settings_updates_flow_into_palette() {
    let settings = SettingsService::new(GradingSettings::default()).expect("settings");
    assert!(!settings.palette().expect("palette").chromatic_active);

    let updated = settings
        .update(SettingsUpdateInput {
            grading_system: Some(GradingSystem::Chromatic),
            chromatic_colors: Some(vec![" #ff8800 ".into(), "#0af".into()]),
        })
        .expect("update");
    assert_eq!(updated.chromatic_grades.len(), 2);
    assert_eq!(updated.chromatic_grades[0].color, "#ff8800");

    let palette = settings.palette().expect("palette");
    assert!(palette.chromatic_active);
    assert!(palette.contains("#FF8800"));
    assert!(palette.contains("#0AF"));

    let options = settings.grade_options().expect("options");
    let values: Vec<&str> = options.iter().map(|option| option.value.as_str()).collect();
    assert_eq!(values, vec!["#ff8800", "#0af"]);

    let serialized = serde_json::to_value(settings.get().expect("settings")).expect("serialize");
    assert_eq!(serialized["gradingSystem"], "Chromatic");
    assert_eq!(serialized["chromaticGrades"][1]["color"], "#0af");
}

#[test]
fn grading_settings_deserialize_display_names() {
    let settings: GradingSettings = serde_json::from_str(
        r##"{
            "gradingSystem": "Yosemite Decimal System",
            "chromaticGrades": [{ "color": "#123" }]
        }"##,
    )
    .expect("deserialize");
    assert_eq!(settings.grading_system, GradingSystem::Yosemite);

    let service = SettingsService::new(settings).expect("service");
    let options = service.grade_options().expect("options");
    assert_eq!(options[0].label, "5.5");
    assert_eq!(options.last().map(|option| option.value.as_str()), Some("5.15d"));
}

#[test]
fn logging_initializes_once() {
    let dir = tempdir().expect("temp dir");
    let log_dir = dir.path().join("logs");

    init_logging(Some(&log_dir)).expect("first init");
    init_logging(Some(&log_dir)).expect("second init is a no-op");
    assert!(log_dir.is_dir());
}
