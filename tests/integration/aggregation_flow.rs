use chrono::NaiveDate;
use climblog_stats::models::climb::ClimbRecord;
use climblog_stats::models::settings::{
    ChromaticGrade, GradePalette, GradingSettings, GradingSystem, StatsConfig,
};
use climblog_stats::models::stats::TimeScale;
use climblog_stats::services::climb_query::{distinct_days, filter_by_grade_and_day};
use climblog_stats::services::settings_service::{SettingsService, SettingsUpdateInput};
use climblog_stats::services::stats_service::StatsService;

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).expect("reference date")
}

fn seeded_config() -> StatsConfig {
    let mut config = StatsConfig::default();
    config.colors.seed = Some(2024);
    config
}

fn hueco_log() -> Vec<ClimbRecord> {
    vec![
        ClimbRecord::new("V4", "2024-03-11T17:30:00.000Z").with_id("c1"),
        ClimbRecord::new("V4", "2024-03-11T18:10:00.000Z").with_id("c2"),
        ClimbRecord::new("V5", "2024-03-11T18:40:00.000Z").with_id("c3"),
        ClimbRecord::new("V2", "2024-03-13T09:00:00.000Z").with_id("c4"),
        ClimbRecord::new("V6", "2024-01-20T09:00:00.000Z").with_id("c5"),
        ClimbRecord::new("V6", "2023-07-04T09:00:00.000Z").with_id("c6"),
        ClimbRecord {
            id: Some("c7".into()),
            grade: "V1".into(),
            date: Some("sometime last spring".into()),
        },
    ]
}

#[test]
fn bar_to_pie_flow_for_selected_weekday() {
    let records = hueco_log();
    let mut service = StatsService::new(seeded_config(), GradePalette::default()).expect("service");

    let week = service.bar_chart(&records, TimeScale::Week, reference());
    let monday = week.iter().find(|bucket| bucket.label == "Mon").expect("monday");
    assert_eq!(monday.count, 3);

    let detail = service.detailed_stats(&records, TimeScale::Week, "Mon", reference());
    assert_eq!(detail.title, "Monday");
    assert_eq!(detail.total_climbs, monday.count as usize);

    let grades: Vec<(&str, u32)> = detail
        .groups
        .iter()
        .map(|group| (group.grade.as_str(), group.count))
        .collect();
    assert_eq!(grades, vec![("V4", 2), ("V5", 1)]);
    assert!(detail.groups.iter().all(|group| group.display_label == group.grade));

    let labels = detail.labels.as_ref().expect("pie labels");
    assert_eq!(labels.outer.len(), 2);
    assert_eq!(labels.inner.len(), 2);
    let share: f64 = labels.percentages.iter().sum();
    assert!((share - 100.0).abs() < 1e-9);

    assert_eq!(detail.columns.len(), 4);
    assert_eq!(detail.columns[0].len(), 1);
    assert_eq!(detail.columns[0][0].grade, "V4");
}

#[test]
fn grade_colors_stay_stable_across_snapshots() {
    let mut records = hueco_log();
    let mut service = StatsService::new(seeded_config(), GradePalette::default()).expect("service");

    let first = service.detailed_stats(&records, TimeScale::Year, "2024", reference());
    let v4_color = first
        .groups
        .iter()
        .find(|group| group.grade == "V4")
        .map(|group| group.color.clone())
        .expect("V4 group");

    records.push(ClimbRecord::new("V4", "2024-03-12T08:00:00Z"));
    records.push(ClimbRecord::new("V9", "2024-03-12T08:00:00Z"));
    let second = service.detailed_stats(&records, TimeScale::Year, "2024", reference());

    let v4 = second
        .groups
        .iter()
        .find(|group| group.grade == "V4")
        .expect("V4 group");
    assert_eq!(v4.color, v4_color);
    assert_eq!(v4.count, 3);

    let colors: Vec<&str> = second.groups.iter().map(|group| group.color.as_str()).collect();
    let mut unique = colors.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), colors.len());
}

#[test]
fn chromatic_grades_render_as_swatches() {
    let settings = SettingsService::new(GradingSettings {
        grading_system: GradingSystem::Chromatic,
        chromatic_grades: vec![
            ChromaticGrade {
                color: "#E11D48".into(),
            },
            ChromaticGrade {
                color: "#2563eb".into(),
            },
        ],
    })
    .expect("settings");

    let records = vec![
        ClimbRecord::new("#E11D48", "2024-03-14T10:00:00Z"),
        ClimbRecord::new("#e11d48", "2024-03-14T11:00:00Z"),
        ClimbRecord::new("#2563eb", "2024-03-14T12:00:00Z"),
        ClimbRecord::new("#000000", "2024-03-14T13:00:00Z"),
    ];

    let mut service =
        StatsService::new(seeded_config(), settings.palette().expect("palette")).expect("service");
    let detail = service.detailed_stats(&records, TimeScale::Week, "Thu", reference());

    assert_eq!(detail.groups.len(), 4);
    for group in &detail.groups {
        assert_eq!(group.display_label, "");
    }

    let custom = detail
        .groups
        .iter()
        .find(|group| group.grade == "#e11d48")
        .expect("lower-case grade");
    assert_eq!(custom.color, "#e11d48");

    let unknown = detail
        .groups
        .iter()
        .find(|group| group.grade == "#000000")
        .expect("off-palette grade");
    assert_ne!(unknown.color, "#000000");
    assert_ne!(unknown.color.to_lowercase(), "#e11d48");
    assert_ne!(unknown.color.to_lowercase(), "#2563eb");

    settings
        .update(SettingsUpdateInput {
            grading_system: Some(GradingSystem::Hueco),
            chromatic_colors: None,
        })
        .expect("switch to hueco");
    service.set_palette(settings.palette().expect("palette"));

    let detail = service.detailed_stats(&records, TimeScale::Week, "Thu", reference());
    let blue = detail
        .groups
        .iter()
        .find(|group| group.grade == "#2563eb")
        .expect("blue grade");
    assert_ne!(blue.color.to_lowercase(), "#2563eb");
}

#[test]
fn timezone_moves_late_climbs_to_the_next_day() {
    let records = vec![ClimbRecord::new("V3", "2024-03-11T22:30:00Z")];

    let utc = StatsService::new(seeded_config(), GradePalette::default()).expect("utc service");
    let week = utc.bar_chart(&records, TimeScale::Week, reference());
    assert_eq!(week[1].count, 1);

    let mut config = seeded_config();
    config.timezone = "Asia/Tokyo".into();
    let tokyo = StatsService::new(config, GradePalette::default()).expect("tokyo service");
    let week = tokyo.bar_chart(&records, TimeScale::Week, reference());
    assert_eq!(week[1].count, 0);
    assert_eq!(week[2].count, 1);
}

#[test]
fn overall_stats_and_record_browser() {
    let records = hueco_log();
    let service = StatsService::new(seeded_config(), GradePalette::default()).expect("service");

    let overall = service.overall_stats(&records);
    assert_eq!(overall.total_climbs, 7);
    assert_eq!(
        overall.last_climbed,
        NaiveDate::from_ymd_opt(2024, 3, 13)
    );

    let tz = service.timezone();
    let days = distinct_days(&records, tz);
    assert_eq!(days.len(), 4);
    assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 3, 13).expect("day"));

    let monday = NaiveDate::from_ymd_opt(2024, 3, 11);
    let on_monday = filter_by_grade_and_day(&records, Some("V4"), monday, tz);
    let ids: Vec<&str> = on_monday
        .iter()
        .filter_map(|record| record.id.as_deref())
        .collect();
    assert_eq!(ids, vec!["c1", "c2"]);
}

#[test]
fn detailed_stats_serialize_in_camel_case() {
    let records = hueco_log();
    let mut service = StatsService::new(seeded_config(), GradePalette::default()).expect("service");
    let detail = service.detailed_stats(&records, TimeScale::Month, "Mar", reference());

    let json = serde_json::to_value(&detail).expect("serialize");
    assert_eq!(json["scale"], "month");
    assert_eq!(json["title"], "March");
    assert_eq!(json["totalClimbs"], 4);
    assert!(json["groups"][0]["displayLabel"].is_string());
}
