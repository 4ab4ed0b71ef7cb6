pub mod bucket_service;
pub mod climb_query;
pub mod color_service;
pub mod grade_classifier;
pub mod grading_catalog;
pub mod pie_layout;
pub mod segment_filter;
pub mod settings_service;
pub mod stats_service;
