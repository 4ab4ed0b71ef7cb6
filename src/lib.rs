pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{AppError, AppResult};
pub use models::climb::ClimbRecord;
pub use models::stats::{Bucket, DetailedStats, GradeGroup, LabelPoint, OverallStats, TimeScale};
pub use services::bucket_service::bucketize;
pub use services::grade_classifier::{classify, partition_columns, ColorCache};
pub use services::pie_layout::layout_labels;
pub use services::segment_filter::filter_by_bucket;
pub use services::stats_service::StatsService;
