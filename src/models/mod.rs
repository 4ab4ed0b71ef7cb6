pub mod climb;
pub mod settings;
pub mod stats;
