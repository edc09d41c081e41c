pub mod calculator;
pub mod metrics_model;

pub use calculator::{derive_metrics, ratio_or_zero};
pub use metrics_model::SnapshotMetrics;
