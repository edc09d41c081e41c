pub mod aggregation_model;
pub mod aggregator;

pub use aggregation_model::{AggregateTotals, Frequency, RawMoneyRecord};
pub use aggregator::{aggregate_records, normalize_to_monthly};
