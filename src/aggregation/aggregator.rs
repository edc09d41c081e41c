use crate::aggregation::aggregation_model::{AggregateTotals, Frequency, RawMoneyRecord};

/// Mean weeks per month. Calendar months do not contain an integer number of
/// weeks, so 4.33 (and 2.17 for biweekly) are used system-wide; totals are
/// pegged to these exact constants.
pub const WEEKS_PER_MONTH: f64 = 4.33;
pub const BIWEEKS_PER_MONTH: f64 = 2.17;

const FALLBACK_CATEGORY: &str = "Other";

/// Converts a periodic amount to its monthly equivalent.
pub fn normalize_to_monthly(amount: f64, frequency: Frequency) -> f64 {
    match frequency {
        Frequency::Weekly => amount * WEEKS_PER_MONTH,
        Frequency::Biweekly => amount * BIWEEKS_PER_MONTH,
        Frequency::Yearly => amount / 12.0,
        Frequency::Monthly => amount,
    }
}

/// Aggregates raw records into a monthly total and a per-category breakdown.
///
/// Inactive records are excluded entirely (not zeroed). Records without a
/// category fall under "Other". When `normalize_frequency` is set, each
/// amount is converted to its monthly equivalent first; income providers set
/// this, expense providers report monthly figures already.
pub fn aggregate_records(records: &[RawMoneyRecord], normalize_frequency: bool) -> AggregateTotals {
    let mut totals = AggregateTotals::default();

    for record in records.iter().filter(|r| r.is_active) {
        let amount = if normalize_frequency {
            normalize_to_monthly(record.amount, record.frequency.unwrap_or_default())
        } else {
            record.amount
        };

        totals.total += amount;
        let category = record
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(FALLBACK_CATEGORY);
        *totals.by_category.entry(category.to_string()).or_insert(0.0) += amount;
    }

    totals
}
