pub mod classifier;
pub mod resolver;
pub mod snapshot_model;
pub mod sources_model;

pub use classifier::{DebtClassifier, KeywordDebtClassifier};
pub use resolver::{reconcile, reconcile_with_classifier, DEFAULT_GOAL_TARGET};
pub use snapshot_model::{
    DataSource, DebtRecord, DebtSource, FactSource, GoalRecord, GoalSource, MonetaryFact, Snapshot,
};
pub use sources_model::{
    ConsolidatedDebtRow, ConsolidatedRecords, ExternalLoanRecord, OnboardingBlob,
    OnboardingDebtEntry, OnboardingExpenseRow, RawSources, StoredGoalRow,
};
