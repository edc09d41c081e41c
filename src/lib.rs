//! Financial data consolidation and plan projection engine.
//!
//! The engine takes a user's financial facts from several inconsistent,
//! partially-overlapping providers, reconciles them into one canonical
//! [`Snapshot`](reconciliation::Snapshot), derives health metrics from it,
//! and produces a structured [`Plan`](plan::Plan) (milestones, budget split,
//! debt payoff schedule, wealth projection) via closed-form formulas.
//!
//! Reconciliation and projection are pure, synchronous functions over plain
//! data; only the plan lifecycle (persist, regenerate, progress updates)
//! crosses an async repository seam.

pub mod aggregation;
pub mod errors;
pub mod metrics;
pub mod plan;
pub mod reconciliation;

pub use errors::{Error, Result};
pub use metrics::{derive_metrics, SnapshotMetrics};
pub use plan::{apply_progress_update, generate_plan, Plan, PlanService};
pub use reconciliation::{reconcile, RawSources, Snapshot};
