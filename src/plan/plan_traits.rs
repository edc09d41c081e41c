use async_trait::async_trait;

use crate::errors::Result;
use crate::plan::plan_model::Plan;
use crate::reconciliation::Snapshot;

/// Persistence seam for generated plans. Implementations must make the
/// supersede-then-insert sequence atomic so that at most one active plan
/// exists per user; the service relies on that invariant.
#[async_trait]
pub trait PlanRepositoryTrait: Send + Sync {
    async fn load_active_plan(&self, user_id: &str) -> Result<Option<Plan>>;
    async fn insert_plan(&self, user_id: &str, plan: Plan) -> Result<Plan>;
    async fn update_plan(&self, user_id: &str, plan: Plan) -> Result<Plan>;
    /// Marks every active plan for the user inactive; returns how many were.
    async fn supersede_active_plans(&self, user_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait PlanServiceTrait: Send + Sync {
    async fn active_plan(&self, user_id: &str) -> Result<Option<Plan>>;
    async fn generate_and_persist(&self, user_id: &str, snapshot: &Snapshot) -> Result<Plan>;
    async fn regenerate(&self, user_id: &str, snapshot: &Snapshot) -> Result<Plan>;
    async fn record_progress(
        &self,
        user_id: &str,
        milestone_id: &str,
        new_current: f64,
    ) -> Result<Plan>;
}
