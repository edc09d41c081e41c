use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use crate::errors::{Result, ValidationError};
use crate::plan::generator::{apply_progress_update, generate_plan};
use crate::plan::plan_model::Plan;
use crate::plan::plan_traits::{PlanRepositoryTrait, PlanServiceTrait};
use crate::reconciliation::Snapshot;

/// Plan lifecycle service: generation stays pure, persistence goes through
/// the injected repository.
pub struct PlanService<T: PlanRepositoryTrait> {
    plan_repo: Arc<T>,
}

impl<T: PlanRepositoryTrait> PlanService<T> {
    pub fn new(plan_repo: Arc<T>) -> Self {
        PlanService { plan_repo }
    }
}

#[async_trait]
impl<T: PlanRepositoryTrait> PlanServiceTrait for PlanService<T> {
    async fn active_plan(&self, user_id: &str) -> Result<Option<Plan>> {
        self.plan_repo.load_active_plan(user_id).await
    }

    async fn generate_and_persist(&self, user_id: &str, snapshot: &Snapshot) -> Result<Plan> {
        let plan = generate_plan(snapshot)?;
        let superseded = self.plan_repo.supersede_active_plans(user_id).await?;
        if superseded > 0 {
            info!("superseded {superseded} active plan(s) for user {user_id}");
        }
        self.plan_repo.insert_plan(user_id, plan).await
    }

    /// Discards the current plan and derives a fresh one. Distinct from
    /// progress updates, which never regenerate.
    async fn regenerate(&self, user_id: &str, snapshot: &Snapshot) -> Result<Plan> {
        self.generate_and_persist(user_id, snapshot).await
    }

    async fn record_progress(
        &self,
        user_id: &str,
        milestone_id: &str,
        new_current: f64,
    ) -> Result<Plan> {
        let plan = self
            .plan_repo
            .load_active_plan(user_id)
            .await?
            .ok_or_else(|| {
                ValidationError::InvalidInput(format!("No active plan for user '{user_id}'"))
            })?;
        let updated = apply_progress_update(plan, milestone_id, new_current)?;
        self.plan_repo.update_plan(user_id, updated).await
    }
}
