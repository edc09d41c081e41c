use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::{Result, ValidationError};
use crate::plan::plan_model::Plan;
use crate::plan::plan_traits::PlanRepositoryTrait;

/// In-memory plan store. Reference implementation of the repository seam for
/// tests and embedders without persistent storage; the write lock makes the
/// supersede-then-insert sequence atomic within one process.
#[derive(Default)]
pub struct MemoryPlanRepository {
    plans: RwLock<HashMap<String, Vec<Plan>>>,
}

impl MemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total plans stored for a user, active or not.
    pub async fn plan_count(&self, user_id: &str) -> usize {
        self.plans
            .read()
            .await
            .get(user_id)
            .map_or(0, |plans| plans.len())
    }
}

#[async_trait]
impl PlanRepositoryTrait for MemoryPlanRepository {
    async fn load_active_plan(&self, user_id: &str) -> Result<Option<Plan>> {
        let plans = self.plans.read().await;
        Ok(plans
            .get(user_id)
            .and_then(|plans| plans.iter().find(|p| p.is_active).cloned()))
    }

    async fn insert_plan(&self, user_id: &str, plan: Plan) -> Result<Plan> {
        let mut plans = self.plans.write().await;
        plans
            .entry(user_id.to_string())
            .or_default()
            .push(plan.clone());
        Ok(plan)
    }

    async fn update_plan(&self, user_id: &str, plan: Plan) -> Result<Plan> {
        let mut plans = self.plans.write().await;
        let user_plans = plans.get_mut(user_id).ok_or_else(|| {
            ValidationError::InvalidInput(format!("No plans stored for user '{user_id}'"))
        })?;
        let slot = user_plans.iter_mut().find(|p| p.id == plan.id).ok_or_else(|| {
            ValidationError::InvalidInput(format!("Plan '{}' not found", plan.id))
        })?;
        *slot = plan.clone();
        Ok(plan)
    }

    async fn supersede_active_plans(&self, user_id: &str) -> Result<usize> {
        let mut plans = self.plans.write().await;
        let mut superseded = 0;
        if let Some(user_plans) = plans.get_mut(user_id) {
            for plan in user_plans.iter_mut().filter(|p| p.is_active) {
                plan.is_active = false;
                superseded += 1;
            }
        }
        Ok(superseded)
    }
}
