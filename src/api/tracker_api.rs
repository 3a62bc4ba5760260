// ==========================================
// 杯子钥匙扣运营看板 - 生产跟踪 API
// ==========================================
// 职责: 批次完成切换、计划切换、进度/缺口/日程查询
// 架构: API 层 → Engine 层 (tracker_reducer / batch_progress)
//                → Repository 层 (tracker_state_repo)
// 持久化: 每次变更后同步写入；写入失败只记 warn，不影响调用结果
// ==========================================

use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::error::{ApiError, ApiResult};
use crate::catalog::{find_batch_plan, plan};
use crate::domain::batch::ProductionPlan;
use crate::domain::progress::{
    ComponentNeeds, DistributionShare, PrinterDaySchedule, ProgressStats, VariantRemainingNeeds,
};
use crate::domain::types::PlanId;
use crate::engine::batch_progress::{
    component_needs, compute_progress, daily_schedule, distribution_shares, remaining_needs,
};
use crate::engine::tracker_reducer::{reduce, TrackerEvent, TrackerState};
use crate::repository::tracker_state_repo::TrackerStateRepository;

// ==========================================
// TrackerApi - 生产跟踪 API
// ==========================================
pub struct TrackerApi {
    state: Mutex<TrackerState>,
    repo: Option<Arc<TrackerStateRepository>>,
    default_plan: PlanId,
}

impl TrackerApi {
    /// 创建并从仓储恢复上次的状态
    ///
    /// 恢复失败时记录 warn 并从空状态开始
    pub fn new(repo: Arc<TrackerStateRepository>, default_plan: PlanId) -> Self {
        Self::try_new(repo.clone(), default_plan).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "生产跟踪状态恢复失败，使用空状态");
            Self {
                state: Mutex::new(TrackerState::new(default_plan)),
                repo: Some(repo),
                default_plan,
            }
        })
    }

    /// 创建并从仓储恢复上次的状态，恢复失败时返回错误
    pub fn try_new(repo: Arc<TrackerStateRepository>, default_plan: PlanId) -> ApiResult<Self> {
        let snapshot = repo.load()?;
        tracing::info!(
            selected_plan = ?snapshot.selected_plan,
            completed_batches = snapshot.completed.len(),
            "生产跟踪状态已恢复"
        );

        Ok(Self {
            state: Mutex::new(TrackerState {
                selected_plan: snapshot.selected_plan.unwrap_or(default_plan),
                completed: snapshot.completed,
            }),
            repo: Some(repo),
            default_plan,
        })
    }

    /// 不持久化的实例
    pub fn in_memory(default_plan: PlanId) -> Self {
        Self {
            state: Mutex::new(TrackerState::new(default_plan)),
            repo: None,
            default_plan,
        }
    }

    fn lock(&self) -> ApiResult<MutexGuard<'_, TrackerState>> {
        self.state
            .lock()
            .map_err(|e| ApiError::InternalError(format!("锁获取失败: {}", e)))
    }

    /// 应用事件、持久化并返回新进度
    fn dispatch(&self, event: TrackerEvent) -> ApiResult<ProgressStats> {
        let mut guard = self.lock()?;
        let current = std::mem::take(&mut *guard);
        *guard = reduce(current, event);
        self.persist(&guard);
        Ok(compute_progress(plan(guard.selected_plan), &guard.completed))
    }

    fn persist(&self, state: &TrackerState) {
        let Some(repo) = &self.repo else {
            return;
        };
        if let Err(e) = repo.save(state) {
            tracing::warn!(error = %e, "生产跟踪状态保存失败");
        }
    }

    fn active_plan(&self) -> ApiResult<&'static ProductionPlan> {
        Ok(plan(self.lock()?.selected_plan))
    }

    // ==========================================
    // 状态变更
    // ==========================================

    /// 切换批次完成状态
    ///
    /// # 返回
    /// - Err(ApiError::NotFound): 批次 ID 不属于任何计划
    pub fn toggle_batch(&self, batch_id: &str) -> ApiResult<ProgressStats> {
        let owner = find_batch_plan(batch_id)
            .ok_or_else(|| ApiError::NotFound(format!("批次(id={})不存在", batch_id)))?;

        let stats = self.dispatch(TrackerEvent::Toggle(batch_id.to_string()))?;
        tracing::info!(
            batch_id,
            plan = %owner,
            total_completed = stats.total_completed,
            "批次状态已切换"
        );
        Ok(stats)
    }

    /// 切换生产计划（"72h" / "1week"）
    pub fn select_plan(&self, plan_id: &str) -> ApiResult<ProgressStats> {
        let plan_id = plan_id.parse::<PlanId>().map_err(ApiError::InvalidInput)?;
        self.select_plan_id(plan_id)
    }

    pub fn select_plan_id(&self, plan_id: PlanId) -> ApiResult<ProgressStats> {
        tracing::info!(plan = %plan_id, "切换生产计划");
        self.dispatch(TrackerEvent::SelectPlan(plan_id))
    }

    /// 清空完成标记并回到默认计划
    pub fn reset(&self) -> ApiResult<ProgressStats> {
        let mut guard = self.lock()?;
        let current = std::mem::take(&mut *guard);
        *guard = reduce(
            current,
            TrackerEvent::Reset {
                default_plan: self.default_plan,
            },
        );

        if let Some(repo) = &self.repo {
            if let Err(e) = repo.clear() {
                tracing::warn!(error = %e, "生产跟踪状态清除失败");
            }
        }
        tracing::info!(plan = %guard.selected_plan, "生产跟踪已重置");
        Ok(compute_progress(plan(guard.selected_plan), &guard.completed))
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn state(&self) -> ApiResult<TrackerState> {
        Ok(self.lock()?.clone())
    }

    pub fn selected_plan(&self) -> ApiResult<PlanId> {
        Ok(self.lock()?.selected_plan)
    }

    pub fn is_batch_complete(&self, batch_id: &str) -> ApiResult<bool> {
        Ok(self.lock()?.is_complete(batch_id))
    }

    pub fn progress(&self) -> ApiResult<ProgressStats> {
        let state = self.lock()?;
        Ok(compute_progress(plan(state.selected_plan), &state.completed))
    }

    /// 未完成杯型的零件缺口
    pub fn remaining_needs(&self) -> ApiResult<Vec<VariantRemainingNeeds>> {
        Ok(remaining_needs(&self.progress()?))
    }

    pub fn component_needs(&self) -> ApiResult<ComponentNeeds> {
        Ok(component_needs(self.active_plan()?))
    }

    pub fn distribution_shares(&self) -> ApiResult<Vec<DistributionShare>> {
        Ok(distribution_shares(self.active_plan()?))
    }

    /// 当前计划的天数列表
    pub fn plan_days(&self) -> ApiResult<Vec<u32>> {
        Ok(self.active_plan()?.days())
    }

    /// 某一天的排程
    ///
    /// # 返回
    /// - Err(ApiError::InvalidInput): 当前计划不包含该天
    pub fn daily_schedule(&self, day: u32) -> ApiResult<Vec<PrinterDaySchedule>> {
        let state = self.lock()?;
        let active = plan(state.selected_plan);
        if !active.days().contains(&day) {
            return Err(ApiError::InvalidInput(format!(
                "计划 {} 不包含第 {} 天",
                active.id, day
            )));
        }
        Ok(daily_schedule(active, day, &state.completed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_unknown_batch_not_found() {
        let api = TrackerApi::in_memory(PlanId::Hours72);
        assert!(matches!(api.toggle_batch("p9_d9_b9"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_select_unknown_plan_invalid() {
        let api = TrackerApi::in_memory(PlanId::Hours72);
        assert!(matches!(api.select_plan("2weeks"), Err(ApiError::InvalidInput(_))));
        assert_eq!(api.selected_plan().unwrap(), PlanId::Hours72);
    }

    #[test]
    fn test_toggle_and_reset() {
        let api = TrackerApi::in_memory(PlanId::Hours72);
        api.toggle_batch("p2_d1_b1").unwrap();
        assert!(api.is_batch_complete("p2_d1_b1").unwrap());

        let stats = api.select_plan("1week").unwrap();
        assert_eq!(stats.plan, PlanId::OneWeek);
        assert!(api.is_batch_complete("p2_d1_b1").unwrap());

        let stats = api.reset().unwrap();
        assert_eq!(stats.plan, PlanId::Hours72);
        assert_eq!(stats.total_completed, 0);
        assert!(!api.is_batch_complete("p2_d1_b1").unwrap());
    }

    #[test]
    fn test_daily_schedule_rejects_day_outside_plan() {
        let api = TrackerApi::in_memory(PlanId::Hours72);
        assert_eq!(api.plan_days().unwrap(), vec![1, 2, 3]);
        assert_eq!(api.daily_schedule(1).unwrap().len(), 4);
        assert!(matches!(api.daily_schedule(5), Err(ApiError::InvalidInput(_))));
    }
}
