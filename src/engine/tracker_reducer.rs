// ==========================================
// 杯子钥匙扣运营看板 - 生产跟踪状态机
// ==========================================
// 职责: TrackerState + TrackerEvent → 新 TrackerState
// 说明: 批次状态 Incomplete ⇄ Complete；批次 ID 跨计划唯一,
//       切换计划不清空完成标记
// ==========================================

use crate::domain::types::PlanId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerState {
    pub selected_plan: PlanId,
    /// 已完成批次 ID
    pub completed: BTreeSet<String>,
}

impl TrackerState {
    pub fn new(selected_plan: PlanId) -> Self {
        Self {
            selected_plan,
            completed: BTreeSet::new(),
        }
    }

    pub fn is_complete(&self, batch_id: &str) -> bool {
        self.completed.contains(batch_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerEvent {
    /// 切换批次完成状态
    Toggle(String),
    SelectPlan(PlanId),
    /// 清空完成标记并回到默认计划
    Reset { default_plan: PlanId },
}

pub fn reduce(mut state: TrackerState, event: TrackerEvent) -> TrackerState {
    match event {
        TrackerEvent::Toggle(batch_id) => {
            if !state.completed.remove(&batch_id) {
                state.completed.insert(batch_id);
            }
        }
        TrackerEvent::SelectPlan(plan) => {
            state.selected_plan = plan;
        }
        TrackerEvent::Reset { default_plan } => {
            state = TrackerState::new(default_plan);
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_reversible() {
        let state = reduce(TrackerState::default(), TrackerEvent::Toggle("p1_d1_b1".into()));
        assert!(state.is_complete("p1_d1_b1"));
        let state = reduce(state, TrackerEvent::Toggle("p1_d1_b1".into()));
        assert!(!state.is_complete("p1_d1_b1"));
        assert_eq!(state, TrackerState::default());
    }

    #[test]
    fn test_select_plan_keeps_flags() {
        let state = reduce(TrackerState::default(), TrackerEvent::Toggle("p1_d1_b1".into()));
        let state = reduce(state, TrackerEvent::SelectPlan(PlanId::OneWeek));
        assert_eq!(state.selected_plan, PlanId::OneWeek);
        assert!(state.is_complete("p1_d1_b1"));
    }

    #[test]
    fn test_reset_clears_and_restores_default_plan() {
        let state = TrackerState::new(PlanId::OneWeek);
        let state = reduce(state, TrackerEvent::Toggle("p2_d1_b1_week".into()));
        let state = reduce(
            state,
            TrackerEvent::Reset {
                default_plan: PlanId::Hours72,
            },
        );
        assert_eq!(state, TrackerState::new(PlanId::Hours72));
    }
}
