// ==========================================
// 杯子钥匙扣运营看板 - 生产进度统计结果
// ==========================================
// 职责: 批次完成情况推导出的可组装杯数、零件余量
// ==========================================

use crate::domain::batch::Batch;
use crate::domain::types::{ComponentKind, PlanId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// VariantProgress - 单个杯型的进度
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantProgress {
    pub key: String,
    pub name: String,
    /// 计划产量
    pub total: u32,
    /// 可组装杯数 = min(五种零件完成数)，不超过计划产量
    pub completed: u32,
    pub bottles_completed: u32,
    pub lids_completed: u32,
    pub buttons_completed: u32,
    pub rings_completed: u32,
    pub handles_completed: u32,
}

impl VariantProgress {
    pub fn completed_for(&self, kind: ComponentKind) -> u32 {
        match kind {
            ComponentKind::Bottle => self.bottles_completed,
            ComponentKind::Lid => self.lids_completed,
            ComponentKind::Button => self.buttons_completed,
            ComponentKind::Ring => self.rings_completed,
            ComponentKind::Handle => self.handles_completed,
        }
    }

    pub(crate) fn add_completed(&mut self, kind: ComponentKind, count: u32) {
        let slot = match kind {
            ComponentKind::Bottle => &mut self.bottles_completed,
            ComponentKind::Lid => &mut self.lids_completed,
            ComponentKind::Button => &mut self.buttons_completed,
            ComponentKind::Ring => &mut self.rings_completed,
            ComponentKind::Handle => &mut self.handles_completed,
        };
        *slot = slot.saturating_add(count);
    }

    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.completed)
    }
}

// ==========================================
// ProgressStats - 计划整体进度
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub plan: PlanId,
    pub total_cups: u32,
    pub total_completed: u32,
    pub total_remaining: u32,
    /// 批次零件名 → 已完成数量
    pub components_completed: BTreeMap<String, u32>,
    /// 批次零件名 → 未完成数量
    pub components_remaining: BTreeMap<String, u32>,
    /// 按杯型目录顺序
    pub variants: Vec<VariantProgress>,
}

impl ProgressStats {
    /// 完成百分比（0-100）
    pub fn percent_complete(&self) -> f64 {
        if self.total_cups == 0 {
            return 0.0;
        }
        self.total_completed as f64 / self.total_cups as f64 * 100.0
    }

    pub fn variant(&self, key: &str) -> Option<&VariantProgress> {
        self.variants.iter().find(|v| v.key == key)
    }
}

/// 单个零件的缺口
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentShortfall {
    pub kind: ComponentKind,
    pub component: String,
    pub needed: u32,
}

/// 杯型剩余杯数对应的零件缺口
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRemainingNeeds {
    pub key: String,
    pub name: String,
    pub completed: u32,
    pub total: u32,
    pub remaining_units: u32,
    pub shortfalls: Vec<ComponentShortfall>,
}

/// 计划内零件总需求：零件种类 → 零件名 → 数量
pub type ComponentNeeds = BTreeMap<ComponentKind, BTreeMap<String, u32>>;

/// 杯型产量占比
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionShare {
    pub key: String,
    pub name: String,
    pub cups: u32,
    /// 保留 1 位小数
    pub percentage: f64,
}

// ==========================================
// 日程视图
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchView {
    pub batch: Batch,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterDaySchedule {
    pub printer_key: String,
    pub printer_name: String,
    pub batches: Vec<BatchView>,
}
