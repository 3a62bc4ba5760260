// ==========================================
// 杯子钥匙扣运营看板 - 生产批次领域模型
// ==========================================
// 职责: 打印批次、打印机、生产计划、杯型物料清单
// 说明: 计划数据为静态配置，运行期只变更"已完成批次"集合
// ==========================================

use crate::domain::types::{ComponentKind, PlanId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Batch - 单次打印批次
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    /// 批次 ID（跨计划唯一）
    pub id: String,
    /// 第几天（从 1 开始）
    pub day: u32,
    /// 打印的零件名称（如 "White Handles"）
    pub item: String,
    /// 打印数量
    pub count: u32,
    /// 耗时（小时）
    pub time: f64,
    /// 当天开始小时，缺失表示 0 点开始
    #[serde(default)]
    pub start_hour: Option<f64>,
}

impl Batch {
    pub fn start_hour_or_zero(&self) -> f64 {
        self.start_hour.unwrap_or(0.0)
    }
}

/// 打印机及其批次队列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Printer {
    /// 打印机键（printer1..printer4）
    pub key: String,
    /// 展示名称
    pub name: String,
    pub batches: Vec<Batch>,
}

// ==========================================
// ProductionPlan - 生产计划
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionPlan {
    pub id: PlanId,
    pub total_hours: u32,
    pub total_cups: u32,
    /// 杯型键 → 计划产量
    pub distribution: BTreeMap<String, u32>,
    pub printers: Vec<Printer>,
}

impl ProductionPlan {
    /// 遍历全部批次（按打印机顺序）
    pub fn batches(&self) -> impl Iterator<Item = &Batch> {
        self.printers.iter().flat_map(|p| p.batches.iter())
    }

    pub fn find_batch(&self, batch_id: &str) -> Option<&Batch> {
        self.batches().find(|b| b.id == batch_id)
    }

    /// 计划涉及的天数（升序去重）
    pub fn days(&self) -> Vec<u32> {
        let mut days: Vec<u32> = self.batches().map(|b| b.day).collect();
        days.sort_unstable();
        days.dedup();
        days
    }

    pub fn planned_total(&self, variant_key: &str) -> u32 {
        self.distribution.get(variant_key).copied().unwrap_or(0)
    }
}

// ==========================================
// CupVariant - 杯型（跟踪用物料清单）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CupVariant {
    /// 杯型键（mint / white / ...）
    pub key: String,
    pub name: String,
    pub bottle: String,
    pub lid: String,
    pub button: String,
    pub ring: String,
    pub handle: String,
    pub sales_percentage: f64,
}

impl CupVariant {
    pub fn component(&self, kind: ComponentKind) -> &str {
        match kind {
            ComponentKind::Bottle => &self.bottle,
            ComponentKind::Lid => &self.lid,
            ComponentKind::Button => &self.button,
            ComponentKind::Ring => &self.ring,
            ComponentKind::Handle => &self.handle,
        }
    }

    /// 五种零件（固定顺序：瓶身、杯盖、按钮、圆环、提手）
    pub fn components(&self) -> [(ComponentKind, &str); 5] {
        ComponentKind::ALL.map(|kind| (kind, self.component(kind)))
    }
}

// ==========================================
// PieceSpec - Owala 杯身所需零件
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSpec {
    pub name: &'static str,
    pub kind: ComponentKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_deserialize_camel_case() {
        let batch: Batch = serde_json::from_str(
            r#"{"id":"p1_d1_b2","day":1,"item":"Mint Bottles","count":24,"time":13,"startHour":13}"#,
        )
        .unwrap();
        assert_eq!(batch.start_hour, Some(13.0));

        let batch: Batch = serde_json::from_str(
            r#"{"id":"p1_d1_b1","day":1,"item":"Mint Bottles","count":24,"time":13}"#,
        )
        .unwrap();
        assert_eq!(batch.start_hour_or_zero(), 0.0);
    }
}
