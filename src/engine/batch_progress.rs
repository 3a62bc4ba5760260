// ==========================================
// 杯子钥匙扣运营看板 - 生产进度计算引擎
// ==========================================
// 职责: 已完成批次 → 各杯型可组装数量 + 零件缺口
// 规则: 可组装杯数 = min(五种零件已完成数量)，不超过计划产量
// 说明: 每次切换批次/计划后全量重算
// ==========================================

use crate::catalog::{cup_variant, cup_variants};
use crate::domain::batch::ProductionPlan;
use crate::domain::progress::{
    BatchView, ComponentNeeds, ComponentShortfall, DistributionShare, PrinterDaySchedule,
    ProgressStats, VariantProgress, VariantRemainingNeeds,
};
use crate::domain::types::ComponentKind;
use crate::engine::component_matcher::matches_component;
use std::collections::{BTreeMap, BTreeSet};

/// 计算计划进度
///
/// # 参数
/// - `plan`: 当前生产计划
/// - `completed`: 已完成批次 ID 集合（可包含其他计划的批次，计算时忽略）
pub fn compute_progress(plan: &ProductionPlan, completed: &BTreeSet<String>) -> ProgressStats {
    let mut components_completed: BTreeMap<String, u32> = BTreeMap::new();
    let mut components_remaining: BTreeMap<String, u32> = BTreeMap::new();

    for batch in plan.batches() {
        let bucket = if completed.contains(&batch.id) {
            &mut components_completed
        } else {
            &mut components_remaining
        };
        *bucket.entry(batch.item.clone()).or_insert(0) += batch.count;
    }

    let mut variants = Vec::with_capacity(cup_variants().len());
    for variant in cup_variants() {
        let mut progress = VariantProgress {
            key: variant.key.clone(),
            name: variant.name.clone(),
            total: plan.planned_total(&variant.key),
            ..VariantProgress::default()
        };

        for batch in plan.batches().filter(|b| completed.contains(&b.id)) {
            for (kind, component) in variant.components() {
                if matches_component(&batch.item, component) {
                    progress.add_completed(kind, batch.count);
                }
            }
        }

        let assembled = ComponentKind::ALL
            .iter()
            .map(|kind| progress.completed_for(*kind))
            .min()
            .unwrap_or(0);
        progress.completed = assembled.min(progress.total);
        variants.push(progress);
    }

    let total_completed: u32 = variants.iter().map(|v| v.completed).sum();
    let total_remaining = plan.total_cups.saturating_sub(total_completed);

    tracing::debug!(
        plan = %plan.id,
        completed_batches = completed.len(),
        total_completed,
        total_remaining,
        "生产进度重算完成"
    );

    ProgressStats {
        plan: plan.id,
        total_cups: plan.total_cups,
        total_completed,
        total_remaining,
        components_completed,
        components_remaining,
        variants,
    }
}

/// 剩余杯数的零件缺口（已完成的杯型不输出）
///
/// 缺口 = max(0, 剩余杯数 - 该零件已完成数量)
pub fn remaining_needs(stats: &ProgressStats) -> Vec<VariantRemainingNeeds> {
    stats
        .variants
        .iter()
        .filter(|v| v.remaining() > 0)
        .filter_map(|progress| {
            let variant = cup_variant(&progress.key)?;
            let remaining_units = progress.remaining();
            let shortfalls = variant
                .components()
                .into_iter()
                .map(|(kind, component)| ComponentShortfall {
                    kind,
                    component: component.to_string(),
                    needed: remaining_units.saturating_sub(progress.completed_for(kind)),
                })
                .collect();

            Some(VariantRemainingNeeds {
                key: progress.key.clone(),
                name: progress.name.clone(),
                completed: progress.completed,
                total: progress.total,
                remaining_units,
                shortfalls,
            })
        })
        .collect()
}

/// 计划零件总需求：按杯型计划产量累加到各零件
pub fn component_needs(plan: &ProductionPlan) -> ComponentNeeds {
    let mut needs: ComponentNeeds = ComponentKind::ALL
        .iter()
        .map(|kind| (*kind, BTreeMap::new()))
        .collect();

    for variant in cup_variants() {
        let cups = plan.planned_total(&variant.key);
        if cups == 0 {
            continue;
        }
        for (kind, component) in variant.components() {
            *needs
                .entry(kind)
                .or_default()
                .entry(component.to_string())
                .or_insert(0) += cups;
        }
    }

    needs
}

/// 杯型产量占比（百分比保留 1 位小数）
pub fn distribution_shares(plan: &ProductionPlan) -> Vec<DistributionShare> {
    cup_variants()
        .iter()
        .filter_map(|variant| {
            let cups = *plan.distribution.get(&variant.key)?;
            let percentage = if plan.total_cups == 0 {
                0.0
            } else {
                (cups as f64 / plan.total_cups as f64 * 1000.0).round() / 10.0
            };
            Some(DistributionShare {
                key: variant.key.clone(),
                name: variant.name.clone(),
                cups,
                percentage,
            })
        })
        .collect()
}

/// 某一天的排程（按打印机分组，打印机顺序与计划一致）
///
/// 当天没有批次的打印机不出现在结果中
pub fn daily_schedule(
    plan: &ProductionPlan,
    day: u32,
    completed: &BTreeSet<String>,
) -> Vec<PrinterDaySchedule> {
    plan.printers
        .iter()
        .map(|printer| PrinterDaySchedule {
            printer_key: printer.key.clone(),
            printer_name: printer.name.clone(),
            batches: printer
                .batches
                .iter()
                .filter(|b| b.day == day)
                .map(|b| BatchView {
                    batch: b.clone(),
                    complete: completed.contains(&b.id),
                })
                .collect(),
        })
        .filter(|schedule| !schedule.batches.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::plan;
    use crate::domain::types::PlanId;

    fn completed_where<F>(plan: &ProductionPlan, pred: F) -> BTreeSet<String>
    where
        F: Fn(&str) -> bool,
    {
        plan.batches()
            .filter(|b| pred(&b.item))
            .map(|b| b.id.clone())
            .collect()
    }

    #[test]
    fn test_nothing_completed() {
        let p = plan(PlanId::Hours72);
        let stats = compute_progress(p, &BTreeSet::new());
        assert_eq!(stats.total_completed, 0);
        assert_eq!(stats.total_remaining, 254);
        assert!(stats.components_completed.is_empty());
        assert_eq!(stats.components_remaining["White Handles"], 168);
        assert_eq!(stats.percent_complete(), 0.0);
    }

    #[test]
    fn test_white_cups_complete() {
        let p = plan(PlanId::Hours72);
        let white_parts = ["White Handles", "Gray Lids", "Black Buttons", "Black Rings", "White Bottles"];
        let done = completed_where(p, |item| white_parts.contains(&item));
        let stats = compute_progress(p, &done);

        let white = stats.variant("white").unwrap();
        assert_eq!(white.bottles_completed, 48);
        assert_eq!(white.completed, 48);
        assert_eq!(white.remaining(), 0);
        assert_eq!(stats.total_remaining, 254 - stats.total_completed);

        // 缺少按钮/圆环/瓶身，共享零件不会凭空组装出杯子
        let orange = stats.variant("orange").unwrap();
        assert_eq!(orange.lids_completed, 60);
        assert_eq!(orange.completed, 0);

        assert!(remaining_needs(&stats).iter().all(|n| n.key != "white"));
    }

    #[test]
    fn test_completed_capped_at_plan_total() {
        for id in PlanId::ALL {
            let p = plan(id);
            let everything: BTreeSet<String> = p.batches().map(|b| b.id.clone()).collect();
            let stats = compute_progress(p, &everything);

            for v in &stats.variants {
                assert!(v.completed <= v.total, "{} {}", v.key, v.completed);
            }
            assert!(stats.total_completed <= stats.total_cups);
            assert!(stats.components_remaining.is_empty());
        }
    }

    #[test]
    fn test_batches_of_other_plan_ignored() {
        let p72 = plan(PlanId::Hours72);
        let week = plan(PlanId::OneWeek);
        let all_week: BTreeSet<String> = week.batches().map(|b| b.id.clone()).collect();
        let stats = compute_progress(p72, &all_week);
        assert_eq!(stats.total_completed, 0);
    }

    #[test]
    fn test_remaining_needs_shortfalls() {
        let p = plan(PlanId::Hours72);
        let done = completed_where(p, |item| item == "White Handles");
        let stats = compute_progress(p, &done);
        let needs = remaining_needs(&stats);

        let mint = needs.iter().find(|n| n.key == "mint").unwrap();
        assert_eq!(mint.remaining_units, 120);
        let handle = mint
            .shortfalls
            .iter()
            .find(|s| s.kind == ComponentKind::Handle)
            .unwrap();
        assert_eq!(handle.component, "White Handle");
        assert_eq!(handle.needed, 0);
        let bottle = mint
            .shortfalls
            .iter()
            .find(|s| s.kind == ComponentKind::Bottle)
            .unwrap();
        assert_eq!(bottle.needed, 120);
    }

    #[test]
    fn test_component_needs_shared_parts_sum() {
        let needs = component_needs(plan(PlanId::Hours72));
        // mint 120 + white 48
        assert_eq!(needs[&ComponentKind::Handle]["White Handle"], 168);
        // white 48 + orange 14
        assert_eq!(needs[&ComponentKind::Lid]["Gray Lid"], 62);

        let total_bottles: u32 = needs[&ComponentKind::Bottle].values().sum();
        assert_eq!(total_bottles, 254);
    }

    #[test]
    fn test_distribution_shares() {
        let shares = distribution_shares(plan(PlanId::Hours72));
        assert_eq!(shares.len(), 6);
        assert_eq!(shares[0].key, "mint");
        assert_eq!(shares[0].percentage, 47.2);
        assert_eq!(shares.iter().map(|s| s.cups).sum::<u32>(), 254);
    }

    #[test]
    fn test_daily_schedule_groups_by_printer() {
        let p = plan(PlanId::Hours72);
        let done: BTreeSet<String> = ["p4_d2_b8".to_string()].into_iter().collect();
        let day2 = daily_schedule(p, 2, &done);

        assert_eq!(day2.len(), 4);
        assert_eq!(day2[0].printer_key, "printer1");
        assert_eq!(day2[0].batches.len(), 2);
        assert_eq!(day2[3].batches.len(), 11);
        assert!(day2[3].batches.iter().any(|b| b.batch.id == "p4_d2_b8" && b.complete));
        assert_eq!(day2[3].batches[0].batch.start_hour_or_zero(), 0.0);

        // 第 3 天 printer4 空闲
        let day3 = daily_schedule(p, 3, &BTreeSet::new());
        let keys: Vec<&str> = day3.iter().map(|s| s.printer_key.as_str()).collect();
        assert_eq!(keys, vec!["printer1", "printer2", "printer3"]);
    }
}
