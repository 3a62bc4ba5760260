// ==========================================
// 杯子钥匙扣运营看板 - 生产计划排程
// ==========================================
// 职责: 72 小时 / 一周两套手工排程（4 台打印机）
// 存储: plans/*.json，编译期嵌入
// ==========================================

use crate::domain::batch::ProductionPlan;
use crate::domain::types::PlanId;
use std::sync::OnceLock;

const PLAN_72H_JSON: &str = include_str!("plans/plan_72h.json");
const PLAN_1WEEK_JSON: &str = include_str!("plans/plan_1week.json");

static PLAN_72H: OnceLock<ProductionPlan> = OnceLock::new();
static PLAN_1WEEK: OnceLock<ProductionPlan> = OnceLock::new();

fn parse_embedded(raw: &str, id: PlanId) -> ProductionPlan {
    // 嵌入数据由单元测试校验，解析失败属于构建缺陷
    let plan: ProductionPlan = serde_json::from_str(raw)
        .unwrap_or_else(|e| panic!("内置计划 {} 数据损坏: {}", id, e));
    debug_assert_eq!(plan.id, id);
    plan
}

/// 获取生产计划
pub fn plan(id: PlanId) -> &'static ProductionPlan {
    match id {
        PlanId::Hours72 => PLAN_72H.get_or_init(|| parse_embedded(PLAN_72H_JSON, id)),
        PlanId::OneWeek => PLAN_1WEEK.get_or_init(|| parse_embedded(PLAN_1WEEK_JSON, id)),
    }
}

/// 查找批次所属的计划
pub fn find_batch_plan(batch_id: &str) -> Option<PlanId> {
    PlanId::ALL
        .into_iter()
        .find(|id| plan(*id).find_batch(batch_id).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::cup_variant;
    use std::collections::HashSet;

    #[test]
    fn test_embedded_plans_parse() {
        let p72 = plan(PlanId::Hours72);
        assert_eq!(p72.total_hours, 72);
        assert_eq!(p72.total_cups, 254);
        assert_eq!(p72.printers.len(), 4);
        assert_eq!(p72.days(), vec![1, 2, 3]);

        let week = plan(PlanId::OneWeek);
        assert_eq!(week.total_hours, 168);
        assert_eq!(week.total_cups, 597);
        assert_eq!(week.days(), (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn test_distribution_sums_to_total_and_variants_exist() {
        for id in PlanId::ALL {
            let p = plan(id);
            assert_eq!(p.distribution.values().sum::<u32>(), p.total_cups);
            for key in p.distribution.keys() {
                assert!(cup_variant(key).is_some(), "未知杯型 {}", key);
            }
        }
    }

    #[test]
    fn test_batch_ids_unique_across_plans() {
        let mut seen = HashSet::new();
        for id in PlanId::ALL {
            for batch in plan(id).batches() {
                assert!(seen.insert(batch.id.clone()), "重复批次 {}", batch.id);
            }
        }
        assert_eq!(find_batch_plan("p4_d2_b8"), Some(PlanId::Hours72));
        assert_eq!(find_batch_plan("p4_d7_b3_week"), Some(PlanId::OneWeek));
        assert_eq!(find_batch_plan("nope"), None);
    }
}
