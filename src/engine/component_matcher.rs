// ==========================================
// 杯子钥匙扣运营看板 - 零件名称匹配规则
// ==========================================
// 规则: 去首尾空白 → 小写 → 去掉一个结尾 's' 后精确相等
// 示例: "White Handles" 匹配 "White Handle"
//       "Mint Green Ring" 不匹配 "Mint Ring"
// ==========================================

/// 归一化零件名称
pub fn normalize_component_name(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    match lower.strip_suffix('s') {
        Some(stripped) => stripped.to_string(),
        None => lower,
    }
}

/// 批次零件名是否对应物料清单中的零件
pub fn matches_component(batch_item: &str, component: &str) -> bool {
    normalize_component_name(batch_item) == normalize_component_name(component)
}
