// ==========================================
// 杯子钥匙扣运营看板 - 订单聚合引擎
// ==========================================
// 职责: 订单合并去重 + 全量重算统计投影
// 输入: 累积订单列表
// 输出: OrderSummary（SKU/大类/类型/金额/状态/零件需求）
// 说明: 每次变更后从完整列表重算，不做增量
// ==========================================

use crate::catalog::pieces_for_sku;
use crate::domain::order::Order;
use crate::domain::summary::{
    CupsVsOther, FinancialStats, NamedQuantity, OrderSummary, PieceRequirement, SkuStat,
    StatusCount,
};
use crate::domain::types::{status_label, ProductCategory, ProductType};
use crate::engine::sku_classifier::classify_sku;
use crate::importer::{parse_payload, ImportResult};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

// ==========================================
// 合并去重
// ==========================================

/// 导入结果
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    /// 合并后的完整订单列表
    pub orders: Vec<Order>,
    /// 新增订单数
    pub added: usize,
    /// 因订单号已存在而跳过的数量
    pub skipped: usize,
    /// 无法识别而丢弃的条目数
    pub rejected: usize,
}

/// 合并新订单：按 main_order_id 去重，只追加未出现过的订单
///
/// 同一批次内重复的订单号只保留第一条
pub fn merge_orders(existing: &[Order], incoming: Vec<Order>) -> IngestOutcome {
    let mut known: HashSet<String> = existing.iter().map(|o| o.main_order_id.clone()).collect();
    let mut orders = existing.to_vec();
    let mut skipped = 0;

    for order in incoming {
        if known.insert(order.main_order_id.clone()) {
            orders.push(order);
        } else {
            skipped += 1;
        }
    }

    let added = orders.len() - existing.len();
    IngestOutcome {
        orders,
        added,
        skipped,
        rejected: 0,
    }
}

/// 解析粘贴内容并合并
///
/// 解析失败时返回错误，调用方持有的旧列表保持不变
pub fn ingest_payload(previous: &[Order], text: &str) -> ImportResult<IngestOutcome> {
    let parsed = parse_payload(text)?;
    Ok(IngestOutcome {
        rejected: parsed.rejected.len(),
        ..merge_orders(previous, parsed.orders)
    })
}

// ==========================================
// 聚合
// ==========================================

/// 全量聚合
pub fn aggregate_orders(orders: &[Order]) -> OrderSummary {
    let sku_stats = sku_stats(orders);
    let category_stats = rollup(&sku_stats, |s| s.category.to_string());
    let product_type_stats = rollup(&sku_stats, |s| s.product_type.to_string());
    let pieces_required = pieces_required(&sku_stats);

    OrderSummary {
        order_count: orders.len(),
        sku_stats,
        category_stats,
        product_type_stats,
        financial: financial_stats(orders),
        statuses: status_counts(orders),
        pieces_required,
    }
}

fn sku_stats(orders: &[Order]) -> Vec<SkuStat> {
    let mut quantities: HashMap<&str, u64> = HashMap::new();
    for sku in orders.iter().flat_map(|o| o.sku_module.iter()) {
        *quantities.entry(sku.name()).or_insert(0) += sku.effective_quantity() as u64;
    }

    let mut stats: Vec<SkuStat> = quantities
        .into_iter()
        .map(|(name, quantity)| {
            let class = classify_sku(name);
            SkuStat {
                name: name.to_string(),
                quantity,
                category: class.category,
                product_type: class.product_type,
                display: class.display,
            }
        })
        .collect();

    // 数量降序，同量按名称升序
    stats.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.name.cmp(&b.name)));
    stats
}

fn rollup<F>(sku_stats: &[SkuStat], key: F) -> Vec<NamedQuantity>
where
    F: Fn(&SkuStat) -> String,
{
    let mut sums: BTreeMap<String, u64> = BTreeMap::new();
    for stat in sku_stats {
        *sums.entry(key(stat)).or_insert(0) += stat.quantity;
    }

    let mut result: Vec<NamedQuantity> = sums
        .into_iter()
        .map(|(name, quantity)| NamedQuantity { name, quantity })
        .collect();
    result.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.name.cmp(&b.name)));
    result
}

fn financial_stats(orders: &[Order]) -> FinancialStats {
    let total_sales: f64 = orders.iter().map(Order::grand_total).sum();
    let total_taxes: f64 = orders.iter().map(Order::taxes).sum();
    let total_shipping: f64 = orders.iter().map(Order::shipping).sum();

    let average_order_value = if orders.is_empty() {
        0.0
    } else {
        total_sales / orders.len() as f64
    };

    FinancialStats {
        total_sales,
        total_taxes,
        total_shipping,
        average_order_value,
    }
}

/// 状态计数：统计每个订单的全部状态条目（首次出现顺序）
fn status_counts(orders: &[Order]) -> Vec<StatusCount> {
    let mut counts: Vec<StatusCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for code in orders
        .iter()
        .flat_map(|o| o.order_status_module.iter())
        .filter_map(|s| s.main_order_status)
    {
        let label = status_label(code);
        match index.get(&label) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(label.clone(), counts.len());
                counts.push(StatusCount {
                    name: label,
                    count: 1,
                });
            }
        }
    }

    counts
}

// ==========================================
// Owala 零件需求
// ==========================================

fn pieces_required(sku_stats: &[SkuStat]) -> Vec<PieceRequirement> {
    let mut totals: HashMap<&'static str, u64> = HashMap::new();

    for stat in sku_stats.iter().filter(|s| s.product_type == ProductType::Owala) {
        for piece in pieces_for_sku(&stat.name) {
            *totals.entry(piece.name).or_insert(0) += stat.quantity;
        }
    }

    let mut pieces: Vec<PieceRequirement> = totals
        .into_iter()
        .map(|(name, quantity)| PieceRequirement {
            name: name.to_string(),
            piece_type: piece_type(name),
            color: extract_piece_color(name),
            quantity,
        })
        .collect();
    pieces.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.name.cmp(&b.name)));
    pieces
}

/// 零件类型：名称最后一个单词（"Blue Ring" → "Ring"）
pub fn piece_type(piece_name: &str) -> String {
    piece_name.split(' ').last().unwrap_or_default().to_string()
}

/// 零件颜色：除最后一个单词外的部分，单词不足两个时为 "Unknown"
pub fn extract_piece_color(piece_name: &str) -> String {
    let words: Vec<&str> = piece_name.split(' ').collect();
    if words.len() < 2 {
        return "Unknown".to_string();
    }
    words[..words.len() - 1].join(" ")
}

/// 零件颜色列表（去重、升序）
pub fn piece_colors(pieces: &[PieceRequirement]) -> Vec<String> {
    pieces
        .iter()
        .map(|p| p.color.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// 按颜色过滤零件，None 表示不过滤
pub fn filter_pieces_by_color(
    pieces: &[PieceRequirement],
    color: Option<&str>,
) -> Vec<PieceRequirement> {
    match color {
        None => pieces.to_vec(),
        Some(color) => pieces.iter().filter(|p| p.color == color).cloned().collect(),
    }
}

/// 按零件类型分组
pub fn group_pieces_by_type(pieces: &[PieceRequirement]) -> BTreeMap<String, Vec<PieceRequirement>> {
    let mut grouped: BTreeMap<String, Vec<PieceRequirement>> = BTreeMap::new();
    for piece in pieces {
        grouped
            .entry(piece.piece_type.clone())
            .or_default()
            .push(piece.clone());
    }
    grouped
}

// ==========================================
// 过滤选项
// ==========================================

/// 全部状态名称（首次出现顺序）
pub fn status_options(orders: &[Order]) -> Vec<String> {
    let mut seen = HashSet::new();
    orders
        .iter()
        .flat_map(|o| o.order_status_module.iter())
        .filter_map(|s| s.main_order_status)
        .map(status_label)
        .filter(|label| seen.insert(label.clone()))
        .collect()
}

pub fn category_options(summary: &OrderSummary) -> Vec<ProductCategory> {
    let mut seen = HashSet::new();
    summary
        .sku_stats
        .iter()
        .map(|s| s.category)
        .filter(|c| seen.insert(*c))
        .collect()
}

pub fn product_type_options(summary: &OrderSummary) -> Vec<ProductType> {
    let mut seen = HashSet::new();
    summary
        .sku_stats
        .iter()
        .map(|s| s.product_type)
        .filter(|t| seen.insert(*t))
        .collect()
}

/// 杯子 vs 其他件数
pub fn cups_vs_other(summary: &OrderSummary) -> CupsVsOther {
    let cups: u64 = summary
        .sku_stats
        .iter()
        .filter(|s| s.category == ProductCategory::Cup)
        .map(|s| s.quantity)
        .sum();
    let other: u64 = summary
        .sku_stats
        .iter()
        .filter(|s| s.category != ProductCategory::Cup)
        .map(|s| s.quantity)
        .sum();

    CupsVsOther {
        cups,
        other,
        total_items: cups + other,
    }
}
