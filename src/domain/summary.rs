// ==========================================
// 杯子钥匙扣运营看板 - 订单统计结果
// ==========================================
// 职责: 订单聚合与表格查询的输出结构（只读投影）
// ==========================================

use crate::domain::types::{ProductCategory, ProductType};
use serde::{Deserialize, Serialize};

/// SKU 分类结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuClassification {
    pub category: ProductCategory,
    pub product_type: ProductType,
    pub display: String,
}

/// 单个 SKU 的销量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuStat {
    pub name: String,
    pub quantity: u64,
    pub category: ProductCategory,
    pub product_type: ProductType,
    pub display: String,
}

/// 名称 + 数量（大类/类型汇总共用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedQuantity {
    pub name: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialStats {
    pub total_sales: f64,
    pub total_taxes: f64,
    pub total_shipping: f64,
    pub average_order_value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub name: String,
    pub count: u64,
}

/// Owala 零件需求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceRequirement {
    /// 零件名称（如 "Magenta Lid"）
    pub name: String,
    /// 零件类型：名称最后一个单词
    pub piece_type: String,
    /// 颜色：名称除最后一个单词外的部分
    pub color: String,
    pub quantity: u64,
}

// ==========================================
// OrderSummary - 订单汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_count: usize,
    pub sku_stats: Vec<SkuStat>,
    pub category_stats: Vec<NamedQuantity>,
    pub product_type_stats: Vec<NamedQuantity>,
    pub financial: FinancialStats,
    pub statuses: Vec<StatusCount>,
    pub pieces_required: Vec<PieceRequirement>,
}

/// 杯子 vs 其他商品件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CupsVsOther {
    pub cups: u64,
    pub other: u64,
    pub total_items: u64,
}

// ==========================================
// 表格行视图
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuDetail {
    pub name: String,
    pub quantity: u32,
    pub category: ProductCategory,
    pub product_type: ProductType,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub order_id: String,
    /// YYYY-MM-DD，无下单时间时为 "N/A"
    pub created_date: String,
    pub item_count: u64,
    pub status: String,
    pub total_display: String,
    pub skus: Vec<SkuDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    pub rows: Vec<OrderRow>,
    /// 当前页（从 1 开始）
    pub page: usize,
    pub page_size: usize,
    pub total_filtered: usize,
    pub total_pages: usize,
}
