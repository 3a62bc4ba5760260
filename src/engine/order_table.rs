// ==========================================
// 杯子钥匙扣运营看板 - 订单表格查询
// ==========================================
// 职责: 过滤 → 排序 → 分页（纯函数，幂等）
// 输入: 订单列表 + 查询条件 + 当前时间
// 输出: OrderPage（当前页行视图 + 分页信息）
// ==========================================

use crate::domain::order::Order;
use crate::domain::summary::{OrderPage, OrderRow, SkuDetail};
use crate::domain::types::{
    status_label, DateRange, ProductCategory, ProductType, SortDirection, SortKey,
};
use crate::engine::sku_classifier::classify_sku;
use chrono::{DateTime, Duration, FixedOffset, Months, Timelike};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_PAGE_SIZE: usize = 10;

// ==========================================
// 查询条件
// ==========================================

/// 过滤条件（None 表示不限）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    /// 订单号子串（不区分大小写）
    pub search: String,
    /// 首条状态名称（不区分大小写）
    pub status: Option<String>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub date_range: DateRange,
    pub category: Option<ProductCategory>,
    pub product_type: Option<ProductType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            direction: SortDirection::Desc,
        }
    }
}

impl SortConfig {
    /// 点击表头：同字段且当前升序 → 降序，否则 → 升序
    pub fn request_sort(self, key: SortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Self { key, direction }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    pub filter: OrderFilter,
    pub sort: SortConfig,
    /// 从 1 开始
    pub page: usize,
    pub page_size: usize,
}

impl Default for OrderQuery {
    fn default() -> Self {
        Self {
            filter: OrderFilter::default(),
            sort: SortConfig::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// ==========================================
// 过滤
// ==========================================

/// 日期区间的起点（毫秒），All 返回 None
fn date_cutoff_millis(range: DateRange, now: DateTime<FixedOffset>) -> Option<i64> {
    let now_millis = now.timestamp_millis();
    match range {
        DateRange::All => None,
        DateRange::Today => {
            let since_midnight =
                now.num_seconds_from_midnight() as i64 * 1000 + now.timestamp_subsec_millis() as i64;
            Some(now_millis - since_midnight)
        }
        DateRange::Week => Some((now - Duration::days(7)).timestamp_millis()),
        // 月末日期向前取整（3/31 → 2/28）
        DateRange::Month => Some(
            now.checked_sub_months(Months::new(1))
                .unwrap_or(now)
                .timestamp_millis(),
        ),
    }
}

fn matches_filter(order: &Order, filter: &OrderFilter, cutoff_millis: Option<i64>) -> bool {
    if !filter.search.is_empty()
        && !order
            .main_order_id
            .to_lowercase()
            .contains(&filter.search.to_lowercase())
    {
        return false;
    }

    if let Some(status) = &filter.status {
        let first = order
            .order_status_module
            .first()
            .and_then(|s| s.main_order_status);
        match first {
            Some(code) => {
                if status_label(code).to_lowercase() != status.to_lowercase() {
                    return false;
                }
            }
            None => return false,
        }
    }

    let items = order.item_count();
    if filter.min_items.is_some_and(|min| items < min) {
        return false;
    }
    if filter.max_items.is_some_and(|max| items > max) {
        return false;
    }

    let total = order.grand_total();
    if filter.min_value.is_some_and(|min| total < min) {
        return false;
    }
    if filter.max_value.is_some_and(|max| total > max) {
        return false;
    }

    if let Some(cutoff) = cutoff_millis {
        match order.create_time() {
            Some(secs) if secs.saturating_mul(1000) >= cutoff => {}
            _ => return false,
        }
    }

    if let Some(category) = filter.category {
        if !order
            .sku_module
            .iter()
            .any(|sku| classify_sku(sku.name()).category == category)
        {
            return false;
        }
    }

    if let Some(product_type) = filter.product_type {
        if !order
            .sku_module
            .iter()
            .any(|sku| classify_sku(sku.name()).product_type == product_type)
        {
            return false;
        }
    }

    true
}

// ==========================================
// 排序
// ==========================================

fn compare_orders(a: &Order, b: &Order, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.create_time().unwrap_or(0).cmp(&b.create_time().unwrap_or(0)),
        SortKey::Items => a.item_count().cmp(&b.item_count()),
        SortKey::Total => a.grand_total().total_cmp(&b.grand_total()),
        SortKey::Id => a.main_order_id.cmp(&b.main_order_id),
    }
}

/// 过滤 + 排序（稳定排序，相等元素保持输入顺序）
pub fn filter_and_sort<'a>(
    orders: &'a [Order],
    query: &OrderQuery,
    now: DateTime<FixedOffset>,
) -> Vec<&'a Order> {
    let cutoff = date_cutoff_millis(query.filter.date_range, now);
    let mut result: Vec<&Order> = orders
        .iter()
        .filter(|o| matches_filter(o, &query.filter, cutoff))
        .collect();

    let SortConfig { key, direction } = query.sort;
    result.sort_by(|a, b| match direction {
        SortDirection::Asc => compare_orders(a, b, key),
        SortDirection::Desc => compare_orders(b, a, key),
    });
    result
}

// ==========================================
// 行视图 + 分页
// ==========================================

/// 下单日期（now 所在时区），无时间时为 "N/A"
pub fn format_created_date(order: &Order, now: DateTime<FixedOffset>) -> String {
    order
        .create_time()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|utc| utc.with_timezone(now.offset()).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn build_row(order: &Order, now: DateTime<FixedOffset>) -> OrderRow {
    let skus = order
        .sku_module
        .iter()
        .map(|sku| {
            let class = classify_sku(sku.name());
            SkuDetail {
                name: sku.name().to_string(),
                quantity: sku.effective_quantity(),
                category: class.category,
                product_type: class.product_type,
                display: class.display,
            }
        })
        .collect();

    OrderRow {
        order_id: order.main_order_id.clone(),
        created_date: format_created_date(order, now),
        item_count: order.item_count(),
        status: order.primary_status_label(),
        total_display: order.total_display(),
        skus,
    }
}

/// 表格查询
pub fn query_orders(orders: &[Order], query: &OrderQuery, now: DateTime<FixedOffset>) -> OrderPage {
    let filtered = filter_and_sort(orders, query, now);
    let page_size = query.page_size.max(1);
    let page = query.page.max(1);
    let total_filtered = filtered.len();
    let total_pages = total_filtered.div_ceil(page_size);

    let rows = filtered
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .map(|o| build_row(o, now))
        .collect();

    OrderPage {
        rows,
        page,
        page_size,
        total_filtered,
        total_pages,
    }
}
