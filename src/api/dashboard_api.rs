// ==========================================
// 杯子钥匙扣运营看板 - 订单看板 API
// ==========================================
// 职责: 持有看板状态，串联导入、聚合、表格查询
// 架构: API 层 → Engine 层 (dashboard_reducer / order_table / order_aggregator)
// 说明: 状态仅在内存中，不做持久化
// ==========================================

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::summary::{CupsVsOther, OrderPage, OrderSummary, PieceRequirement};
use crate::domain::types::{ProductCategory, ProductType, SortKey};
use crate::engine::dashboard_reducer::{reduce, DashboardEvent, DashboardState};
use crate::engine::order_aggregator::{
    category_options, cups_vs_other, filter_pieces_by_color, group_pieces_by_type, piece_colors,
    product_type_options, status_options,
};
use crate::engine::order_table::{query_orders, OrderFilter, OrderQuery, SortConfig};

/// 过滤下拉选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub statuses: Vec<String>,
    pub categories: Vec<ProductCategory>,
    pub product_types: Vec<ProductType>,
}

// ==========================================
// DashboardApi - 订单看板 API
// ==========================================
pub struct DashboardApi {
    state: Mutex<DashboardState>,
}

impl DashboardApi {
    /// 以配置中的页大小/默认排序创建
    pub fn new(config: &ConfigManager) -> ApiResult<Self> {
        let page_size = config
            .get_page_size()
            .map_err(|e| ApiError::DatabaseError(format!("读取页大小配置失败: {}", e)))?;
        let sort = config
            .get_default_sort()
            .map_err(|e| ApiError::DatabaseError(format!("读取排序配置失败: {}", e)))?;

        Ok(Self::with_query(OrderQuery {
            sort,
            page_size,
            ..OrderQuery::default()
        }))
    }

    pub fn with_query(initial_query: OrderQuery) -> Self {
        Self {
            state: Mutex::new(DashboardState::new(initial_query)),
        }
    }

    fn lock(&self) -> ApiResult<MutexGuard<'_, DashboardState>> {
        self.state
            .lock()
            .map_err(|e| ApiError::InternalError(format!("锁获取失败: {}", e)))
    }

    fn dispatch(&self, event: DashboardEvent) -> ApiResult<MutexGuard<'_, DashboardState>> {
        let mut guard = self.lock()?;
        let current = std::mem::take(&mut *guard);
        *guard = reduce(current, event);
        Ok(guard)
    }

    /// 应用事件，不读取结果
    fn apply(&self, event: DashboardEvent) -> ApiResult<()> {
        self.dispatch(event).map(drop)
    }

    // ==========================================
    // 导入 / 清空
    // ==========================================

    /// 粘贴订单 JSON
    ///
    /// # 返回
    /// - Ok(OrderSummary): 合并后的全量汇总（空白内容不做任何处理）
    /// - Err(ApiError::ImportError): 无法解析，原有订单保持不变
    pub fn paste_orders(&self, text: &str) -> ApiResult<OrderSummary> {
        let state = self.dispatch(DashboardEvent::Paste(text.to_string()))?;
        match &state.last_error {
            Some(msg) if !text.trim().is_empty() => Err(ApiError::ImportError(msg.clone())),
            _ => Ok(state.summary.clone()),
        }
    }

    pub fn clear(&self) -> ApiResult<()> {
        self.apply(DashboardEvent::Clear)?;
        tracing::info!("看板数据已清空");
        Ok(())
    }

    // ==========================================
    // 查询条件
    // ==========================================

    pub fn set_search(&self, search: &str) -> ApiResult<()> {
        self.apply(DashboardEvent::SetSearch(search.to_string()))?;
        Ok(())
    }

    pub fn set_filter(&self, filter: OrderFilter) -> ApiResult<()> {
        if let (Some(min), Some(max)) = (filter.min_value, filter.max_value) {
            if min > max {
                return Err(ApiError::InvalidInput(format!(
                    "金额区间无效: min={} > max={}",
                    min, max
                )));
            }
        }
        self.apply(DashboardEvent::SetFilter(filter))?;
        Ok(())
    }

    /// 点击表头排序，返回新的排序状态
    pub fn request_sort(&self, key: SortKey) -> ApiResult<SortConfig> {
        let state = self.dispatch(DashboardEvent::RequestSort(key))?;
        Ok(state.query.sort)
    }

    pub fn set_page(&self, page: usize) -> ApiResult<()> {
        if page == 0 {
            return Err(ApiError::InvalidInput("页码从 1 开始".to_string()));
        }
        self.apply(DashboardEvent::SetPage(page))?;
        Ok(())
    }

    pub fn set_page_size(&self, page_size: usize) -> ApiResult<()> {
        if page_size == 0 {
            return Err(ApiError::InvalidInput("每页行数必须大于 0".to_string()));
        }
        self.apply(DashboardEvent::SetPageSize(page_size))?;
        Ok(())
    }

    pub fn set_piece_color_filter(&self, color: Option<&str>) -> ApiResult<()> {
        self.apply(DashboardEvent::SetPieceColorFilter(color.map(str::to_string)))?;
        Ok(())
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn summary(&self) -> ApiResult<OrderSummary> {
        Ok(self.lock()?.summary.clone())
    }

    pub fn last_error(&self) -> ApiResult<Option<String>> {
        Ok(self.lock()?.last_error.clone())
    }

    pub fn order_count(&self) -> ApiResult<usize> {
        Ok(self.lock()?.orders.len())
    }

    pub fn current_query(&self) -> ApiResult<OrderQuery> {
        Ok(self.lock()?.query.clone())
    }

    /// 当前页（按本地时区计算日期区间）
    pub fn query_page(&self) -> ApiResult<OrderPage> {
        self.query_page_at(Local::now().fixed_offset())
    }

    pub fn query_page_at(&self, now: DateTime<FixedOffset>) -> ApiResult<OrderPage> {
        let state = self.lock()?;
        Ok(query_orders(&state.orders, &state.query, now))
    }

    pub fn cups_vs_other(&self) -> ApiResult<CupsVsOther> {
        Ok(cups_vs_other(&self.lock()?.summary))
    }

    pub fn filter_options(&self) -> ApiResult<FilterOptions> {
        let state = self.lock()?;
        Ok(FilterOptions {
            statuses: status_options(&state.orders),
            categories: category_options(&state.summary),
            product_types: product_type_options(&state.summary),
        })
    }

    /// 零件需求（应用当前颜色过滤）
    pub fn pieces_required(&self) -> ApiResult<Vec<PieceRequirement>> {
        let state = self.lock()?;
        Ok(filter_pieces_by_color(
            &state.summary.pieces_required,
            state.piece_color_filter.as_deref(),
        ))
    }

    /// 零件需求按类型分组（应用当前颜色过滤）
    pub fn pieces_by_type(&self) -> ApiResult<BTreeMap<String, Vec<PieceRequirement>>> {
        Ok(group_pieces_by_type(&self.pieces_required()?))
    }

    pub fn piece_colors(&self) -> ApiResult<Vec<String>> {
        Ok(piece_colors(&self.lock()?.summary.pieces_required))
    }
}
