// ==========================================
// 杯子钥匙扣运营看板 - 订单看板状态机
// ==========================================
// 职责: DashboardState + DashboardEvent → 新 DashboardState
// 说明: 纯函数；订单变化后在此处全量重算汇总
// ==========================================

use crate::domain::order::Order;
use crate::domain::summary::OrderSummary;
use crate::domain::types::SortKey;
use crate::engine::order_aggregator::{aggregate_orders, ingest_payload};
use crate::engine::order_table::{OrderFilter, OrderQuery, SortConfig};

/// 看板状态
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// 累积订单（按导入顺序）
    pub orders: Vec<Order>,
    /// 由 orders 重算得到
    pub summary: OrderSummary,
    /// 最近一次导入失败的提示，成功导入或清空后消失
    pub last_error: Option<String>,
    pub query: OrderQuery,
    /// 零件需求的颜色过滤
    pub piece_color_filter: Option<String>,
    /// 清空时恢复的排序
    pub default_sort: SortConfig,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(OrderQuery::default())
    }
}

impl DashboardState {
    /// 以给定的初始查询（页大小/排序来自配置）创建空看板
    pub fn new(initial_query: OrderQuery) -> Self {
        Self {
            orders: Vec::new(),
            summary: OrderSummary::default(),
            last_error: None,
            default_sort: initial_query.sort,
            query: initial_query,
            piece_color_filter: None,
        }
    }

    fn recompute(&mut self) {
        self.summary = aggregate_orders(&self.orders);
    }
}

/// 看板事件
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// 粘贴导出的订单 JSON
    Paste(String),
    /// 清空全部数据与查询条件
    Clear,
    SetSearch(String),
    /// 替换过滤条件（搜索词保持不变）
    SetFilter(OrderFilter),
    RequestSort(SortKey),
    SetPage(usize),
    SetPageSize(usize),
    SetPieceColorFilter(Option<String>),
}

/// 状态迁移
pub fn reduce(mut state: DashboardState, event: DashboardEvent) -> DashboardState {
    match event {
        DashboardEvent::Paste(text) => {
            if text.trim().is_empty() {
                return state;
            }
            match ingest_payload(&state.orders, &text) {
                Ok(outcome) => {
                    tracing::info!(
                        added = outcome.added,
                        skipped = outcome.skipped,
                        rejected = outcome.rejected,
                        total = outcome.orders.len(),
                        "订单导入完成"
                    );
                    state.orders = outcome.orders;
                    state.last_error = None;
                    state.recompute();
                }
                Err(e) => {
                    tracing::warn!(error = %e, "订单导入失败，保留原有数据");
                    state.last_error = Some(e.to_string());
                }
            }
        }
        DashboardEvent::Clear => {
            let page_size = state.query.page_size;
            state = DashboardState::new(OrderQuery {
                sort: state.default_sort,
                page_size,
                ..OrderQuery::default()
            });
        }
        DashboardEvent::SetSearch(search) => {
            state.query.filter.search = search;
            state.query.page = 1;
        }
        DashboardEvent::SetFilter(filter) => {
            let search = std::mem::take(&mut state.query.filter.search);
            state.query.filter = OrderFilter { search, ..filter };
            state.query.page = 1;
        }
        DashboardEvent::RequestSort(key) => {
            state.query.sort = state.query.sort.request_sort(key);
        }
        DashboardEvent::SetPage(page) => {
            state.query.page = page.max(1);
        }
        DashboardEvent::SetPageSize(page_size) => {
            state.query.page_size = page_size.max(1);
            state.query.page = 1;
        }
        DashboardEvent::SetPieceColorFilter(color) => {
            state.piece_color_filter = color;
        }
    }
    state
}
