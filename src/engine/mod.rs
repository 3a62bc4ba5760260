// ==========================================
// 杯子钥匙扣运营看板 - 引擎层
// ==========================================
// 职责: 分类、聚合、表格查询、进度计算与状态迁移
// 红线: Engine 不访问数据库，全部为纯函数
// ==========================================

pub mod batch_progress;
pub mod component_matcher;
pub mod dashboard_reducer;
pub mod order_aggregator;
pub mod order_table;
pub mod sku_classifier;
pub mod tracker_reducer;

// 重导出核心引擎
pub use batch_progress::{
    component_needs, compute_progress, daily_schedule, distribution_shares, remaining_needs,
};
pub use component_matcher::{matches_component, normalize_component_name};
pub use dashboard_reducer::{DashboardEvent, DashboardState};
pub use order_aggregator::{
    aggregate_orders, category_options, cups_vs_other, extract_piece_color,
    filter_pieces_by_color, group_pieces_by_type, ingest_payload, merge_orders, piece_colors,
    piece_type, product_type_options, status_options, IngestOutcome,
};
pub use order_table::{
    filter_and_sort, query_orders, OrderFilter, OrderQuery, SortConfig, DEFAULT_PAGE_SIZE,
};
pub use sku_classifier::classify_sku;
pub use tracker_reducer::{TrackerEvent, TrackerState};
