// ==========================================
// 杯子钥匙扣运营看板 - 领域层
// ==========================================
// 职责: 订单、批次、统计结果等纯数据类型
// ==========================================

pub mod batch;
pub mod order;
pub mod progress;
pub mod summary;
pub mod types;

// 重导出核心类型
pub use batch::{Batch, CupVariant, PieceSpec, Printer, ProductionPlan};
pub use order::{Order, OrderStatusEntry, PriceModule, PriceValue, SkuLine, TradeOrderModule};
pub use progress::{
    BatchView, ComponentNeeds, ComponentShortfall, DistributionShare, PrinterDaySchedule,
    ProgressStats, VariantProgress, VariantRemainingNeeds,
};
pub use summary::{
    CupsVsOther, FinancialStats, NamedQuantity, OrderPage, OrderRow, OrderSummary,
    PieceRequirement, SkuClassification, SkuDetail, SkuStat, StatusCount,
};
pub use types::{
    status_label, ComponentKind, DateRange, PlanId, ProductCategory, ProductType, SortDirection,
    SortKey,
};
