// ==========================================
// 杯子钥匙扣运营看板 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 订单统计看板 + 打印批次生产跟踪
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 静态目录 - 物料清单与生产计划
pub mod catalog;

// 导入层 - 粘贴的订单 JSON
pub mod importer;

// 引擎层 - 业务规则
pub mod engine;

// 数据仓储层 - 数据访问
pub mod repository;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    ComponentKind, DateRange, PlanId, ProductCategory, ProductType, SortDirection, SortKey,
};

// 领域实体
pub use domain::{
    Batch, CupVariant, Order, OrderPage, OrderSummary, ProductionPlan, ProgressStats,
};

// 引擎
pub use engine::{
    aggregate_orders, compute_progress, ingest_payload, query_orders, DashboardState, OrderFilter,
    OrderQuery, SortConfig, TrackerState,
};

// API
pub use api::{ApiError, ApiResult, DashboardApi, TrackerApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "杯子钥匙扣运营看板";
