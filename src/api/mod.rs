// ==========================================
// 杯子钥匙扣运营看板 - API 层
// ==========================================
// 职责: 提供业务 API 接口,持有运行期状态
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod tracker_api;

// 重导出核心类型
pub use dashboard_api::{DashboardApi, FilterOptions};
pub use error::{ApiError, ApiResult};
pub use tracker_api::TrackerApi;
