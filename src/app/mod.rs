// ==========================================
// 杯子钥匙扣运营看板 - 应用层
// ==========================================
// 职责: 组装数据库、配置与各 API 实例
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
