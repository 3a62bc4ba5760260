// ==========================================
// 杯子钥匙扣运营看板 - 配置层
// ==========================================
// 职责: 系统默认值管理,支持数据库覆写
// 存储: config_kv 表
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
