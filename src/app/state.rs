// ==========================================
// 杯子钥匙扣运营看板 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享资源和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{DashboardApi, TrackerApi};
use crate::config::config_manager::ConfigManager;
use crate::db::{ensure_schema, open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION};
use crate::repository::tracker_state_repo::TrackerStateRepository;

/// 应用状态
///
/// 看板与生产跟踪互不共享状态，只共享同一个数据库连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 订单看板API
    pub dashboard_api: Arc<DashboardApi>,

    /// 生产跟踪API
    pub tracker_api: Arc<TrackerApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库并建表
    /// 2. 读取配置默认值
    /// 3. 恢复生产跟踪状态并创建API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        ensure_schema(&conn).map_err(|e| format!("数据库建表失败: {}", e))?;
        match read_schema_version(&conn) {
            Ok(Some(v)) if v > CURRENT_SCHEMA_VERSION => {
                tracing::warn!(
                    db_version = v,
                    expected = CURRENT_SCHEMA_VERSION,
                    "数据库 schema_version 高于当前程序版本"
                );
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("schema_version 读取失败(将继续启动): {}", e),
        }
        let conn = Arc::new(Mutex::new(conn));

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        let tracker_repo = Arc::new(
            TrackerStateRepository::from_connection(conn.clone())
                .map_err(|e| format!("无法创建TrackerStateRepository: {}", e))?,
        );

        let default_plan = config_manager
            .get_default_plan()
            .map_err(|e| format!("读取默认计划失败: {}", e))?;

        let dashboard_api = Arc::new(
            DashboardApi::new(&config_manager).map_err(|e| format!("无法创建DashboardApi: {}", e))?,
        );
        let tracker_api = Arc::new(TrackerApi::new(tracker_repo, default_plan));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            config_manager,
            dashboard_api,
            tracker_api,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 CUP_KEYCHAIN_OPS_DB_PATH > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("CUP_KEYCHAIN_OPS_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./cup_keychain_ops.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("cup-keychain-ops-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("cup-keychain-ops");
        }

        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&path).is_ok() {
            path = path.join("cup_keychain_ops.db");
        } else {
            path = PathBuf::from("./cup_keychain_ops.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    // 注意：AppState::new() 的测试在集成测试中进行
}
