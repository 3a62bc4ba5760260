// ==========================================
// 杯子钥匙扣运营看板 - 配置管理器
// ==========================================
// 职责: 看板/跟踪默认值的加载、查询、覆写
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::types::{PlanId, SortDirection, SortKey};
use crate::engine::order_table::{SortConfig, DEFAULT_PAGE_SIZE};
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA 并建表（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
            ensure_schema(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 写入 global scope 配置（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at)
             VALUES ('global', ?1, ?2, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        tracing::info!(config_key = key, value, "配置已更新");
        Ok(())
    }

    /// 获取所有 global 配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        let json_value = json!(config_map);
        Ok(serde_json::to_string(&json_value)?)
    }

    // ===== 订单看板 =====

    /// 表格每页行数（默认 10，非法值回退默认）
    pub fn get_page_size(&self) -> Result<usize, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::PAGE_SIZE, "10")?;
        Ok(value
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE))
    }

    /// 表格默认排序（默认 date desc）
    pub fn get_default_sort(&self) -> Result<SortConfig, Box<dyn Error>> {
        let key_raw = self.get_config_or_default(config_keys::DEFAULT_SORT_KEY, "date")?;
        let direction_raw = self.get_config_or_default(config_keys::DEFAULT_SORT_DIRECTION, "desc")?;

        let key = key_raw.parse::<SortKey>().unwrap_or_else(|e| {
            tracing::warn!(config_key = config_keys::DEFAULT_SORT_KEY, raw_value = %key_raw, "{}", e);
            SortKey::Date
        });
        let direction = direction_raw.parse::<SortDirection>().unwrap_or_else(|e| {
            tracing::warn!(
                config_key = config_keys::DEFAULT_SORT_DIRECTION,
                raw_value = %direction_raw,
                "{}",
                e
            );
            SortDirection::Desc
        });

        Ok(SortConfig { key, direction })
    }

    // ===== 生产跟踪 =====

    /// 默认生产计划（默认 72h）
    pub fn get_default_plan(&self) -> Result<PlanId, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::DEFAULT_PLAN, "72h")?;
        Ok(value.parse::<PlanId>().unwrap_or_else(|e| {
            tracing::warn!(config_key = config_keys::DEFAULT_PLAN, raw_value = %value, "{}", e);
            PlanId::Hours72
        }))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 订单看板
    pub const PAGE_SIZE: &str = "dashboard/page_size";
    pub const DEFAULT_SORT_KEY: &str = "dashboard/default_sort_key";
    pub const DEFAULT_SORT_DIRECTION: &str = "dashboard/default_sort_direction";

    // 生产跟踪
    pub const DEFAULT_PLAN: &str = "tracker/default_plan";
}
