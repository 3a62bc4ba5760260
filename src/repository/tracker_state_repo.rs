// ==========================================
// 杯子钥匙扣运营看板 - 生产跟踪状态仓储
// ==========================================
// 职责: 持久化所选计划与已完成批次
// 存储: config_kv 表（scope_id='global'）
//   - tracker/selected_plan     : "72h" / "1week"
//   - tracker/completed_batches : {"batch_id": true, ...}
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::types::PlanId;
use crate::engine::tracker_reducer::TrackerState;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

pub const KEY_SELECTED_PLAN: &str = "tracker/selected_plan";
pub const KEY_COMPLETED_BATCHES: &str = "tracker/completed_batches";

/// 已持久化的跟踪状态（缺失的键为 None / 空）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerSnapshot {
    pub selected_plan: Option<PlanId>,
    pub completed: BTreeSet<String>,
}

pub struct TrackerStateRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TrackerStateRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        ensure_schema(&*repo.get_conn()?)?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn read_value(conn: &Connection, key: &str) -> RepositoryResult<Option<String>> {
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 读取持久化状态
    ///
    /// 值为 false 的批次视为未完成
    pub fn load(&self) -> RepositoryResult<TrackerSnapshot> {
        let conn = self.get_conn()?;

        let selected_plan = match Self::read_value(&conn, KEY_SELECTED_PLAN)? {
            Some(raw) => Some(raw.parse::<PlanId>().map_err(|message| {
                RepositoryError::FieldValueError {
                    field: KEY_SELECTED_PLAN.to_string(),
                    message,
                }
            })?),
            None => None,
        };

        let completed = match Self::read_value(&conn, KEY_COMPLETED_BATCHES)? {
            Some(raw) => {
                let flags: BTreeMap<String, bool> =
                    serde_json::from_str(&raw).map_err(|e| RepositoryError::FieldValueError {
                        field: KEY_COMPLETED_BATCHES.to_string(),
                        message: e.to_string(),
                    })?;
                flags
                    .into_iter()
                    .filter_map(|(id, done)| done.then_some(id))
                    .collect()
            }
            None => BTreeSet::new(),
        };

        Ok(TrackerSnapshot {
            selected_plan,
            completed,
        })
    }

    /// 写入当前状态（单事务覆盖两个键）
    pub fn save(&self, state: &TrackerState) -> RepositoryResult<()> {
        let flags: BTreeMap<&str, bool> = state
            .completed
            .iter()
            .map(|id| (id.as_str(), true))
            .collect();
        let flags_json = serde_json::to_string(&flags)
            .map_err(|e| RepositoryError::InternalError(e.to_string()))?;

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        for (key, value) in [
            (KEY_SELECTED_PLAN, state.selected_plan.as_str().to_string()),
            (KEY_COMPLETED_BATCHES, flags_json),
        ] {
            tx.execute(
                "INSERT INTO config_kv (scope_id, key, value, updated_at)
                 VALUES ('global', ?1, ?2, datetime('now'))
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
                params![key, value],
            )?;
        }
        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(())
    }

    /// 删除持久化状态，返回删除的行数
    pub fn clear(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM config_kv WHERE scope_id = 'global' AND key IN (?1, ?2)",
            params![KEY_SELECTED_PLAN, KEY_COMPLETED_BATCHES],
        )?;
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_repo() -> (TrackerStateRepository, Arc<Mutex<Connection>>) {
        let conn = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
        let repo = TrackerStateRepository::from_connection(conn.clone()).unwrap();
        (repo, conn)
    }

    #[test]
    fn test_empty_store_loads_default() {
        let (repo, _) = memory_repo();
        assert_eq!(repo.load().unwrap(), TrackerSnapshot::default());
    }

    #[test]
    fn test_save_load_clear() {
        let (repo, _) = memory_repo();
        let mut state = TrackerState::new(PlanId::OneWeek);
        state.completed.insert("p1_d1_b1_week".to_string());
        state.completed.insert("p4_d2_b3_week".to_string());

        repo.save(&state).unwrap();
        repo.save(&state).unwrap();
        let snapshot = repo.load().unwrap();
        assert_eq!(snapshot.selected_plan, Some(PlanId::OneWeek));
        assert_eq!(snapshot.completed, state.completed);

        assert_eq!(repo.clear().unwrap(), 2);
        assert_eq!(repo.load().unwrap(), TrackerSnapshot::default());
    }

    #[test]
    fn test_false_flags_ignored_and_bad_values_rejected() {
        let (repo, conn) = memory_repo();
        conn.lock()
            .unwrap()
            .execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)",
                params![KEY_COMPLETED_BATCHES, r#"{"p1_d1_b1":true,"p1_d1_b2":false}"#],
            )
            .unwrap();
        let snapshot = repo.load().unwrap();
        assert_eq!(snapshot.completed.len(), 1);

        conn.lock()
            .unwrap()
            .execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, '2weeks')",
                params![KEY_SELECTED_PLAN],
            )
            .unwrap();
        assert!(matches!(
            repo.load(),
            Err(RepositoryError::FieldValueError { .. })
        ));
    }
}
