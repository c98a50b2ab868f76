// ==========================================
// 销售业绩导入系统 - 应用键值仓储
// ==========================================
// 职责: 以不透明字符串为键保存 JSON 值（假期映射 / 锁定映射）
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// 假期映射存储键
pub const HOLIDAYS_MAP_KEY: &str = "holidaysMap";

/// 锁定映射存储键
pub const LOCKS_MAP_KEY: &str = "locksMap";

// ==========================================
// AppKvRepository - 键值仓储
// ==========================================
pub struct AppKvRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AppKvRepository {
    /// 创建新的仓储实例（自动建表）
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取键值（不存在返回 None）
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> RepositoryResult<Option<T>> {
        let conn = self.get_conn()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value_json FROM app_kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// 写入键值（UPSERT）
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> RepositoryResult<()> {
        let json = serde_json::to_string(value)?;
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO app_kv (key, value_json) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value_json = ?2, updated_at = datetime('now')
            "#,
            params![key, json],
        )?;
        Ok(())
    }
}
