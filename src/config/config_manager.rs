// ==========================================
// 销售业绩导入系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::import_config_trait::IngestConfigReader;
use crate::db::open_sqlite_connection;
use crate::domain::Unit;
use crate::importer::row_extractor::DEFAULT_TEAMS;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
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
        crate::db::ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
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

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 读取正整数配置，非法值回退默认值
    fn get_usize_or_default(&self, key: &str, default: usize) -> Result<usize, Box<dyn Error>> {
        let value = self.get_config_or_default(key, &default.to_string())?;
        match value.trim().parse::<usize>() {
            Ok(v) if v > 0 => Ok(v),
            _ => {
                tracing::warn!(config_key = key, raw_value = %value, "配置值非法，使用默认值");
                Ok(default)
            }
        }
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: HashMap<String, String> = HashMap::new();
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
}

// ==========================================
// IngestConfigReader Trait 实现
// ==========================================
impl IngestConfigReader for ConfigManager {
    // ===== 团队配置 =====

    fn get_known_teams(&self) -> Result<Vec<String>, Box<dyn Error>> {
        let default = DEFAULT_TEAMS.join(",");
        let value = self.get_config_or_default(config_keys::KNOWN_TEAMS, &default)?;

        let teams: Vec<String> = value
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();

        if teams.is_empty() {
            Ok(DEFAULT_TEAMS.iter().map(|t| t.to_string()).collect())
        } else {
            Ok(teams)
        }
    }

    // ===== 表头扫描窗口 =====

    fn get_master_scan_rows(&self) -> Result<usize, Box<dyn Error>> {
        self.get_usize_or_default(config_keys::MASTER_SCAN_ROWS, 10)
    }

    fn get_master_scan_cols(&self) -> Result<usize, Box<dyn Error>> {
        self.get_usize_or_default(config_keys::MASTER_SCAN_COLS, 30)
    }

    fn get_daily_scan_rows(&self) -> Result<usize, Box<dyn Error>> {
        self.get_usize_or_default(config_keys::DAILY_SCAN_ROWS, 10)
    }

    fn get_daily_scan_cols(&self) -> Result<usize, Box<dyn Error>> {
        self.get_usize_or_default(config_keys::DAILY_SCAN_COLS, 150)
    }

    // ===== 记录默认值 =====

    fn get_default_unit(&self) -> Result<Unit, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::DEFAULT_UNIT, "Units")?;
        Ok(Unit::from_db_str(&value))
    }

    // ===== 管理员 =====

    fn get_admin_pin(&self) -> Result<String, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::ADMIN_PIN, "786")?;
        Ok(value.trim().to_string())
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 团队
    pub const KNOWN_TEAMS: &str = "known_teams";

    // 表头扫描窗口
    pub const MASTER_SCAN_ROWS: &str = "master_scan_rows";
    pub const MASTER_SCAN_COLS: &str = "master_scan_cols";
    pub const DAILY_SCAN_ROWS: &str = "daily_scan_rows";
    pub const DAILY_SCAN_COLS: &str = "daily_scan_cols";

    // 记录默认值
    pub const DEFAULT_UNIT: &str = "default_unit";

    // 管理员
    pub const ADMIN_PIN: &str = "admin_pin";
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn manager() -> (NamedTempFile, ConfigManager) {
        let temp = NamedTempFile::new().unwrap();
        let mgr = ConfigManager::new(temp.path().to_str().unwrap()).unwrap();
        (temp, mgr)
    }

    #[test]
    fn test_defaults_when_unset() {
        let (_temp, mgr) = manager();
        assert_eq!(
            mgr.get_known_teams().unwrap(),
            vec!["ACHIEVERS", "PASSIONATE", "CONCORD", "DYNAMIC"]
        );
        assert_eq!(mgr.get_master_scan_rows().unwrap(), 10);
        assert_eq!(mgr.get_master_scan_cols().unwrap(), 30);
        assert_eq!(mgr.get_daily_scan_cols().unwrap(), 150);
        assert_eq!(mgr.get_default_unit().unwrap(), Unit::Units);
        assert_eq!(mgr.get_admin_pin().unwrap(), "786");
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let (_temp, mgr) = manager();
        mgr.set_global_config_value(config_keys::KNOWN_TEAMS, "north, south ,")
            .unwrap();
        mgr.set_global_config_value(config_keys::DAILY_SCAN_COLS, "40").unwrap();
        mgr.set_global_config_value(config_keys::MASTER_SCAN_ROWS, "zero").unwrap();

        assert_eq!(mgr.get_known_teams().unwrap(), vec!["NORTH", "SOUTH"]);
        assert_eq!(mgr.get_daily_scan_cols().unwrap(), 40);
        assert_eq!(mgr.get_master_scan_rows().unwrap(), 10);

        let snapshot: HashMap<String, String> =
            serde_json::from_str(&mgr.get_config_snapshot().unwrap()).unwrap();
        assert_eq!(snapshot.get("daily_scan_cols"), Some(&"40".to_string()));
    }
}
