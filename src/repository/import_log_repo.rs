// ==========================================
// 销售业绩导入系统 - 导入日志仓储
// ==========================================
// 职责: 记录每个成功导入批次（批次号、模式、报告期、涉及日期）
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// 导入批次日志
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportLogEntry {
    pub batch_id: String,
    /// 导入模式名（daily / master / territory-daily / territory-master）
    pub mode: String,
    pub department: String,
    /// 报告期（"January 2024"）
    pub period: String,
    pub sheet_name: String,
    pub file_name: Option<String>,
    pub imported_count: usize,
    pub replaced_count: usize,
    pub report_dates: Vec<String>,
    pub imported_at: DateTime<Utc>,
}

// ==========================================
// ImportLogRepository - 导入日志仓储
// ==========================================
pub struct ImportLogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ImportLogRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 写入批次日志
    pub fn insert(&self, entry: &ImportLogEntry) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO import_log (
                batch_id, mode, department, period, sheet_name, file_name,
                imported_count, replaced_count, report_dates_json, imported_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                entry.batch_id,
                entry.mode,
                entry.department,
                entry.period,
                entry.sheet_name,
                entry.file_name,
                entry.imported_count as i64,
                entry.replaced_count as i64,
                serde_json::to_string(&entry.report_dates)?,
                entry.imported_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// 最近的批次日志（新 → 旧）
    pub fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<ImportLogEntry>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT batch_id, mode, department, period, sheet_name, file_name,
                   imported_count, replaced_count, report_dates_json, imported_at
            FROM import_log
            ORDER BY imported_at DESC, rowid DESC
            LIMIT ?1
            "#,
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, i64>(6)?,
                row.get::<_, i64>(7)?,
                row.get::<_, String>(8)?,
                row.get::<_, String>(9)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (
                batch_id,
                mode,
                department,
                period,
                sheet_name,
                file_name,
                imported_count,
                replaced_count,
                dates_json,
                imported_at,
            ) = row?;

            let imported_at = DateTime::parse_from_rfc3339(&imported_at)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| RepositoryError::FieldValueError {
                    field: "imported_at".to_string(),
                    message: e.to_string(),
                })?;

            entries.push(ImportLogEntry {
                batch_id,
                mode,
                department,
                period,
                sheet_name,
                file_name,
                imported_count: imported_count.max(0) as usize,
                replaced_count: replaced_count.max(0) as usize,
                report_dates: serde_json::from_str(&dates_json)?,
                imported_at,
            });
        }
        Ok(entries)
    }
}
