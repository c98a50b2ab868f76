// ==========================================
// 销售业绩导入系统 - 业绩记录仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 批次替换在单个事务内完成，观察者看不到半更新状态
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::{Department, PerformanceRecord, RecordStatus, Unit};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row, Transaction};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = r#"
    SELECT department, team, metric, plan, actual, variance, unit, status, report_date, reasoning
    FROM performance_record
"#;

// ==========================================
// PerformanceRecordRepository - 业绩记录仓储
// ==========================================
/// 职责: 管理 performance_record 表
pub struct PerformanceRecordRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PerformanceRecordRepository {
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

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<PerformanceRecord> {
        let department_raw: String = row.get(0)?;
        let department = Department::from_db_str(&department_raw).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                format!("unknown department: {}", department_raw).into(),
            )
        })?;

        Ok(PerformanceRecord {
            department,
            team: row.get(1)?,
            metric: row.get(2)?,
            plan: row.get(3)?,
            actual: row.get(4)?,
            variance: row.get(5)?,
            unit: Unit::from_db_str(&row.get::<_, String>(6)?),
            status: RecordStatus::from_db_str(&row.get::<_, String>(7)?),
            report_date: row.get(8)?,
            reasoning: row.get(9)?,
        })
    }

    fn insert_all(
        tx: &Transaction<'_>,
        records: &[PerformanceRecord],
        batch_id: Option<&str>,
    ) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO performance_record (
                department, team, metric, plan, actual, variance,
                unit, status, report_date, reasoning, batch_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )?;

        for record in records {
            stmt.execute(params![
                record.department.as_str(),
                record.team,
                record.metric,
                record.plan,
                record.actual,
                record.variance,
                record.unit.as_str(),
                record.status.as_str(),
                record.report_date,
                record.reasoning,
                batch_id,
            ])?;
        }
        Ok(records.len())
    }

    /// 查询全部记录（按写入顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<PerformanceRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY record_id", SELECT_COLUMNS))?;
        let records = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// 按 (部门, 报告日期) 查询
    pub fn list_by_key(
        &self,
        department: Department,
        report_date: &str,
    ) -> RepositoryResult<Vec<PerformanceRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE department = ?1 AND report_date = ?2 ORDER BY record_id",
            SELECT_COLUMNS
        ))?;
        let records = stmt
            .query_map(params![department.as_str(), report_date], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// 记录总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM performance_record", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }

    /// 批次替换：删除目标部门下这些报告日期的旧记录，写入新记录
    ///
    /// # 返回
    /// - Ok(usize): 被删除的旧记录数
    pub fn apply_batch(
        &self,
        department: Department,
        report_dates: &[String],
        records: &[PerformanceRecord],
        batch_id: &str,
    ) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut removed = 0;
        {
            let mut delete = tx.prepare(
                "DELETE FROM performance_record WHERE department = ?1 AND report_date = ?2",
            )?;
            for date in report_dates {
                removed += delete.execute(params![department.as_str(), date])?;
            }
        }

        Self::insert_all(&tx, records, Some(batch_id))?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(removed)
    }

    /// 整体替换数据集（数据集重置时使用）
    pub fn replace_all(&self, records: &[PerformanceRecord]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute("DELETE FROM performance_record", [])?;
        let inserted = Self::insert_all(&tx, records, None)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{seed_records, ImportKind};
    use tempfile::NamedTempFile;

    fn repo() -> (NamedTempFile, PerformanceRecordRepository) {
        let temp = NamedTempFile::new().unwrap();
        let repo = PerformanceRecordRepository::new(temp.path().to_str().unwrap()).unwrap();
        (temp, repo)
    }

    fn daily(dept: Department, metric: &str, value: f64, date: &str) -> PerformanceRecord {
        PerformanceRecord::imported(dept, "Concord", metric, value, ImportKind::Daily, Unit::Units, date)
    }

    #[test]
    fn test_replace_all_roundtrips_seed() {
        let (_temp, repo) = repo();
        repo.replace_all(&seed_records()).unwrap();
        assert_eq!(repo.list_all().unwrap(), seed_records());
    }

    #[test]
    fn test_apply_batch_replaces_only_matching_keys() {
        let (_temp, repo) = repo();
        repo.replace_all(&[
            daily(Department::Sales, "A", 1.0, "January 01, 2024"),
            daily(Department::Sales, "B", 2.0, "January 02, 2024"),
            daily(Department::TerritorySales, "A", 3.0, "January 01, 2024"),
        ])
        .unwrap();

        let incoming = vec![daily(Department::Sales, "C", 7.0, "January 01, 2024")];
        let removed = repo
            .apply_batch(
                Department::Sales,
                &["January 01, 2024".to_string()],
                &incoming,
                "batch-1",
            )
            .unwrap();

        assert_eq!(removed, 1);
        assert_eq!(repo.count().unwrap(), 3);
        let day_one = repo
            .list_by_key(Department::Sales, "January 01, 2024")
            .unwrap();
        assert_eq!(day_one, incoming);
        assert_eq!(
            repo.list_by_key(Department::TerritorySales, "January 01, 2024")
                .unwrap()
                .len(),
            1
        );
    }
}
