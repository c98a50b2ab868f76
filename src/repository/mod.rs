// ==========================================
// 销售业绩导入系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod app_kv_repo;
pub mod error;
pub mod import_log_repo;
pub mod performance_record_repo;

// 重导出核心仓储
pub use app_kv_repo::{AppKvRepository, HOLIDAYS_MAP_KEY, LOCKS_MAP_KEY};
pub use error::{RepositoryError, RepositoryResult};
pub use import_log_repo::{ImportLogEntry, ImportLogRepository};
pub use performance_record_repo::PerformanceRecordRepository;
