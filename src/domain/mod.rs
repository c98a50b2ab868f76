// ==========================================
// 销售业绩导入系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含导入逻辑
// ==========================================

pub mod calendar;
pub mod record;
pub mod types;

// 重导出核心类型
pub use calendar::{HolidayMap, LockMap, ReportingPeriod};
pub use record::{seed_records, PerformanceRecord, ReportKey};
pub use types::{Department, ImportKind, ImportMode, RecordStatus, SalesChannel, Unit};
