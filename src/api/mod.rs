// ==========================================
// 销售业绩导入系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供宿主应用 / 命令行调用
// ==========================================

pub mod calendar_api;
pub mod error;
pub mod import_api;

// 重导出核心类型
pub use calendar_api::{CalendarApi, MonthOverview};
pub use error::{ApiError, ApiResult};
pub use import_api::{ImportApi, ImportApiResponse, ImportRequest};
