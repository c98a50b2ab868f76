// ==========================================
// 销售业绩导入系统 - 引擎层
// ==========================================
// 职责: 日历与选择规则,不拼 SQL
// 红线: Engine 不拼 SQL, 持久化由 API 层经 Repository 完成
// ==========================================

pub mod admin;
pub mod day_selection;
pub mod holiday_calendar;

// 重导出核心引擎
pub use admin::AdminSession;
pub use day_selection::DaySelection;
pub use holiday_calendar::{CalendarError, CalendarResult, HolidayCalendar};
