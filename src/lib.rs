// ==========================================
// 销售业绩导入系统 - 核心库
// ==========================================
// 职责: 月度计划 / 日报销售表格导入，按 (部门, 报告日期) 替换合并
// 技术栈: Rust + calamine + SQLite
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 工作簿解析与对账
pub mod importer;

// 引擎层 - 日历与选择规则
pub mod engine;

// 数据仓储层 - 数据访问
pub mod repository;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Department, HolidayMap, ImportKind, ImportMode, LockMap, PerformanceRecord, RecordStatus,
    ReportKey, ReportingPeriod, SalesChannel, Unit,
};

// 导入
pub use importer::{
    ImportOutcome, IngestError, IngestResult, PerformanceImporter, PerformanceImporterImpl,
    UniversalWorkbookParser, Workbook, WorkbookFormat,
};

// 引擎
pub use engine::{AdminSession, DaySelection, HolidayCalendar};

// API
pub use api::{ApiError, ApiResult, CalendarApi, ImportApi, ImportApiResponse, ImportRequest};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Swiss Ops Ingest";
