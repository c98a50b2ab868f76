// ==========================================
// 销售业绩导入系统 - 应用层
// ==========================================
// 职责: 组装仓储与API,供宿主应用 / 命令行使用
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState, DB_PATH_ENV};
