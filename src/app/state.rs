// ==========================================
// 销售业绩导入系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享连接和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{CalendarApi, ImportApi};
use crate::config::config_manager::ConfigManager;
use crate::db::{ensure_schema, open_sqlite_connection};
use crate::repository::{AppKvRepository, ImportLogRepository, PerformanceRecordRepository};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "SWISS_OPS_DB_PATH";

/// 应用状态
///
/// 所有仓储共享同一个连接，并发导入由连接互斥锁串行化
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 导入API
    pub import_api: Arc<ImportApi>,

    /// 假期日历API
    pub calendar_api: Arc<CalendarApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        ensure_schema(&conn).map_err(|e| format!("数据库建表失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let record_repo = Arc::new(PerformanceRecordRepository::from_connection(conn.clone()));
        let import_log_repo = Arc::new(ImportLogRepository::from_connection(conn.clone()));
        let kv_repo = Arc::new(AppKvRepository::from_connection(conn.clone()));

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        // ==========================================
        // 初始化API层
        // ==========================================
        let import_api = Arc::new(ImportApi::new(
            record_repo,
            import_log_repo,
            config_manager.clone(),
        ));
        let calendar_api = Arc::new(CalendarApi::new(kv_repo, config_manager.clone()));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            import_api,
            calendar_api,
            config_manager,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先读取 SWISS_OPS_DB_PATH，否则放在用户数据目录下
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./swiss_ops.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("swiss-ops-ingest");
        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("swiss_ops.db");
        }
    }

    path.to_string_lossy().to_string()
}
