// ==========================================
// 销售业绩导入系统 - API层错误类型
// ==========================================
// 职责: 汇总导入 / 日历 / 仓储错误，统一渲染为单行用户消息
// 约束: 任何失败都不得留下半更新的数据集
// ==========================================

use crate::engine::CalendarError;
use crate::i18n::t_with_args;
use crate::importer::IngestError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务错误
    // ==========================================
    #[error("导入失败: {0}")]
    Import(#[from] IngestError),

    #[error("日历操作被拒绝: {0}")]
    Calendar(#[from] CalendarError),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("配置读取失败: {0}")]
    ConfigError(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 面向用户的单行提示
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Import(e) => e.user_message(),
            ApiError::Calendar(e) => e.user_message(),
            ApiError::InvalidInput(detail) => {
                t_with_args("common.invalid_input", &[("detail", detail)])
            }
            other => t_with_args("common.system_error", &[("detail", &other.to_string())]),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::InvalidInput(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::DatabaseQueryError(msg)
            | RepositoryError::UniqueConstraintViolation(msg) => ApiError::DatabaseError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::DatabaseError(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::SerializationError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
