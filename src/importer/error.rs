// ==========================================
// 销售业绩导入系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约束: 每种错误都必须能渲染为一行用户消息
// ==========================================

use crate::i18n::t_with_args;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestError {
    // ===== 文件相关错误 =====
    #[error("工作簿解析失败: {0}")]
    MalformedWorkbook(String),

    #[error("工作簿不含任何工作表")]
    EmptyWorkbook,

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.xlsm/.ods/.csv）")]
    UnsupportedFormat(String),

    // ===== 请求校验错误 =====
    #[error("日期选择无效: {0}")]
    InvalidSelection(String),

    // ===== 定位/提取错误 =====
    #[error("未找到所选日期对应的列: {days:?}")]
    NoMatchingColumns { days: Vec<u32> },

    #[error("已定位列但无有效数据行: {days:?}")]
    EmptyExtraction { days: Vec<u32> },
}

impl IngestError {
    /// 渲染单行用户消息
    ///
    /// NoMatchingColumns 与 EmptyExtraction 对用户呈现同一消息，仅日志中区分
    pub fn user_message(&self) -> String {
        match self {
            IngestError::MalformedWorkbook(_) | IngestError::EmptyWorkbook => {
                t_with_args("import.malformed_workbook", &[])
            }
            IngestError::UnsupportedFormat(ext) => {
                t_with_args("import.unsupported_format", &[("ext", ext)])
            }
            IngestError::InvalidSelection(detail) => {
                t_with_args("import.invalid_selection", &[("detail", detail)])
            }
            IngestError::NoMatchingColumns { days } | IngestError::EmptyExtraction { days } => {
                if days.is_empty() {
                    t_with_args("import.no_master_column", &[])
                } else {
                    let list = days
                        .iter()
                        .map(|d| d.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    t_with_args("import.no_matching_columns", &[("days", &list)])
                }
            }
        }
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for IngestError {
    fn from(err: calamine::Error) -> Self {
        IngestError::MalformedWorkbook(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        IngestError::MalformedWorkbook(err.to_string())
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        IngestError::MalformedWorkbook(err.to_string())
    }
}

/// Result 类型别名
pub type IngestResult<T> = Result<T, IngestError>;
