// ==========================================
// 销售业绩导入API
// ==========================================
// 职责: 解析工作簿 → 运行导入器 → 原子落库 → 写导入日志
// 红线: 失败时数据集保持不变
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::{seed_records, Department, ImportMode, PerformanceRecord, ReportingPeriod};
use crate::engine::DaySelection;
use crate::importer::{
    ImporterSettings, PerformanceImporter, PerformanceImporterImpl, UniversalWorkbookParser,
    Workbook, WorkbookFormat,
};
use crate::repository::{ImportLogEntry, ImportLogRepository, PerformanceRecordRepository};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// 导入请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRequest {
    pub mode: ImportMode,
    pub period: ReportingPeriod,
    /// 日报所选日期；Master 模式忽略
    #[serde(default)]
    pub days: Vec<u32>,
}

impl ImportRequest {
    /// 月度计划导入请求
    pub fn master(period: ReportingPeriod, territory: bool) -> Self {
        let mode = if territory {
            ImportMode::TERRITORY_MASTER
        } else {
            ImportMode::MASTER
        };
        Self {
            mode,
            period,
            days: Vec::new(),
        }
    }

    /// 日报导入请求（日期取自当前选择）
    pub fn daily(period: ReportingPeriod, selection: &DaySelection, territory: bool) -> Self {
        let mode = if territory {
            ImportMode::TERRITORY_DAILY
        } else {
            ImportMode::DAILY
        };
        Self {
            mode,
            period,
            days: selection.days().to_vec(),
        }
    }
}

/// 导入API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 批次ID
    pub batch_id: String,
    pub department: Department,
    pub sheet_name: String,
    /// 本批导入记录数
    pub imported_count: usize,
    /// 被替换掉的旧记录数
    pub replaced_count: usize,
    /// 本批涉及的报告日期
    pub report_dates: Vec<String>,
    /// 用户可见的统计消息
    pub message: String,
    /// 导入后的完整数据集
    pub dataset: Vec<PerformanceRecord>,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
}

/// 导入API
pub struct ImportApi {
    record_repo: Arc<PerformanceRecordRepository>,
    import_log_repo: Arc<ImportLogRepository>,
    config_manager: Arc<ConfigManager>,
}

impl ImportApi {
    pub fn new(
        record_repo: Arc<PerformanceRecordRepository>,
        import_log_repo: Arc<ImportLogRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            record_repo,
            import_log_repo,
            config_manager,
        }
    }

    fn create_importer(&self) -> ApiResult<PerformanceImporterImpl> {
        let settings = ImporterSettings::from_config(self.config_manager.as_ref())
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        Ok(PerformanceImporterImpl::new(settings))
    }

    /// 当前数据集（首次访问时写入初始记录）
    pub fn list_records(&self) -> ApiResult<Vec<PerformanceRecord>> {
        if self.record_repo.count()? == 0 {
            info!("数据集为空，写入初始记录");
            self.record_repo.replace_all(&seed_records())?;
        }
        Ok(self.record_repo.list_all()?)
    }

    /// 重置数据集为初始记录
    ///
    /// # 返回
    /// - Ok(usize): 重置后的记录数
    pub fn reset_dataset(&self) -> ApiResult<usize> {
        let inserted = self.record_repo.replace_all(&seed_records())?;
        info!(records = inserted, "数据集已重置");
        Ok(inserted)
    }

    /// 导入文件
    ///
    /// # 参数
    /// - file_path: 文件路径（按扩展名识别格式）
    /// - request: 导入模式 / 报告期 / 日期选择
    pub fn import_file(&self, file_path: &str, request: &ImportRequest) -> ApiResult<ImportApiResponse> {
        let workbook = UniversalWorkbookParser.parse_file(file_path)?;
        let file_name = Path::new(file_path)
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_string());
        self.run_import(&workbook, file_name, request)
    }

    /// 导入内存中的工作簿
    ///
    /// # 参数
    /// - bytes: 文件内容
    /// - format: 文件格式
    /// - file_name: 原始文件名（CSV 用其主干作为表名）
    pub fn import_bytes(
        &self,
        bytes: &[u8],
        format: WorkbookFormat,
        file_name: Option<&str>,
        request: &ImportRequest,
    ) -> ApiResult<ImportApiResponse> {
        let sheet_hint = file_name
            .and_then(|n| Path::new(n).file_stem())
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let workbook = UniversalWorkbookParser.parse_bytes(bytes, format, sheet_hint)?;
        self.run_import(&workbook, file_name.map(|n| n.to_string()), request)
    }

    #[instrument(skip_all, fields(mode = %request.mode, period = %request.period))]
    fn run_import(
        &self,
        workbook: &Workbook,
        file_name: Option<String>,
        request: &ImportRequest,
    ) -> ApiResult<ImportApiResponse> {
        let started = Instant::now();
        let batch_id = Uuid::new_v4().to_string();

        let existing = self.list_records()?;
        let importer = self.create_importer()?;
        let outcome = importer.import_workbook(
            workbook,
            request.mode,
            request.period,
            &request.days,
            &existing,
        )?;

        // 删除受影响键 + 写入新记录，单事务
        let removed = self.record_repo.apply_batch(
            outcome.department,
            &outcome.report_dates,
            &outcome.imported,
            &batch_id,
        )?;
        if removed != outcome.replaced_count {
            warn!(
                batch_id = %batch_id,
                removed,
                expected = outcome.replaced_count,
                "落库删除数与合并结果不一致"
            );
        }

        let entry = ImportLogEntry {
            batch_id: batch_id.clone(),
            mode: request.mode.to_string(),
            department: outcome.department.as_str().to_string(),
            period: request.period.to_string(),
            sheet_name: outcome.sheet_name.clone(),
            file_name,
            imported_count: outcome.imported_count(),
            replaced_count: removed,
            report_dates: outcome.report_dates.clone(),
            imported_at: Utc::now(),
        };
        if let Err(e) = self.import_log_repo.insert(&entry) {
            warn!(batch_id = %batch_id, error = %e, "导入日志写入失败");
        }

        let message = outcome.summary_message();
        info!(
            batch_id = %batch_id,
            sheet = %outcome.sheet_name,
            records = outcome.imported_count(),
            dates = outcome.date_count(),
            "导入成功"
        );

        Ok(ImportApiResponse {
            batch_id,
            department: outcome.department,
            sheet_name: outcome.sheet_name.clone(),
            imported_count: outcome.imported_count(),
            replaced_count: removed,
            report_dates: outcome.report_dates.clone(),
            message,
            dataset: outcome.dataset,
            elapsed_ms: started.elapsed().as_millis() as i64,
        })
    }

    /// 最近的导入批次
    pub fn list_import_history(&self, limit: usize) -> ApiResult<Vec<ImportLogEntry>> {
        Ok(self.import_log_repo.list_recent(limit)?)
    }
}
