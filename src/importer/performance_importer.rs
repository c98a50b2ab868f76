// ==========================================
// 销售业绩导入系统 - 业绩导入器实现
// ==========================================
// 职责: 串联导入流程，整批成功或整批失败
// 流程: 选表 → 定位列(一次) → 按日提取 → 合并 → 替换
// ==========================================

use crate::config::IngestConfigReader;
use crate::domain::{Department, ImportMode, PerformanceRecord, ReportingPeriod, Unit};
use crate::i18n::t_with_args;
use crate::importer::column_locator::{
    build_day_column_map, locate_plan_column, DayColumnMap, ScanWindow,
};
use crate::importer::error::{IngestError, IngestResult};
use crate::importer::importer_trait::PerformanceImporter;
use crate::importer::reconciler::reconcile;
use crate::importer::row_extractor::{extract_records, ExtractionContext, DEFAULT_TEAMS};
use crate::importer::sheet_selector::select_sheet;
use crate::importer::workbook::Workbook;
use serde::{Deserialize, Serialize};
use std::error::Error;
use tracing::{debug, info, instrument, warn};

/// Master 模式下的合成日期（不参与日期校验）
pub const MASTER_SYNTHETIC_DAY: u32 = 0;

// ==========================================
// ImporterSettings - 导入参数
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ImporterSettings {
    /// 已知团队名（大写比较）
    pub known_teams: Vec<String>,
    pub master_window: ScanWindow,
    pub daily_window: ScanWindow,
    pub default_unit: Unit,
}

impl Default for ImporterSettings {
    fn default() -> Self {
        Self {
            known_teams: DEFAULT_TEAMS.iter().map(|t| t.to_string()).collect(),
            master_window: ScanWindow::MASTER_DEFAULT,
            daily_window: ScanWindow::DAILY_DEFAULT,
            default_unit: Unit::Units,
        }
    }
}

impl ImporterSettings {
    /// 从配置读取器加载
    pub fn from_config<C: IngestConfigReader + ?Sized>(config: &C) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            known_teams: config.get_known_teams()?,
            master_window: ScanWindow {
                rows: config.get_master_scan_rows()?,
                cols: config.get_master_scan_cols()?,
            },
            daily_window: ScanWindow {
                rows: config.get_daily_scan_rows()?,
                cols: config.get_daily_scan_cols()?,
            },
            default_unit: config.get_default_unit()?,
        })
    }
}

// ==========================================
// ImportOutcome - 导入结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub department: Department,
    /// 实际处理的工作表
    pub sheet_name: String,
    /// 合并后的完整数据集
    pub dataset: Vec<PerformanceRecord>,
    /// 本批新记录
    pub imported: Vec<PerformanceRecord>,
    /// 本批涉及的报告日期
    pub report_dates: Vec<String>,
    /// 被替换掉的旧记录数
    pub replaced_count: usize,
}

impl ImportOutcome {
    pub fn imported_count(&self) -> usize {
        self.imported.len()
    }

    pub fn date_count(&self) -> usize {
        self.report_dates.len()
    }

    /// 用户可见的统计消息
    pub fn summary_message(&self) -> String {
        t_with_args(
            "import.success",
            &[
                ("count", &self.imported_count().to_string()),
                ("dates", &self.date_count().to_string()),
            ],
        )
    }
}

/// 校验并规整日期选择
///
/// # 规则
/// - Master 模式: 忽略输入，固定为单个合成日期
/// - Daily 模式: 不能为空，每一天必须在 1..=当月天数，重复值只保留第一次
pub fn normalize_days(
    mode: ImportMode,
    period: ReportingPeriod,
    days: &[u32],
) -> IngestResult<Vec<u32>> {
    if mode.is_master() {
        return Ok(vec![MASTER_SYNTHETIC_DAY]);
    }

    if days.is_empty() {
        return Err(IngestError::InvalidSelection(
            "at least one day must be selected".to_string(),
        ));
    }

    let max_day = period.days_in_month();
    let mut normalized = Vec::with_capacity(days.len());
    for &day in days {
        if day == 0 || day > max_day {
            return Err(IngestError::InvalidSelection(format!(
                "day {} is outside {} (1..={})",
                day, period, max_day
            )));
        }
        if !normalized.contains(&day) {
            normalized.push(day);
        }
    }
    Ok(normalized)
}

/// 列定位结果
enum ColumnPlan {
    Master(usize),
    Daily(DayColumnMap),
}

// ==========================================
// PerformanceImporterImpl - 业绩导入器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct PerformanceImporterImpl {
    settings: ImporterSettings,
}

impl PerformanceImporterImpl {
    pub fn new(settings: ImporterSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ImporterSettings {
        &self.settings
    }
}

impl PerformanceImporter for PerformanceImporterImpl {
    #[instrument(skip_all, fields(mode = %mode, period = %period, days = ?days))]
    fn import_workbook(
        &self,
        workbook: &Workbook,
        mode: ImportMode,
        period: ReportingPeriod,
        days: &[u32],
        existing: &[PerformanceRecord],
    ) -> IngestResult<ImportOutcome> {
        // === 步骤 0: 请求校验 ===
        let target_days = normalize_days(mode, period, days)?;

        // === 步骤 1: 选择工作表 ===
        let sheet = select_sheet(workbook, mode.channel).ok_or(IngestError::EmptyWorkbook)?;
        info!(sheet = %sheet.name, rows = sheet.row_count(), "已选择工作表");

        // === 步骤 2: 定位列（整批只做一次）===
        let plan = if mode.is_master() {
            match locate_plan_column(sheet, self.settings.master_window) {
                Some(col) => ColumnPlan::Master(col),
                None => {
                    warn!(sheet = %sheet.name, "未找到 TGT/TARGET/PLAN 标记列");
                    return Err(IngestError::NoMatchingColumns { days: Vec::new() });
                }
            }
        } else {
            let map = build_day_column_map(sheet, self.settings.daily_window);
            debug!(day_columns = ?map, "日期列映射完成");
            ColumnPlan::Daily(map)
        };

        // === 步骤 3: 按日提取 ===
        let department = mode.department();
        let mut batch: Vec<PerformanceRecord> = Vec::new();
        let mut resolved_columns = 0usize;

        for &day in &target_days {
            let (column, label) = match &plan {
                ColumnPlan::Master(col) => (*col, period.master_label()),
                ColumnPlan::Daily(map) => match map.get(&day) {
                    Some(col) => (*col, period.daily_label(day)),
                    None => {
                        debug!(day, "所选日期无对应列");
                        continue;
                    }
                },
            };
            resolved_columns += 1;

            let ctx = ExtractionContext {
                department,
                kind: mode.kind,
                unit: self.settings.default_unit,
                report_date: &label,
                known_teams: &self.settings.known_teams,
            };
            let records = extract_records(sheet, column, &ctx);
            debug!(day, column, report_date = %label, records = records.len(), "提取完成");
            batch.extend(records);
        }

        // === 步骤 4: 空结果判定 ===
        if batch.is_empty() {
            let reported_days = if mode.is_master() {
                Vec::new()
            } else {
                target_days.clone()
            };
            if resolved_columns == 0 {
                warn!(days = ?reported_days, "所选日期均未找到对应列");
                return Err(IngestError::NoMatchingColumns {
                    days: reported_days,
                });
            }
            warn!(days = ?reported_days, resolved_columns, "已定位列但无有效数据行");
            return Err(IngestError::EmptyExtraction {
                days: reported_days,
            });
        }

        // === 步骤 5: 按 (部门, 报告日期) 替换 ===
        let imported = batch.clone();
        let (dataset, summary) = reconcile(existing, batch, department);
        info!(
            imported = summary.inserted,
            replaced = summary.removed,
            dates = summary.report_dates.len(),
            "导入合并完成"
        );

        Ok(ImportOutcome {
            department,
            sheet_name: sheet.name.clone(),
            dataset,
            imported,
            report_dates: summary.report_dates,
            replaced_count: summary.removed,
        })
    }
}
