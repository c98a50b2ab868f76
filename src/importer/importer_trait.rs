// ==========================================
// 销售业绩导入系统 - 导入接口 Trait
// ==========================================
// 职责: 定义导入各阶段的接口（不包含实现）
// ==========================================

use crate::domain::{ImportMode, PerformanceRecord, ReportingPeriod};
use crate::importer::error::IngestResult;
use crate::importer::performance_importer::ImportOutcome;
use crate::importer::workbook::Workbook;

// ==========================================
// WorkbookParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: ExcelWorkbookParser, CsvWorkbookParser
pub trait WorkbookParser: Send + Sync {
    /// 解析内存中的文件内容为工作簿
    ///
    /// # 参数
    /// - bytes: 文件内容
    /// - sheet_hint: 无表名格式（CSV）使用的工作表名
    ///
    /// # 返回
    /// - Ok(Workbook): 有序工作表集合
    /// - Err: MalformedWorkbook
    fn parse_bytes(&self, bytes: &[u8], sheet_hint: &str) -> IngestResult<Workbook>;
}

// ==========================================
// PerformanceImporter Trait
// ==========================================
// 用途: 业绩导入主接口
// 实现者: PerformanceImporterImpl
pub trait PerformanceImporter: Send + Sync {
    /// 导入一个已解析的工作簿
    ///
    /// # 参数
    /// - workbook: 已解析的工作簿
    /// - mode: 导入模式（master/daily × standard/territory）
    /// - period: 报告期（年, 月）
    /// - days: 所选日期（master 模式忽略）
    /// - existing: 当前数据集
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 合并后的数据集 + 统计
    /// - Err: 整批失败，数据集不变
    ///
    /// # 导入流程
    /// 1. 选择工作表
    /// 2. 定位列（只做一次）
    /// 3. 按日提取记录
    /// 4. 合并所有日期的记录
    /// 5. 按 (部门, 报告日期) 替换
    fn import_workbook(
        &self,
        workbook: &Workbook,
        mode: ImportMode,
        period: ReportingPeriod,
        days: &[u32],
        existing: &[PerformanceRecord],
    ) -> IngestResult<ImportOutcome>;
}
