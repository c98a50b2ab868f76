// ==========================================
// 销售业绩导入系统 - 导入层
// ==========================================
// 职责: 工作簿解析 → 单元格规整 → 选表 → 定位列 → 提取 → 替换合并
// 支持: xlsx / xls / xlsm / ods (calamine), CSV (csv)
// ==========================================

// 模块声明
pub mod cell;
pub mod column_locator;
pub mod error;
pub mod importer_trait;
pub mod performance_importer;
pub mod reconciler;
pub mod row_extractor;
pub mod sheet_selector;
pub mod workbook;

// 重导出核心类型
pub use error::{IngestError, IngestResult};
pub use performance_importer::{
    normalize_days, ImportOutcome, ImporterSettings, PerformanceImporterImpl,
    MASTER_SYNTHETIC_DAY,
};
pub use reconciler::{group_by_key, reconcile, ReconcileSummary};
pub use workbook::{
    CsvWorkbookParser, ExcelWorkbookParser, SheetGrid, UniversalWorkbookParser, Workbook,
    WorkbookFormat,
};

// 重导出 Trait 接口
pub use importer_trait::{PerformanceImporter, WorkbookParser};
