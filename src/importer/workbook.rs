// ==========================================
// 销售业绩导入系统 - 工作簿加载
// ==========================================
// 支持: Excel (.xlsx/.xls/.xlsm/.ods) / CSV (.csv)
// 约束: 单元格坐标以工作表已用区域的左上角为原点
// ==========================================

use crate::importer::error::{IngestError, IngestResult};
use crate::importer::importer_trait::WorkbookParser;
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use csv::ReaderBuilder;
use std::io::Cursor;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use tracing::{debug, warn};

// ==========================================
// SheetGrid - 内存中的工作表
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGrid {
    pub name: String,
    rows: Vec<Vec<Data>>,
}

impl SheetGrid {
    /// 由行数据构造（第 0 行即已用区域的首行）
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<Data>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// 由 calamine Range 构造，坐标相对于 Range 起点
    ///
    /// 首个已用列即第 0 列，表头扫描窗口从首个已用行开始计数
    pub fn from_range(name: impl Into<String>, range: &Range<Data>) -> Self {
        let rows = range.rows().map(|row| row.to_vec()).collect();
        Self::from_rows(name, rows)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Data]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// 读取单元格（越界返回 None）
    pub fn cell(&self, row: usize, col: usize) -> Option<&Data> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

// ==========================================
// Workbook - 有序工作表集合
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<SheetGrid>,
}

impl Workbook {
    pub fn new(sheets: Vec<SheetGrid>) -> Self {
        Self { sheets }
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

// ==========================================
// WorkbookFormat - 输入格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// xlsx / xls / xlsm / ods，由 calamine 按内容识别
    Spreadsheet,
    Csv,
}

impl WorkbookFormat {
    /// 按扩展名识别格式
    pub fn from_path(path: &Path) -> IngestResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Ok(WorkbookFormat::Spreadsheet),
            "csv" => Ok(WorkbookFormat::Csv),
            _ => Err(IngestError::UnsupportedFormat(ext)),
        }
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelWorkbookParser;

impl ExcelWorkbookParser {
    fn read_all_sheets(bytes: &[u8]) -> IngestResult<Workbook> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            match workbook.worksheet_range(&name) {
                Ok(range) => sheets.push(SheetGrid::from_range(name, &range)),
                Err(e) => {
                    return Err(IngestError::MalformedWorkbook(format!(
                        "工作表 {} 读取失败: {}",
                        name, e
                    )))
                }
            }
        }

        Ok(Workbook::new(sheets))
    }
}

impl WorkbookParser for ExcelWorkbookParser {
    fn parse_bytes(&self, bytes: &[u8], _sheet_hint: &str) -> IngestResult<Workbook> {
        // 解码过程中的 panic 统一归类为 MalformedWorkbook
        let outcome = catch_unwind(AssertUnwindSafe(|| Self::read_all_sheets(bytes)));

        match outcome {
            Ok(result) => {
                if let Ok(wb) = &result {
                    debug!(sheets = ?wb.sheet_names(), "Excel 解析完成");
                }
                result
            }
            Err(_) => {
                warn!("Excel 解码过程中发生 panic，按格式错误处理");
                Err(IngestError::MalformedWorkbook(
                    "workbook decoder panicked".to_string(),
                ))
            }
        }
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
// CSV 只有一张表，表名取文件名主干（用于工作表选择）
pub struct CsvWorkbookParser;

impl WorkbookParser for CsvWorkbookParser {
    fn parse_bytes(&self, bytes: &[u8], sheet_hint: &str) -> IngestResult<Workbook> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: Vec<Data> = record
                .iter()
                .map(|value| {
                    if value.trim().is_empty() {
                        Data::Empty
                    } else {
                        Data::String(value.to_string())
                    }
                })
                .collect();
            rows.push(row);
        }

        let name = if sheet_hint.trim().is_empty() {
            "Sheet1".to_string()
        } else {
            sheet_hint.trim().to_string()
        };

        debug!(sheet = %name, rows = rows.len(), "CSV 解析完成");
        Ok(Workbook::new(vec![SheetGrid::from_rows(name, rows)]))
    }
}

// ==========================================
// 通用解析器（根据格式自动选择）
// ==========================================
pub struct UniversalWorkbookParser;

impl UniversalWorkbookParser {
    /// 解析内存中的工作簿
    pub fn parse_bytes(
        &self,
        bytes: &[u8],
        format: WorkbookFormat,
        sheet_hint: &str,
    ) -> IngestResult<Workbook> {
        match format {
            WorkbookFormat::Spreadsheet => ExcelWorkbookParser.parse_bytes(bytes, sheet_hint),
            WorkbookFormat::Csv => CsvWorkbookParser.parse_bytes(bytes, sheet_hint),
        }
    }

    /// 读取并解析文件
    pub fn parse_file<P: AsRef<Path>>(&self, file_path: P) -> IngestResult<Workbook> {
        let path = file_path.as_ref();
        let format = WorkbookFormat::from_path(path)?;
        let bytes = std::fs::read(path)?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        self.parse_bytes(&bytes, format, stem)
    }
}
