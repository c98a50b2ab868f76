// ==========================================
// 销售业绩导入系统 - 数据列定位
// ==========================================
// Master 模式: 在表头窗口中找 TGT / TARGET / PLAN 标记列
// Daily 模式: 在表头窗口中找 D/M/Y 形式的日期列，生成 日 → 列 映射
// 约束: 只扫描有限窗口，找不到时返回 None 而不是哨兵下标
// ==========================================

use crate::importer::cell::{decode_serial_header, leading_day_number, to_trimmed_text};
use crate::importer::workbook::SheetGrid;
use calamine::Data;
use std::collections::BTreeMap;

/// 计划列标记（大写比较）
pub const PLAN_MARKERS: [&str; 3] = ["TGT", "TARGET", "PLAN"];

/// 扫描窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    pub rows: usize,
    pub cols: usize,
}

impl ScanWindow {
    pub const MASTER_DEFAULT: ScanWindow = ScanWindow { rows: 10, cols: 30 };
    pub const DAILY_DEFAULT: ScanWindow = ScanWindow { rows: 10, cols: 150 };
}

/// 日 → 列下标
pub type DayColumnMap = BTreeMap<u32, usize>;

/// 定位计划值所在列（按行优先顺序取第一个标记）
pub fn locate_plan_column(sheet: &SheetGrid, window: ScanWindow) -> Option<usize> {
    for row in 0..window.rows.min(sheet.row_count()) {
        for col in 0..window.cols {
            let text = to_trimmed_text(sheet.cell(row, col)).to_uppercase();
            if PLAN_MARKERS.contains(&text.as_str()) {
                return Some(col);
            }
        }
    }
    None
}

/// 表头单元格 → 日期中的"日"
///
/// 纯数字且超过序列号阈值的单元格先解码为 D/M/Y，
/// 然后要求恰好三段斜杠分隔，且第一段以整数开头
pub fn header_day(cell: Option<&Data>) -> Option<u32> {
    let mut text = to_trimmed_text(cell);
    if let Some(decoded) = decode_serial_header(&text) {
        text = decoded;
    }

    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    leading_day_number(parts[0])
}

/// 构建 日 → 列 映射（同一日多次出现时后者覆盖前者）
pub fn build_day_column_map(sheet: &SheetGrid, window: ScanWindow) -> DayColumnMap {
    let mut map = DayColumnMap::new();
    for row in 0..window.rows.min(sheet.row_count()) {
        for col in 0..window.cols {
            if let Some(day) = header_day(sheet.cell(row, col)) {
                map.insert(day, col);
            }
        }
    }
    map
}
