// ==========================================
// 销售业绩导入系统 - 工作表选择
// ==========================================
// 规则: 表名大小写不敏感匹配
// - 区域渠道: 含 "territory"（兼容常见拼写 "teritory"）
// - 标准渠道: 含 "sales"
// - 无匹配: 回退到第一张表
// ==========================================

use crate::domain::SalesChannel;
use crate::importer::workbook::{SheetGrid, Workbook};

const TERRITORY_MARKERS: [&str; 2] = ["territory", "teritory"];
const SALES_MARKER: &str = "sales";

/// 判断表名是否属于指定渠道
pub fn matches_channel(sheet_name: &str, channel: SalesChannel) -> bool {
    let low = sheet_name.to_lowercase();
    match channel {
        SalesChannel::Territory => TERRITORY_MARKERS.iter().any(|m| low.contains(m)),
        SalesChannel::Standard => low.contains(SALES_MARKER),
    }
}

/// 选择要处理的工作表
///
/// # 返回
/// - None: 仅当工作簿没有任何工作表（调用方应先行校验）
pub fn select_sheet(workbook: &Workbook, channel: SalesChannel) -> Option<&SheetGrid> {
    workbook
        .sheets
        .iter()
        .find(|sheet| matches_channel(&sheet.name, channel))
        .or_else(|| workbook.sheets.first())
}
