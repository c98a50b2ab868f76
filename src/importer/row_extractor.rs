// ==========================================
// 销售业绩导入系统 - 行分类与记录提取
// ==========================================
// 规则: 单次顺序扫描，显式维护"当前团队"
// 1. 首列与团队名完全相同（忽略大小写）→ 切换当前团队，跳过该行
// 2. 首列为空 / 尚无当前团队 / ROW LABELS / 含 TOTAL / 等于 ACTUAL → 跳过
// 3. 其余为数据行：目标列数值非零才产出记录
// ==========================================

use crate::domain::{Department, ImportKind, PerformanceRecord, Unit};
use crate::importer::cell::{to_numeric, to_trimmed_text};
use crate::importer::workbook::SheetGrid;

/// 默认团队名（大写）
pub const DEFAULT_TEAMS: [&str; 4] = ["ACHIEVERS", "PASSIONATE", "CONCORD", "DYNAMIC"];

/// 行分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowClass {
    /// 团队分段标题（已转首字母大写）
    TeamHeader(String),
    /// 非数据行
    Skip,
    /// 数据行（首列原文）
    Data(String),
}

/// 提取参数
#[derive(Debug, Clone)]
pub struct ExtractionContext<'a> {
    pub department: Department,
    pub kind: ImportKind,
    pub unit: Unit,
    pub report_date: &'a str,
    pub known_teams: &'a [String],
}

/// 团队名首字母大写，其余小写
pub fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

/// 是否为汇总/表头等非数据行标记
fn is_excluded_label(normalized: &str) -> bool {
    normalized == "ROW LABELS" || normalized.contains("TOTAL") || normalized == "ACTUAL"
}

/// 对一行首列文本分类
pub fn classify_row(first_col: &str, known_teams: &[String], current_team: Option<&str>) -> RowClass {
    if first_col.is_empty() {
        return RowClass::Skip;
    }

    let normalized = first_col.to_uppercase();
    if let Some(team) = known_teams.iter().find(|t| t.to_uppercase() == normalized) {
        return RowClass::TeamHeader(title_case(team));
    }

    if current_team.is_none() || is_excluded_label(&normalized) {
        return RowClass::Skip;
    }

    RowClass::Data(first_col.to_string())
}

/// 扫描整张表，按给定列产出记录
pub fn extract_records(
    sheet: &SheetGrid,
    column: usize,
    ctx: &ExtractionContext<'_>,
) -> Vec<PerformanceRecord> {
    let mut current_team: Option<String> = None;
    let mut records = Vec::new();

    for row in sheet.rows() {
        let first_col = to_trimmed_text(row.first());

        match classify_row(&first_col, ctx.known_teams, current_team.as_deref()) {
            RowClass::TeamHeader(team) => current_team = Some(team),
            RowClass::Skip => {}
            RowClass::Data(metric) => {
                let team = match current_team.as_deref() {
                    Some(t) => t,
                    None => continue,
                };

                // 0 视为"无数据"
                let value = match to_numeric(row.get(column)) {
                    Some(v) if v != 0.0 => v,
                    _ => continue,
                };

                records.push(PerformanceRecord::imported(
                    ctx.department,
                    team,
                    &metric,
                    value,
                    ctx.kind,
                    ctx.unit,
                    ctx.report_date,
                ));
            }
        }
    }

    records
}
