// ==========================================
// 销售业绩导入系统 - 数据集合并
// ==========================================
// 规则: 按 (部门, 报告日期) 整体替换
// - 新记录涉及的所有报告日期，先删除目标部门下这些日期的旧记录
// - 再追加全部新记录
// 红线: 不做字段级合并；重复导入同一天不会产生重复记录
// ==========================================

use crate::domain::{Department, PerformanceRecord, ReportKey};
use std::collections::{BTreeMap, BTreeSet};

/// 合并统计
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// 被替换掉的旧记录数
    pub removed: usize,
    /// 新增记录数
    pub inserted: usize,
    /// 涉及的报告日期（保持首次出现顺序）
    pub report_dates: Vec<String>,
}

/// 新记录中出现的报告日期（去重，保持首次出现顺序）
pub fn distinct_report_dates(records: &[PerformanceRecord]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.report_date.as_str()))
        .map(|r| r.report_date.clone())
        .collect()
}

/// 合并新记录到既有数据集
///
/// # 返回
/// - 合并后的数据集（保留未受影响的旧记录顺序，新记录追加在后）
/// - 合并统计
pub fn reconcile(
    existing: &[PerformanceRecord],
    incoming: Vec<PerformanceRecord>,
    department: Department,
) -> (Vec<PerformanceRecord>, ReconcileSummary) {
    let report_dates = distinct_report_dates(&incoming);
    let affected: BTreeSet<&str> = report_dates.iter().map(|d| d.as_str()).collect();

    let mut merged: Vec<PerformanceRecord> = existing
        .iter()
        .filter(|r| !(r.department == department && affected.contains(r.report_date.as_str())))
        .cloned()
        .collect();

    let removed = existing.len() - merged.len();
    let inserted = incoming.len();
    merged.extend(incoming);

    (
        merged,
        ReconcileSummary {
            removed,
            inserted,
            report_dates,
        },
    )
}

/// 按替换键分组的视图
pub fn group_by_key(records: &[PerformanceRecord]) -> BTreeMap<ReportKey, Vec<PerformanceRecord>> {
    let mut groups: BTreeMap<ReportKey, Vec<PerformanceRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.key()).or_default().push(record.clone());
    }
    groups
}
