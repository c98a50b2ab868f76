// ==========================================
// 销售业绩导入系统 - 业绩记录实体
// ==========================================
// 职责: 定义 PerformanceRecord 及其替换键
// 红线: 记录只由导入创建，只按 (部门, 报告日期) 整体替换
// ==========================================

use crate::domain::types::{Department, ImportKind, RecordStatus, Unit};
use serde::{Deserialize, Serialize};

// ==========================================
// PerformanceRecord - 业绩记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    pub department: Department,

    /// 所属团队（仅分段表格导入时填充，首字母大写）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,

    /// 指标名（首列原文）
    pub metric: String,

    pub plan: f64,
    pub actual: f64,

    /// 差异值（引擎恒为 0，由展示层重算）
    pub variance: f64,

    pub unit: Unit,
    pub status: RecordStatus,

    /// 报告期标签（MASTER_<Month>_<Year> 或 "<Month> <DD>, <Year>"）
    #[serde(default)]
    pub report_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl PerformanceRecord {
    /// 由导入行构造记录
    ///
    /// # 参数
    /// - kind: Master 填 plan，Daily 填 actual，另一项为 0
    pub fn imported(
        department: Department,
        team: &str,
        metric: &str,
        value: f64,
        kind: ImportKind,
        unit: Unit,
        report_date: &str,
    ) -> Self {
        let (plan, actual) = match kind {
            ImportKind::Master => (value, 0.0),
            ImportKind::Daily => (0.0, value),
        };

        Self {
            department,
            team: Some(team.to_string()),
            metric: metric.to_string(),
            plan,
            actual,
            variance: 0.0,
            unit,
            status: RecordStatus::OnTrack,
            report_date: report_date.to_string(),
            reasoning: None,
        }
    }

    /// 替换键
    pub fn key(&self) -> ReportKey {
        ReportKey {
            department: self.department,
            report_date: self.report_date.clone(),
        }
    }
}

// ==========================================
// ReportKey - (部门, 报告日期) 替换键
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReportKey {
    pub department: Department,
    pub report_date: String,
}

/// 空数据集的初始记录（数据集重置后恢复为此状态）
pub fn seed_records() -> Vec<PerformanceRecord> {
    vec![PerformanceRecord {
        department: Department::Production,
        team: None,
        metric: "System Core Initialization".to_string(),
        plan: 100.0,
        actual: 100.0,
        variance: 0.0,
        unit: Unit::Status,
        status: RecordStatus::OnTrack,
        report_date: String::new(),
        reasoning: Some("System Ready.".to_string()),
    }]
}
