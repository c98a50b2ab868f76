// ==========================================
// 销售业绩导入系统 - 报告期与日历类型
// ==========================================
// 职责: 报告期 (年, 月)、报告日期标签、月份键、假期/锁定映射
// ==========================================

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// 月份键 → 非工作日列表（缺省时为当月所有周日）
pub type HolidayMap = BTreeMap<String, Vec<u32>>;

/// 月份键 → 假期日历是否已锁定
pub type LockMap = BTreeMap<String, bool>;

// ==========================================
// ReportingPeriod - 报告期
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReportingPeriod {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl ReportingPeriod {
    /// 创建报告期，月份越界返回 None
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month.clamp(1, 12) - 1) as usize]
    }

    /// 当月天数
    pub fn days_in_month(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .map(|d| d.day())
            .unwrap_or(31)
    }

    /// 月份键 "<年>-<月份下标>"，月份下标从 0 开始
    pub fn month_key(&self) -> String {
        format!("{}-{}", self.year, self.month - 1)
    }

    /// 月度计划标签，例如 MASTER_January_2024
    pub fn master_label(&self) -> String {
        format!("MASTER_{}_{}", self.month_name(), self.year)
    }

    /// 日报标签，例如 "January 05, 2024"
    pub fn daily_label(&self, day: u32) -> String {
        format!("{} {:02}, {}", self.month_name(), day, self.year)
    }

    /// 前后偏移若干月
    pub fn shift(&self, offset: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + offset;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// 当月所有周日
    pub fn sundays(&self) -> Vec<u32> {
        (1..=self.days_in_month())
            .filter(|&day| {
                NaiveDate::from_ymd_opt(self.year, self.month, day)
                    .map(|d| d.weekday() == Weekday::Sun)
                    .unwrap_or(false)
            })
            .collect()
    }
}

impl std::fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}
