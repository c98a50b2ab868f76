// ==========================================
// 销售业绩导入系统 - 日报日期选择
// ==========================================
// 规则: 选择永不为空；切换月份 / 清空后回到 [1]
// ==========================================

use crate::domain::ReportingPeriod;
use serde::{Deserialize, Serialize};

/// 日报导入的日期选择（保持用户点选顺序）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySelection {
    days: Vec<u32>,
}

impl Default for DaySelection {
    fn default() -> Self {
        Self { days: vec![1] }
    }
}

impl DaySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以给定日期初始化，空列表退化为 [1]
    pub fn from_days(days: &[u32]) -> Self {
        let mut selection = Self { days: Vec::new() };
        for &day in days {
            if !selection.days.contains(&day) {
                selection.days.push(day);
            }
        }
        if selection.days.is_empty() {
            selection.days.push(1);
        }
        selection
    }

    pub fn days(&self) -> &[u32] {
        &self.days
    }

    pub fn contains(&self, day: u32) -> bool {
        self.days.contains(&day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// 切换某日；唯一已选日期不会被移除
    pub fn toggle(&mut self, day: u32) {
        match self.days.iter().position(|&d| d == day) {
            Some(pos) if self.days.len() > 1 => {
                self.days.remove(pos);
            }
            Some(_) => {}
            None => self.days.push(day),
        }
    }

    /// 选择整月
    pub fn select_month(&mut self, period: ReportingPeriod) {
        self.days = (1..=period.days_in_month()).collect();
    }

    /// 清空（回到 1 号）
    pub fn clear(&mut self) {
        self.days = vec![1];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_never_empties() {
        let mut selection = DaySelection::new();
        selection.toggle(1);
        assert_eq!(selection.days(), &[1]);

        selection.toggle(5);
        selection.toggle(3);
        assert_eq!(selection.days(), &[1, 5, 3]);

        selection.toggle(1);
        assert_eq!(selection.days(), &[5, 3]);
    }

    #[test]
    fn test_select_month_and_clear() {
        let mut selection = DaySelection::new();
        selection.select_month(ReportingPeriod::new(2024, 2).unwrap());
        assert_eq!(selection.len(), 29);
        assert_eq!(selection.days().last(), Some(&29));

        selection.clear();
        assert_eq!(selection.days(), &[1]);
    }

    #[test]
    fn test_from_days_dedups_and_defaults() {
        assert_eq!(DaySelection::from_days(&[4, 2, 4]).days(), &[4, 2]);
        assert_eq!(DaySelection::from_days(&[]).days(), &[1]);
    }
}
