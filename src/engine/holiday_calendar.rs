// ==========================================
// 销售业绩导入系统 - 假期日历引擎
// ==========================================
// 职责: 非工作日计算、工作日统计、假期切换、月份锁定
// 规则: 月份无显式假期时默认当月所有周日
// 红线: 已锁定月份仅管理员模式可修改假期 / 解锁
// ==========================================

use crate::domain::{HolidayMap, LockMap, ReportingPeriod};
use crate::i18n::t_with_args;
use thiserror::Error;
use tracing::{debug, info};

/// 日历操作错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("月份已锁定: {month_key}")]
    MonthLocked { month_key: String },

    #[error("需要管理员模式: {action}")]
    AdminRequired { action: String },

    #[error("日期超出当月范围: day={day}, days_in_month={days_in_month}")]
    DayOutOfRange { day: u32, days_in_month: u32 },
}

impl CalendarError {
    /// 面向用户的单行提示
    pub fn user_message(&self) -> String {
        match self {
            CalendarError::MonthLocked { month_key } => {
                t_with_args("calendar.month_locked", &[("month", month_key)])
            }
            CalendarError::AdminRequired { action } => {
                t_with_args("calendar.admin_required", &[("action", action)])
            }
            CalendarError::DayOutOfRange { day, days_in_month } => t_with_args(
                "calendar.day_out_of_range",
                &[
                    ("day", &day.to_string()),
                    ("max", &days_in_month.to_string()),
                ],
            ),
        }
    }
}

pub type CalendarResult<T> = Result<T, CalendarError>;

// ==========================================
// HolidayCalendar - 假期日历
// ==========================================
/// 持有假期映射与锁定映射的内存视图，持久化由调用方负责
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HolidayCalendar {
    holidays: HolidayMap,
    locks: LockMap,
}

impl HolidayCalendar {
    pub fn new(holidays: HolidayMap, locks: LockMap) -> Self {
        Self { holidays, locks }
    }

    pub fn holidays(&self) -> &HolidayMap {
        &self.holidays
    }

    pub fn locks(&self) -> &LockMap {
        &self.locks
    }

    pub fn into_parts(self) -> (HolidayMap, LockMap) {
        (self.holidays, self.locks)
    }

    /// 当月有效假期（显式设置优先，否则为周日）
    ///
    /// 显式设置为空列表表示该月无假期，不回退到周日
    pub fn effective_holidays(&self, period: ReportingPeriod) -> Vec<u32> {
        match self.holidays.get(&period.month_key()) {
            Some(days) => days.clone(),
            None => period.sundays(),
        }
    }

    pub fn is_holiday(&self, period: ReportingPeriod, day: u32) -> bool {
        self.effective_holidays(period).contains(&day)
    }

    /// 当月工作日数 = 当月天数 - 落在当月内的假期天数
    pub fn working_days(&self, period: ReportingPeriod) -> u32 {
        let holidays = self.effective_holidays(period);
        (1..=period.days_in_month())
            .filter(|day| !holidays.contains(day))
            .count() as u32
    }

    pub fn is_locked(&self, period: ReportingPeriod) -> bool {
        self.locks
            .get(&period.month_key())
            .copied()
            .unwrap_or(false)
    }

    /// 切换某日的假期状态
    ///
    /// # 参数
    /// - `admin`: 是否处于管理员模式
    ///
    /// # 返回
    /// 切换后的当月假期列表
    pub fn toggle_holiday(
        &mut self,
        period: ReportingPeriod,
        day: u32,
        admin: bool,
    ) -> CalendarResult<Vec<u32>> {
        let days_in_month = period.days_in_month();
        if day == 0 || day > days_in_month {
            return Err(CalendarError::DayOutOfRange { day, days_in_month });
        }
        if self.is_locked(period) && !admin {
            return Err(CalendarError::MonthLocked {
                month_key: period.month_key(),
            });
        }

        let mut current = self.effective_holidays(period);
        if let Some(pos) = current.iter().position(|&d| d == day) {
            current.remove(pos);
        } else {
            current.push(day);
        }

        debug!(month_key = %period.month_key(), day, holidays = ?current, "假期已切换");
        self.holidays.insert(period.month_key(), current.clone());
        Ok(current)
    }

    /// 锁定月份（任何人都可以锁定）
    pub fn lock_month(&mut self, period: ReportingPeriod) {
        info!(month_key = %period.month_key(), "月份已锁定");
        self.locks.insert(period.month_key(), true);
    }

    /// 解锁月份（仅管理员）
    pub fn unlock_month(&mut self, period: ReportingPeriod, admin: bool) -> CalendarResult<()> {
        if !admin {
            return Err(CalendarError::AdminRequired {
                action: "unlock".to_string(),
            });
        }
        info!(month_key = %period.month_key(), "月份已解锁");
        self.locks.insert(period.month_key(), false);
        Ok(())
    }
}
