// ==========================================
// 销售业绩导入系统 - 假期日历API
// ==========================================
// 职责: 假期 / 锁定映射的读取、修改与持久化，管理员模式入口
// 存储: app_kv 表 (holidaysMap / locksMap)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, IngestConfigReader};
use crate::domain::{HolidayMap, LockMap, ReportingPeriod};
use crate::engine::{AdminSession, HolidayCalendar};
use crate::repository::{AppKvRepository, HOLIDAYS_MAP_KEY, LOCKS_MAP_KEY};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

/// 单月日历概览
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthOverview {
    /// "January 2024"
    pub label: String,
    pub month_key: String,
    pub days_in_month: u32,
    pub holidays: Vec<u32>,
    pub working_days: u32,
    pub locked: bool,
    /// 当前会话能否修改假期
    pub editable: bool,
}

/// 日历API
pub struct CalendarApi {
    kv_repo: Arc<AppKvRepository>,
    config_manager: Arc<ConfigManager>,
    session: Mutex<AdminSession>,
}

impl CalendarApi {
    pub fn new(kv_repo: Arc<AppKvRepository>, config_manager: Arc<ConfigManager>) -> Self {
        Self {
            kv_repo,
            config_manager,
            session: Mutex::new(AdminSession::new()),
        }
    }

    fn session(&self) -> ApiResult<MutexGuard<'_, AdminSession>> {
        self.session
            .lock()
            .map_err(|e| ApiError::InternalError(format!("会话锁获取失败: {}", e)))
    }

    fn load_calendar(&self) -> ApiResult<HolidayCalendar> {
        let holidays: HolidayMap = self.kv_repo.get(HOLIDAYS_MAP_KEY)?.unwrap_or_default();
        let locks: LockMap = self.kv_repo.get(LOCKS_MAP_KEY)?.unwrap_or_default();
        Ok(HolidayCalendar::new(holidays, locks))
    }

    fn save_calendar(&self, calendar: &HolidayCalendar) -> ApiResult<()> {
        self.kv_repo.put(HOLIDAYS_MAP_KEY, calendar.holidays())?;
        self.kv_repo.put(LOCKS_MAP_KEY, calendar.locks())?;
        Ok(())
    }

    fn overview(&self, calendar: &HolidayCalendar, period: ReportingPeriod) -> ApiResult<MonthOverview> {
        let locked = calendar.is_locked(period);
        let admin = self.session()?.is_active();
        Ok(MonthOverview {
            label: period.to_string(),
            month_key: period.month_key(),
            days_in_month: period.days_in_month(),
            holidays: calendar.effective_holidays(period),
            working_days: calendar.working_days(period),
            locked,
            editable: admin || !locked,
        })
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn get_month_overview(&self, period: ReportingPeriod) -> ApiResult<MonthOverview> {
        let calendar = self.load_calendar()?;
        self.overview(&calendar, period)
    }

    /// 全部持久化映射
    pub fn get_calendar(&self) -> ApiResult<HolidayCalendar> {
        self.load_calendar()
    }

    // ==========================================
    // 修改
    // ==========================================

    /// 切换某日假期状态（锁定月份需管理员模式）
    pub fn toggle_holiday(&self, period: ReportingPeriod, day: u32) -> ApiResult<MonthOverview> {
        let admin = self.is_admin()?;
        let mut calendar = self.load_calendar()?;
        calendar.toggle_holiday(period, day, admin)?;
        self.save_calendar(&calendar)?;
        self.overview(&calendar, period)
    }

    pub fn lock_month(&self, period: ReportingPeriod) -> ApiResult<MonthOverview> {
        let mut calendar = self.load_calendar()?;
        calendar.lock_month(period);
        self.save_calendar(&calendar)?;
        self.overview(&calendar, period)
    }

    /// 解锁月份（仅管理员）
    pub fn unlock_month(&self, period: ReportingPeriod) -> ApiResult<MonthOverview> {
        let admin = self.is_admin()?;
        let mut calendar = self.load_calendar()?;
        calendar.unlock_month(period, admin)?;
        self.save_calendar(&calendar)?;
        self.overview(&calendar, period)
    }

    // ==========================================
    // 管理员模式
    // ==========================================

    /// 使用 PIN 进入管理员模式
    ///
    /// # 返回
    /// - Ok(true): 已进入管理员模式
    /// - Ok(false): PIN 错误
    pub fn admin_login(&self, pin: &str) -> ApiResult<bool> {
        let expected = self
            .config_manager
            .get_admin_pin()
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        Ok(self.session()?.login(pin, &expected))
    }

    pub fn admin_logout(&self) -> ApiResult<()> {
        self.session()?.logout();
        Ok(())
    }

    pub fn is_admin(&self) -> ApiResult<bool> {
        Ok(self.session()?.is_active())
    }
}
