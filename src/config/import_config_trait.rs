// ==========================================
// 销售业绩导入系统 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::Unit;
use std::error::Error;

// ==========================================
// IngestConfigReader Trait
// ==========================================
// 用途: 导入与日历模块所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait IngestConfigReader: Send + Sync {
    // ===== 团队配置 =====

    /// 获取已知团队名列表（分段标题识别用）
    ///
    /// # 默认值
    /// - ["ACHIEVERS", "PASSIONATE", "CONCORD", "DYNAMIC"]
    fn get_known_teams(&self) -> Result<Vec<String>, Box<dyn Error>>;

    // ===== 表头扫描窗口 =====

    /// Master 模式扫描行数
    ///
    /// # 默认值
    /// - 10
    fn get_master_scan_rows(&self) -> Result<usize, Box<dyn Error>>;

    /// Master 模式扫描列数
    ///
    /// # 默认值
    /// - 30
    fn get_master_scan_cols(&self) -> Result<usize, Box<dyn Error>>;

    /// Daily 模式扫描行数
    ///
    /// # 默认值
    /// - 10
    fn get_daily_scan_rows(&self) -> Result<usize, Box<dyn Error>>;

    /// Daily 模式扫描列数
    ///
    /// # 默认值
    /// - 150
    fn get_daily_scan_cols(&self) -> Result<usize, Box<dyn Error>>;

    // ===== 记录默认值 =====

    /// 导入记录的计量单位
    ///
    /// # 默认值
    /// - Units
    fn get_default_unit(&self) -> Result<Unit, Box<dyn Error>>;

    // ===== 管理员 =====

    /// 管理员 PIN（解锁已锁定月份）
    ///
    /// # 默认值
    /// - "786"
    fn get_admin_pin(&self) -> Result<String, Box<dyn Error>>;
}
