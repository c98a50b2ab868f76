// ==========================================
// 销售业绩导入系统 - 领域类型定义
// ==========================================
// 职责: 部门 / 单位 / 状态 / 导入模式等枚举
// 序列化格式: 与数据集显示名一致（"Sales" / "Territory Sales" / "on-track"）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 部门 (Department)
// ==========================================
// 导入只产生 Sales / TerritorySales，其余部门来自宿主应用的既有数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Sales")]
    Sales,
    #[serde(rename = "Territory Sales")]
    TerritorySales,
    #[serde(rename = "Production")]
    Production,
    #[serde(rename = "Logistics")]
    Logistics,
}

impl Department {
    /// 数据库存储值（与显示名一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Sales => "Sales",
            Department::TerritorySales => "Territory Sales",
            Department::Production => "Production",
            Department::Logistics => "Logistics",
        }
    }

    /// 从存储值解析
    pub fn from_db_str(value: &str) -> Option<Self> {
        match value.trim() {
            "Sales" => Some(Department::Sales),
            "Territory Sales" => Some(Department::TerritorySales),
            "Production" => Some(Department::Production),
            "Logistics" => Some(Department::Logistics),
            _ => None,
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 计量单位 (Unit)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Units,
    Status,
    Currency,
    Percent,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Units => "Units",
            Unit::Status => "Status",
            Unit::Currency => "Currency",
            Unit::Percent => "Percent",
        }
    }

    pub fn from_db_str(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "STATUS" => Unit::Status,
            "CURRENCY" => Unit::Currency,
            "PERCENT" => Unit::Percent,
            _ => Unit::Units, // 默认按件计
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 记录状态 (Record Status)
// ==========================================
// 引擎不计算状态，导入记录一律为 OnTrack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordStatus {
    OnTrack,
    AtRisk,
    Critical,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::OnTrack => "on-track",
            RecordStatus::AtRisk => "at-risk",
            RecordStatus::Critical => "critical",
        }
    }

    pub fn from_db_str(value: &str) -> Self {
        match value.trim() {
            "at-risk" => RecordStatus::AtRisk,
            "critical" => RecordStatus::Critical,
            _ => RecordStatus::OnTrack,
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 导入类型 (Import Kind)
// ==========================================
// Master: 月度计划（TGT 列），Daily: 指定日期实绩
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportKind {
    Master,
    Daily,
}

// ==========================================
// 销售渠道 (Sales Channel)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SalesChannel {
    Standard,
    Territory,
}

impl SalesChannel {
    /// 渠道对应的目标部门
    pub fn department(&self) -> Department {
        match self {
            SalesChannel::Standard => Department::Sales,
            SalesChannel::Territory => Department::TerritorySales,
        }
    }
}

// ==========================================
// 导入模式 (Import Mode) = 类型 × 渠道
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportMode {
    pub kind: ImportKind,
    pub channel: SalesChannel,
}

impl ImportMode {
    pub const MASTER: ImportMode = ImportMode::new(ImportKind::Master, SalesChannel::Standard);
    pub const DAILY: ImportMode = ImportMode::new(ImportKind::Daily, SalesChannel::Standard);
    pub const TERRITORY_MASTER: ImportMode =
        ImportMode::new(ImportKind::Master, SalesChannel::Territory);
    pub const TERRITORY_DAILY: ImportMode =
        ImportMode::new(ImportKind::Daily, SalesChannel::Territory);

    pub const fn new(kind: ImportKind, channel: SalesChannel) -> Self {
        Self { kind, channel }
    }

    pub fn is_master(&self) -> bool {
        self.kind == ImportKind::Master
    }

    pub fn is_territory(&self) -> bool {
        self.channel == SalesChannel::Territory
    }

    pub fn department(&self) -> Department {
        self.channel.department()
    }

    /// 解析模式名（"daily" / "master" / "territory-daily" / "territory-master"）
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "daily" => Some(Self::DAILY),
            "master" => Some(Self::MASTER),
            "territory-daily" => Some(Self::TERRITORY_DAILY),
            "territory-master" => Some(Self::TERRITORY_MASTER),
            _ => None,
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match (self.kind, self.channel) {
            (ImportKind::Daily, SalesChannel::Standard) => "daily",
            (ImportKind::Master, SalesChannel::Standard) => "master",
            (ImportKind::Daily, SalesChannel::Territory) => "territory-daily",
            (ImportKind::Master, SalesChannel::Territory) => "territory-master",
        };
        write!(f, "{}", name)
    }
}
