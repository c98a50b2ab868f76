// ==========================================
// 销售业绩导入系统 - 单元格类型转换
// ==========================================
// 职责: 原始单元格 → 文本 / 数值 / 日历日期
// 约束: 容忍格式噪声（千分位、前后空白、尾随单位文字）
// ==========================================

use calamine::Data;
use chrono::{Duration, NaiveDate};

/// 日期序列号下限（约 2009 年之后的日期）
pub const DATE_SERIAL_THRESHOLD: f64 = 40_000.0;

/// 日期序列号上限（9999-12-31）
pub const DATE_SERIAL_MAX: f64 = 2_958_465.0;

/// 单元格 → 去空白文本
///
/// 缺失单元格与假值（0 / FALSE）均为空串
pub fn to_trimmed_text(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty) | Some(Data::Bool(false)) => String::new(),
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) if *f == 0.0 || f.is_nan() => String::new(),
        Some(Data::Float(f)) => f.to_string(),
        Some(Data::Int(0)) => String::new(),
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Bool(true)) => "true".to_string(),
        Some(Data::DateTime(dt)) if dt.as_f64() == 0.0 => String::new(),
        Some(Data::DateTime(dt)) => dt.as_f64().to_string(),
        Some(Data::DateTimeIso(s)) | Some(Data::DurationIso(s)) => s.trim().to_string(),
        Some(Data::Error(e)) => e.to_string(),
    }
}

/// 单元格 → 数值
///
/// # 返回
/// - Some(f64): 有限数值（0 也是合法解析结果，由调用方处理"无数据"规则）
/// - None: 非数值内容
pub fn to_numeric(cell: Option<&Data>) -> Option<f64> {
    let value = match cell {
        None | Some(Data::Empty) | Some(Data::Bool(_)) | Some(Data::Error(_)) => None,
        Some(Data::Float(f)) => Some(*f),
        Some(Data::Int(i)) => Some(*i as f64),
        Some(Data::DateTime(dt)) => Some(dt.as_f64()),
        Some(Data::String(s)) | Some(Data::DateTimeIso(s)) | Some(Data::DurationIso(s)) => {
            parse_numeric_text(s)
        }
    };
    value.filter(|v| v.is_finite())
}

/// 文本 → 数值：去千分位逗号后取最长的浮点数前缀
///
/// "1,234" → 1234, "  12.5 units" → 12.5, "abc" → None
pub fn parse_numeric_text(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    let s = cleaned.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // 指数部分只有在后面跟数字时才计入
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 取文本开头的整数（允许前导空白，忽略尾随字符）
///
/// "05" → 5, " 12abc" → 12, "-3" → None, "x1" → None
pub fn leading_day_number(text: &str) -> Option<u32> {
    let s = text.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u32>().ok()
}

/// 日期序列号 → 日历日期
///
/// # 返回
/// - None: 序列号不在 (40000, 2958465] 范围内
pub fn to_calendar_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial <= DATE_SERIAL_THRESHOLD || serial > DATE_SERIAL_MAX {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.floor() as i64))
}

/// 纯数字表头文本 → "D/M/Y"
///
/// 仅当文本长度大于 4 且数值超过序列号阈值时才解码
pub fn decode_serial_header(text: &str) -> Option<String> {
    if text.chars().count() <= 4 {
        return None;
    }
    let serial = text.parse::<f64>().ok()?;
    let date = to_calendar_date(serial)?;
    Some(format_dmy(date))
}

/// 日期 → "D/M/Y"（无前导零）
pub fn format_dmy(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}
