// ==========================================
// 销售业绩导入系统 - 命令行入口
// ==========================================
// 用法:
//   swiss-ops-ingest <file> <mode> <year> <month> [days] [db_path]
//
// mode: daily | master | territory-daily | territory-master
// days: 逗号分隔的日期（日报必填，例如 1,2,3）；Master 模式可填 "-"
// db_path: 缺省时取 SWISS_OPS_DB_PATH 或用户数据目录
// ==========================================

use std::process::ExitCode;
use swiss_ops_ingest::app::{get_default_db_path, AppState};
use swiss_ops_ingest::i18n::{t, t_with_args};
use swiss_ops_ingest::{logging, ImportMode, ImportRequest, ReportingPeriod};

/// 解析逗号分隔的日期列表，"-" 或空串表示不选
fn parse_days(raw: &str) -> Option<Vec<u32>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Some(Vec::new());
    }
    trimmed
        .split(',')
        .map(|part| part.trim().parse::<u32>().ok())
        .collect()
}

fn run(args: &[String]) -> Result<String, String> {
    if args.len() < 4 {
        return Err(t("cli.usage"));
    }

    let file_path = &args[0];
    let mode = ImportMode::parse(&args[1])
        .ok_or_else(|| t_with_args("cli.invalid_mode", &[("mode", &args[1])]))?;

    let period = match (args[2].trim().parse::<i32>(), args[3].trim().parse::<u32>()) {
        (Ok(year), Ok(month)) => ReportingPeriod::new(year, month),
        _ => None,
    }
    .ok_or_else(|| {
        t_with_args(
            "cli.invalid_period",
            &[("year", &args[2]), ("month", &args[3])],
        )
    })?;

    let raw_days = args.get(4).map(String::as_str).unwrap_or("-");
    let days = parse_days(raw_days)
        .ok_or_else(|| t_with_args("cli.invalid_days", &[("days", raw_days)]))?;

    let db_path = args.get(5).cloned().unwrap_or_else(get_default_db_path);
    tracing::info!(db_path = %db_path, file = %file_path, mode = %mode, "开始导入");

    let state = AppState::new(db_path)?;
    let request = ImportRequest { mode, period, days };

    state
        .import_api
        .import_file(file_path, &request)
        .map(|response| response.message)
        .map_err(|e| {
            tracing::error!(error = %e, "导入失败");
            e.user_message()
        })
}

fn main() -> ExitCode {
    logging::init();

    tracing::info!("{} v{}", swiss_ops_ingest::APP_NAME, swiss_ops_ingest::VERSION);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(message) => {
            println!("{}", message);
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
