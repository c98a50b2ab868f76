// ==========================================
// 销售业绩导入系统 - ImportApi 端到端测试
// ==========================================
// 覆盖: xlsx 字节 → 解析 → 导入 → SQLite 落库 → 导入日志
// ==========================================


use std::io::Write;
use swiss_ops_ingest::api::{ApiError, ImportRequest};
use swiss_ops_ingest::app::AppState;
use swiss_ops_ingest::domain::{seed_records, Department, ImportMode, ReportingPeriod};
use swiss_ops_ingest::engine::DaySelection;
use swiss_ops_ingest::importer::{IngestError, WorkbookFormat};
use swiss_ops_ingest::repository::PerformanceRecordRepository;
use tempfile::NamedTempFile;
use test_helpers::{build_xlsx, create_test_db, daily_rows, master_rows, N, T};

fn setup() -> (NamedTempFile, String, AppState) {
    let (temp_file, db_path) = create_test_db().expect("创建测试数据库失败");
    let state = AppState::new(db_path.clone()).expect("创建AppState失败");
    (temp_file, db_path, state)
}

fn daily_request(days: &[u32]) -> ImportRequest {
    let period = ReportingPeriod::new(2024, 1).unwrap();
    ImportRequest::daily(period, &DaySelection::from_days(days), false)
}

#[test]
fn test_xlsx_daily_import_persists_records() {
    let (_temp, db_path, state) = setup();
    let bytes = build_xlsx(&[("Daily Sales", daily_rows())]).unwrap();

    let response = state
        .import_api
        .import_bytes(
            &bytes,
            WorkbookFormat::Spreadsheet,
            Some("january.xlsx"),
            &daily_request(&[1, 2]),
        )
        .unwrap();

    assert_eq!(response.imported_count, 2);
    assert_eq!(response.department, Department::Sales);
    assert_eq!(response.sheet_name, "Daily Sales");
    assert_eq!(
        response.report_dates,
        vec!["January 01, 2024".to_string(), "January 02, 2024".to_string()]
    );
    assert_eq!(
        response.message,
        "SUCCESS: Uploaded 2 items for 2 selected days."
    );

    // 落库结果与返回的数据集一致（初始记录 + 2 条）
    let repo = PerformanceRecordRepository::new(&db_path).unwrap();
    let stored = repo.list_all().unwrap();
    assert_eq!(stored, response.dataset);
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0], seed_records()[0]);
    assert_eq!(stored[1].actual, 100.0);
    assert_eq!(stored[2].actual, 150.0);

    let history = state.import_api.list_import_history(10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].batch_id, response.batch_id);
    assert_eq!(history[0].mode, "daily");
    assert_eq!(history[0].file_name.as_deref(), Some("january.xlsx"));
    assert_eq!(history[0].imported_count, 2);
}

#[test]
fn test_reimport_same_file_is_idempotent() {
    let (_temp, db_path, state) = setup();
    let bytes = build_xlsx(&[("Sales", daily_rows())]).unwrap();
    let request = daily_request(&[1]);

    let first = state
        .import_api
        .import_bytes(&bytes, WorkbookFormat::Spreadsheet, None, &request)
        .unwrap();
    let second = state
        .import_api
        .import_bytes(&bytes, WorkbookFormat::Spreadsheet, None, &request)
        .unwrap();

    assert_eq!(first.replaced_count, 0);
    assert_eq!(second.replaced_count, 1);
    assert_eq!(second.dataset, first.dataset);

    let repo = PerformanceRecordRepository::new(&db_path).unwrap();
    let day_one = repo
        .list_by_key(Department::Sales, "January 01, 2024")
        .unwrap();
    assert_eq!(day_one.len(), 1);
    assert_eq!(state.import_api.list_import_history(10).unwrap().len(), 2);
}

#[test]
fn test_master_and_daily_coexist() {
    let (_temp, _db_path, state) = setup();
    let master_bytes = build_xlsx(&[("Sales Plan", master_rows())]).unwrap();
    let daily_bytes = build_xlsx(&[("Sales", daily_rows())]).unwrap();

    let master_request = ImportRequest {
        mode: ImportMode::MASTER,
        period: ReportingPeriod::new(2024, 1).unwrap(),
        days: vec![5],
    };
    state
        .import_api
        .import_bytes(&master_bytes, WorkbookFormat::Spreadsheet, None, &master_request)
        .unwrap();
    let response = state
        .import_api
        .import_bytes(&daily_bytes, WorkbookFormat::Spreadsheet, None, &daily_request(&[1]))
        .unwrap();

    let dates: Vec<&str> = response
        .dataset
        .iter()
        .map(|r| r.report_date.as_str())
        .collect();
    assert_eq!(dates, vec!["", "MASTER_January_2024", "January 01, 2024"]);
}

#[test]
fn test_malformed_bytes_leave_store_untouched() {
    let (_temp, _db_path, state) = setup();
    let before = state.import_api.list_records().unwrap();

    let err = state
        .import_api
        .import_bytes(
            b"definitely not a spreadsheet",
            WorkbookFormat::Spreadsheet,
            Some("broken.xlsx"),
            &daily_request(&[1]),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Import(IngestError::MalformedWorkbook(_))
    ));
    assert_eq!(
        err.user_message(),
        "SYSTEM ERROR: Failed to parse Excel file. Check format."
    );
    assert_eq!(state.import_api.list_records().unwrap(), before);
    assert!(state.import_api.list_import_history(10).unwrap().is_empty());
}

#[test]
fn test_missing_columns_message_lists_days() {
    let (_temp, _db_path, state) = setup();
    let bytes = build_xlsx(&[(
        "Sales",
        vec![
            vec![T("Report"), T("Notes")],
            vec![T("ACHIEVERS")],
            vec![T("Product A"), N(5.0)],
        ],
    )])
    .unwrap();

    let err = state
        .import_api
        .import_bytes(&bytes, WorkbookFormat::Spreadsheet, None, &daily_request(&[3, 4]))
        .unwrap_err();

    assert_eq!(
        err.user_message(),
        "IMPORT FAILED: Could not find columns for selected days (3, 4) in the Excel file."
    );
    assert_eq!(state.import_api.list_records().unwrap(), seed_records());
}

#[test]
fn test_invalid_selection_is_rejected() {
    let (_temp, _db_path, state) = setup();
    let bytes = build_xlsx(&[("Sales", daily_rows())]).unwrap();

    let err = state
        .import_api
        .import_bytes(&bytes, WorkbookFormat::Spreadsheet, None, &daily_request(&[32]))
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Import(IngestError::InvalidSelection(_))
    ));
}

#[test]
fn test_csv_file_import() {
    let (_temp, _db_path, state) = setup();
    let mut csv_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(csv_file, ",1/1/2024,2/1/2024").unwrap();
    writeln!(csv_file, "CONCORD").unwrap();
    writeln!(csv_file, "Product C,\"1,200\",300").unwrap();
    csv_file.flush().unwrap();

    let response = state
        .import_api
        .import_file(csv_file.path().to_str().unwrap(), &daily_request(&[1]))
        .unwrap();

    assert_eq!(response.imported_count, 1);
    assert_eq!(response.dataset[1].team.as_deref(), Some("Concord"));
    assert_eq!(response.dataset[1].actual, 1200.0);
}

#[test]
fn test_unsupported_extension() {
    let (_temp, _db_path, state) = setup();
    let err = state
        .import_api
        .import_file("/tmp/report.pdf", &daily_request(&[1]))
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Import(IngestError::UnsupportedFormat(ref ext)) if ext == "pdf"
    ));
}

#[test]
fn test_reset_dataset_restores_seed() {
    let (_temp, _db_path, state) = setup();
    let bytes = build_xlsx(&[("Sales", daily_rows())]).unwrap();
    state
        .import_api
        .import_bytes(&bytes, WorkbookFormat::Spreadsheet, None, &daily_request(&[1, 2]))
        .unwrap();

    assert_eq!(state.import_api.reset_dataset().unwrap(), 1);
    assert_eq!(state.import_api.list_records().unwrap(), seed_records());
}

#[test]
fn test_territory_master_request() {
    let (_temp, _db_path, state) = setup();
    let bytes = build_xlsx(&[
        ("Sales", master_rows()),
        ("Territory", master_rows()),
    ])
    .unwrap();

    let request = ImportRequest::master(ReportingPeriod::new(2024, 1).unwrap(), true);
    let response = state
        .import_api
        .import_bytes(&bytes, WorkbookFormat::Spreadsheet, None, &request)
        .unwrap();

    assert_eq!(response.sheet_name, "Territory");
    assert_eq!(response.department, Department::TerritorySales);
    assert_eq!(response.report_dates, vec!["MASTER_January_2024".to_string()]);
}
