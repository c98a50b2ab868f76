// ==========================================
// 销售业绩导入系统 - 配置集成测试
// ==========================================


use swiss_ops_ingest::api::ImportRequest;
use swiss_ops_ingest::app::AppState;
use swiss_ops_ingest::config::{config_keys, ConfigManager, IngestConfigReader};
use swiss_ops_ingest::domain::{ImportMode, ReportingPeriod, Unit};
use swiss_ops_ingest::importer::WorkbookFormat;
use test_helpers::{build_xlsx, create_test_db, insert_test_config, Blank, N, T};

#[test]
fn test_config_overrides_are_read() {
    let (_temp, db_path) = create_test_db().unwrap();
    insert_test_config(&db_path, config_keys::KNOWN_TEAMS, "north, south ,").unwrap();
    insert_test_config(&db_path, config_keys::DAILY_SCAN_COLS, "5").unwrap();
    insert_test_config(&db_path, config_keys::DEFAULT_UNIT, "currency").unwrap();

    let config = ConfigManager::new(&db_path).unwrap();
    assert_eq!(
        config.get_known_teams().unwrap(),
        vec!["NORTH".to_string(), "SOUTH".to_string()]
    );
    assert_eq!(config.get_daily_scan_cols().unwrap(), 5);
    assert_eq!(config.get_daily_scan_rows().unwrap(), 10);
    assert_eq!(config.get_default_unit().unwrap(), Unit::Currency);
}

#[test]
fn test_import_uses_configured_teams_and_unit() {
    let (_temp, db_path) = create_test_db().unwrap();
    insert_test_config(&db_path, config_keys::KNOWN_TEAMS, "North").unwrap();
    insert_test_config(&db_path, config_keys::DEFAULT_UNIT, "Currency").unwrap();
    let state = AppState::new(db_path).unwrap();

    let bytes = build_xlsx(&[(
        "Sales",
        vec![
            vec![Blank, T("1/1/2024")],
            vec![T("ACHIEVERS")],
            vec![T("Ignored"), N(1.0)],
            vec![T("NORTH")],
            vec![T("Product A"), N(9.5)],
        ],
    )])
    .unwrap();

    let request = ImportRequest {
        mode: ImportMode::DAILY,
        period: ReportingPeriod::new(2024, 1).unwrap(),
        days: vec![1],
    };
    let response = state
        .import_api
        .import_bytes(&bytes, WorkbookFormat::Spreadsheet, None, &request)
        .unwrap();

    assert_eq!(response.imported_count, 1);
    let record = response.dataset.last().unwrap();
    assert_eq!(record.team.as_deref(), Some("North"));
    assert_eq!(record.unit, Unit::Currency);
}

#[test]
fn test_narrow_scan_window_hides_far_columns() {
    let (_temp, db_path) = create_test_db().unwrap();
    insert_test_config(&db_path, config_keys::DAILY_SCAN_COLS, "2").unwrap();
    let state = AppState::new(db_path).unwrap();

    let bytes = build_xlsx(&[(
        "Sales",
        vec![
            vec![Blank, Blank, T("1/1/2024")],
            vec![T("ACHIEVERS")],
            vec![T("Product A"), Blank, N(3.0)],
        ],
    )])
    .unwrap();

    let request = ImportRequest {
        mode: ImportMode::DAILY,
        period: ReportingPeriod::new(2024, 1).unwrap(),
        days: vec![1],
    };
    assert!(state
        .import_api
        .import_bytes(&bytes, WorkbookFormat::Spreadsheet, None, &request)
        .is_err());
}
