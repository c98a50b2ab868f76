// ==========================================
// 销售业绩导入系统 - PerformanceImporter 集成测试
// ==========================================
// 覆盖: 日报 / 月度计划 / 辖区渠道 / 幂等重导 / 失败不改动数据集
// ==========================================


use swiss_ops_ingest::domain::{
    seed_records, Department, ImportMode, PerformanceRecord, ReportingPeriod,
};
use swiss_ops_ingest::importer::{
    group_by_key, IngestError, PerformanceImporter, PerformanceImporterImpl, SheetGrid, Workbook,
};
use calamine::{Data, Range};
use test_helpers::{daily_rows, master_rows, workbook, Blank, N, T};

fn jan_2024() -> ReportingPeriod {
    ReportingPeriod::new(2024, 1).unwrap()
}

fn importer() -> PerformanceImporterImpl {
    PerformanceImporterImpl::default()
}

// ==========================================
// 日报导入
// ==========================================

#[test]
fn test_daily_single_day() {
    let wb = workbook("Sales", &daily_rows());
    let outcome = importer()
        .import_workbook(&wb, ImportMode::DAILY, jan_2024(), &[1], &seed_records())
        .unwrap();

    assert_eq!(outcome.imported.len(), 1);
    let record = &outcome.imported[0];
    assert_eq!(record.department, Department::Sales);
    assert_eq!(record.team.as_deref(), Some("Achievers"));
    assert_eq!(record.metric, "Product A");
    assert_eq!(record.actual, 100.0);
    assert_eq!(record.plan, 0.0);
    assert_eq!(record.report_date, "January 01, 2024");

    // 初始记录保留，新记录追加
    assert_eq!(outcome.dataset.len(), 2);
    assert_eq!(outcome.dataset[0], seed_records()[0]);
    assert_eq!(outcome.replaced_count, 0);
}

#[test]
fn test_daily_two_days() {
    let wb = workbook("Sales", &daily_rows());
    let outcome = importer()
        .import_workbook(&wb, ImportMode::DAILY, jan_2024(), &[1, 2], &[])
        .unwrap();

    let values: Vec<(f64, &str)> = outcome
        .imported
        .iter()
        .map(|r| (r.actual, r.report_date.as_str()))
        .collect();
    assert_eq!(
        values,
        vec![(100.0, "January 01, 2024"), (150.0, "January 02, 2024")]
    );
    assert_eq!(outcome.date_count(), 2);
}

#[test]
fn test_reimport_is_idempotent() {
    let wb = workbook("Sales", &daily_rows());
    let imp = importer();

    let once = imp
        .import_workbook(&wb, ImportMode::DAILY, jan_2024(), &[1, 2], &seed_records())
        .unwrap();
    let twice = imp
        .import_workbook(&wb, ImportMode::DAILY, jan_2024(), &[1, 2], &once.dataset)
        .unwrap();

    assert_eq!(twice.dataset, once.dataset);
    assert_eq!(twice.replaced_count, 2);

    let groups = group_by_key(&twice.dataset);
    assert_eq!(groups.len(), 3);
    assert!(groups.values().all(|records| records.len() == 1));
}

#[test]
fn test_reimport_replaces_only_its_department() {
    let wb = workbook("Sales", &daily_rows());
    let territory_wb = workbook("Territory Report", &daily_rows());
    let imp = importer();

    let sales = imp
        .import_workbook(&wb, ImportMode::DAILY, jan_2024(), &[1], &[])
        .unwrap();
    let territory = imp
        .import_workbook(
            &territory_wb,
            ImportMode::TERRITORY_DAILY,
            jan_2024(),
            &[1],
            &sales.dataset,
        )
        .unwrap();

    assert_eq!(territory.replaced_count, 0);
    assert_eq!(territory.dataset.len(), 2);
    assert_eq!(territory.imported[0].department, Department::TerritorySales);
}

#[test]
fn test_rows_before_first_team_are_skipped() {
    let wb = workbook(
        "Sales",
        &[
            vec![Blank, T("1/1/2024")],
            vec![T("Orphan Product"), N(42.0)],
            vec![T("DYNAMIC")],
            vec![T("Product B"), N(7.0)],
        ],
    );
    let outcome = importer()
        .import_workbook(&wb, ImportMode::DAILY, jan_2024(), &[1], &[])
        .unwrap();

    assert_eq!(outcome.imported.len(), 1);
    assert_eq!(outcome.imported[0].metric, "Product B");
    assert_eq!(outcome.imported[0].team.as_deref(), Some("Dynamic"));
}

#[test]
fn test_total_rows_and_zero_values_never_emitted() {
    let wb = workbook(
        "Sales",
        &[
            vec![Blank, T("1/1/2024")],
            vec![T("PASSIONATE")],
            vec![T("TOTAL SALES"), N(999.0)],
            vec![T("Product Z"), N(0.0)],
            vec![T("Product Y"), T("1,250.5")],
        ],
    );
    let outcome = importer()
        .import_workbook(&wb, ImportMode::DAILY, jan_2024(), &[1], &[])
        .unwrap();

    assert_eq!(outcome.imported.len(), 1);
    assert_eq!(outcome.imported[0].metric, "Product Y");
    assert_eq!(outcome.imported[0].actual, 1250.5);
}

#[test]
fn test_serial_date_headers() {
    // 45292 = 2024-01-01, 45293 = 2024-01-02
    let wb = workbook(
        "Sales",
        &[
            vec![Blank, N(45292.0), N(45293.0)],
            vec![T("ACHIEVERS")],
            vec![T("Product A"), N(10.0), N(20.0)],
        ],
    );
    let outcome = importer()
        .import_workbook(&wb, ImportMode::DAILY, jan_2024(), &[2], &[])
        .unwrap();

    assert_eq!(outcome.imported.len(), 1);
    assert_eq!(outcome.imported[0].actual, 20.0);
    assert_eq!(outcome.imported[0].report_date, "January 02, 2024");
}

// ==========================================
// 月度计划导入
// ==========================================

#[test]
fn test_master_import_twice_leaves_one_record() {
    let wb = workbook("Monthly Sales Plan", &master_rows());
    let imp = importer();

    let first = imp
        .import_workbook(&wb, ImportMode::MASTER, jan_2024(), &[], &[])
        .unwrap();
    assert_eq!(first.imported.len(), 1);
    assert_eq!(first.imported[0].plan, 500.0);
    assert_eq!(first.imported[0].actual, 0.0);
    assert_eq!(first.imported[0].report_date, "MASTER_January_2024");

    let second = imp
        .import_workbook(&wb, ImportMode::MASTER, jan_2024(), &[], &first.dataset)
        .unwrap();
    let masters: Vec<&PerformanceRecord> = second
        .dataset
        .iter()
        .filter(|r| r.report_date == "MASTER_January_2024")
        .collect();
    assert_eq!(masters.len(), 1);
}

#[test]
fn test_master_label_distinct_from_daily_labels() {
    let period = jan_2024();
    let master = period.master_label();
    assert!((1..=period.days_in_month()).all(|d| period.daily_label(d) != master));
}

#[test]
fn test_territory_master_picks_territory_sheet() {
    let wb = Workbook::new(vec![
        test_helpers::sheet("Sales", &master_rows()),
        test_helpers::sheet(
            "Teritory Plan",
            &[
                vec![Blank, T("PLAN")],
                vec![T("DYNAMIC")],
                vec![T("North Zone"), N(80.0)],
            ],
        ),
    ]);
    let outcome = importer()
        .import_workbook(&wb, ImportMode::TERRITORY_MASTER, jan_2024(), &[], &[])
        .unwrap();

    assert_eq!(outcome.sheet_name, "Teritory Plan");
    assert_eq!(outcome.imported[0].department, Department::TerritorySales);
    assert_eq!(outcome.imported[0].metric, "North Zone");
    assert_eq!(outcome.imported[0].plan, 80.0);
}

// ==========================================
// 失败场景
// ==========================================

#[test]
fn test_no_headers_yields_no_matching_columns() {
    let wb = workbook(
        "Sales",
        &[
            vec![T("Report"), T("Random")],
            vec![T("ACHIEVERS")],
            vec![T("Product A"), N(5.0)],
        ],
    );
    let existing = seed_records();
    let imp = importer();

    let daily = imp.import_workbook(&wb, ImportMode::DAILY, jan_2024(), &[1, 3], &existing);
    assert_eq!(
        daily.unwrap_err(),
        IngestError::NoMatchingColumns { days: vec![1, 3] }
    );

    let master = imp.import_workbook(&wb, ImportMode::MASTER, jan_2024(), &[], &existing);
    assert_eq!(
        master.unwrap_err(),
        IngestError::NoMatchingColumns { days: vec![] }
    );

    // 失败时不产生数据集，调用方持有的旧数据不变
    assert_eq!(existing, seed_records());
}

#[test]
fn test_unselected_day_column_is_ignored() {
    let wb = workbook("Sales", &daily_rows());
    let result = importer().import_workbook(&wb, ImportMode::DAILY, jan_2024(), &[3], &[]);
    assert_eq!(
        result.unwrap_err(),
        IngestError::NoMatchingColumns { days: vec![3] }
    );
}

#[test]
fn test_empty_fallback_sheet_yields_no_matching_columns() {
    let wb = Workbook::new(vec![SheetGrid::from_rows("Data", Vec::new())]);
    let result = importer().import_workbook(&wb, ImportMode::DAILY, jan_2024(), &[1], &[]);
    assert_eq!(
        result.unwrap_err(),
        IngestError::NoMatchingColumns { days: vec![1] }
    );
}

#[test]
fn test_daily_sheet_starting_in_column_b() {
    // A 列整列为空，已用区域从 B1 开始
    let mut range: Range<Data> = Range::new((0, 1), (2, 3));
    range.set_value((0, 2), Data::String("1/1/2024".to_string()));
    range.set_value((1, 1), Data::String("ACHIEVERS".to_string()));
    range.set_value((2, 1), Data::String("Product A".to_string()));
    range.set_value((2, 2), Data::Float(100.0));
    let wb = Workbook::new(vec![SheetGrid::from_range("Sales", &range)]);

    let outcome = importer()
        .import_workbook(&wb, ImportMode::DAILY, jan_2024(), &[1], &[])
        .unwrap();

    assert_eq!(outcome.imported.len(), 1);
    assert_eq!(outcome.imported[0].team.as_deref(), Some("Achievers"));
    assert_eq!(outcome.imported[0].metric, "Product A");
    assert_eq!(outcome.imported[0].actual, 100.0);
}

#[test]
fn test_header_scan_starts_at_first_used_row() {
    // 表头位于第 13 行，但已用区域从第 13 行开始
    let mut range: Range<Data> = Range::new((12, 0), (14, 1));
    range.set_value((12, 1), Data::String("1/1/2024".to_string()));
    range.set_value((13, 0), Data::String("CONCORD".to_string()));
    range.set_value((14, 0), Data::String("Product B".to_string()));
    range.set_value((14, 1), Data::Float(42.0));
    let wb = Workbook::new(vec![SheetGrid::from_range("Sales", &range)]);

    let outcome = importer()
        .import_workbook(&wb, ImportMode::DAILY, jan_2024(), &[1], &[])
        .unwrap();

    assert_eq!(outcome.imported.len(), 1);
    assert_eq!(outcome.imported[0].actual, 42.0);
}
