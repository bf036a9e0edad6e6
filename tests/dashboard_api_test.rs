// ==========================================
// DashboardApi 集成测试
// ==========================================
// 测试范围:
// 1. 按配置构建: from_config
// 2. 汇总查询: get_month_summary, get_active_month_overview, get_multi_month_stats
// 3. 月历查询: list_entry_months, list_archived_months, check_entry_allowed
// ==========================================

mod helpers;

use std::sync::Arc;

use chrono::NaiveDate;
use helpers::test_data_builder::RequestBuilder;
use production_planner::api::{ApiError, DashboardApi};
use production_planner::config::ConfigManager;
use production_planner::domain::month::ProductionMonth;
use production_planner::domain::request::ProductionRequest;
use production_planner::domain::types::MonthState;
use production_planner::repository::InMemoryProductionRequestRepository;
use test_helpers::{create_test_db, insert_test_config, open_test_connection};

fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tokens(months: &[ProductionMonth]) -> Vec<String> {
    months.iter().map(|m| m.to_string()).collect()
}

fn seed_rows() -> Vec<ProductionRequest> {
    vec![
        RequestBuilder::new("R1")
            .product("IW-1")
            .marketplace("MP-A", "Trendyol")
            .month("2026-02")
            .unit_size(2.0)
            .requested(50)
            .produced(120)
            .build(),
        RequestBuilder::new("R2")
            .product("IW-1")
            .marketplace("MP-B", "Amazon")
            .month("2026-02")
            .unit_size(2.0)
            .requested(100)
            .produced(120)
            .build(),
        RequestBuilder::new("R3")
            .product("IW-2")
            .marketplace("MP-A", "Trendyol")
            .month("2026-04")
            .requested(7)
            .build(),
        RequestBuilder::new("R4")
            .product("IW-2")
            .marketplace("MP-A", "Trendyol")
            .month("2025-06")
            .requested(3)
            .produced(3)
            .build(),
    ]
}

fn make_api() -> DashboardApi {
    let repo = InMemoryProductionRequestRepository::with_rows(seed_rows()).unwrap();
    DashboardApi::new(Arc::new(repo))
}

#[test]
fn test_month_summary() {
    let api = make_api();

    let summary = api.get_month_summary("2026-02").unwrap();
    assert_eq!(summary.total_requests, 2);
    assert_eq!(summary.total_quantity, 150);
    assert_eq!(summary.total_produced, 120);
    assert_eq!(summary.marketplace_summaries.len(), 2);

    let empty = api.get_month_summary("2030-01").unwrap();
    assert!(empty.is_empty());

    // 带空白的令牌不做纠正
    assert!(matches!(
        api.get_month_summary(" 2026-02 "),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        api.check_entry_allowed("2026-03 ", make_date(2026, 2, 4)),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        api.get_multi_month_stats(&[" 2026-02"]),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn test_active_month_overview() {
    let api = make_api();
    let overview = api.get_active_month_overview(make_date(2026, 2, 5)).unwrap();

    let months: Vec<String> = overview
        .iter()
        .map(|o| o.production_month.to_string())
        .collect();
    assert_eq!(months, vec!["2026-01", "2026-02", "2026-03", "2026-04"]);

    assert_eq!(overview[0].state, MonthState::PastLocked);
    assert_eq!(overview[1].state, MonthState::CurrentLocked);
    assert!(overview[1].locked);
    assert_eq!(overview[1].aggregate.total_produced, 120);
    assert!(overview[2].aggregate.is_empty());
    assert_eq!(overview[3].state, MonthState::FutureOpen);
    assert_eq!(overview[3].aggregate.total_quantity, 7);
}

#[test]
fn test_multi_month_stats() {
    let api = make_api();

    let stats = api
        .get_multi_month_stats(&["2026-04", "2025-06", "2026-02", "2026-02"])
        .unwrap();
    let months: Vec<String> = stats
        .months
        .iter()
        .map(|m| m.production_month.to_string())
        .collect();
    assert_eq!(months, vec!["2025-06", "2026-02", "2026-04"]);
    assert_eq!(stats.total_requests, 4);
    assert_eq!(stats.total_quantity, 160);
    assert_eq!(stats.total_produced, 123);

    assert!(matches!(
        api.get_multi_month_stats(&["2026-02", "bad"]),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn test_entry_and_archived_months() {
    let api = make_api();

    assert_eq!(
        tokens(&api.list_entry_months(make_date(2026, 2, 4))),
        vec!["2026-02", "2026-03", "2026-04"]
    );
    assert_eq!(
        tokens(&api.list_entry_months(make_date(2026, 2, 5))),
        vec!["2026-03", "2026-04"]
    );

    let archived = api.list_archived_months(make_date(2026, 2, 5), Some(3));
    assert_eq!(tokens(&archived), vec!["2025-12", "2025-11", "2025-10"]);

    // 默认上限 12
    assert_eq!(api.list_archived_months(make_date(2026, 2, 5), None).len(), 12);
}

#[test]
fn test_check_entry_allowed() {
    let api = make_api();
    let today = make_date(2026, 2, 4);

    assert!(api.check_entry_allowed("2026-02", today).is_ok());
    assert!(api.check_entry_allowed("2027-01", today).is_ok());

    let err = api.check_entry_allowed("2026-01", today).unwrap_err();
    assert!(matches!(err, ApiError::MonthLocked { ref month } if month == "2026-01"));

    assert!(matches!(
        api.check_entry_allowed("2026-00", today),
        Err(ApiError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_from_config() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_test_config(&conn).expect("Failed to insert test config");
    let config = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    let repo = InMemoryProductionRequestRepository::with_rows(seed_rows()).unwrap();
    let api = DashboardApi::from_config(Arc::new(repo), &config)
        .await
        .expect("Failed to build DashboardApi");

    // 截止日 10，提前 3 个月，截止前回看 1 个月
    let today = make_date(2026, 2, 9);
    let view = api.get_calendar_view(today);
    assert!(!view.entry_locked_for_current);
    assert_eq!(
        tokens(&view.entry_months),
        vec!["2026-02", "2026-03", "2026-04", "2026-05"]
    );
    assert_eq!(view.active_months.len(), 5);
    assert_eq!(view.archived_months.len(), 6);
    assert_eq!(view.archived_months[0].to_string(), "2025-12");

    // 截止后不回看
    let view = api.get_calendar_view(make_date(2026, 2, 10));
    assert!(view.entry_locked_for_current);
    assert_eq!(view.active_months[0].month.to_string(), "2026-02");

    // PROPORTIONAL: 平台汇总带分摊产量
    let summary = api.get_month_summary("2026-02").unwrap();
    let produced: f64 = summary
        .marketplace_summaries
        .iter()
        .map(|m| m.produced_quantity.unwrap())
        .sum();
    assert!((produced - 120.0).abs() < 1e-9);
}
