// ==========================================
// 订单看板集成测试
// ==========================================
// 测试目标: 粘贴导入 → 聚合 → 表格查询 的完整链路
// ==========================================

mod test_helpers;

use chrono::{DateTime, FixedOffset, TimeZone};
use cup_keychain_ops::api::{ApiError, DashboardApi};
use cup_keychain_ops::app::AppState;
use cup_keychain_ops::config::config_keys;
use cup_keychain_ops::domain::types::{DateRange, ProductCategory, ProductType, SortDirection, SortKey};
use cup_keychain_ops::engine::{ingest_payload, OrderFilter, OrderQuery};
use test_helpers::{create_test_db, insert_test_config, load_orders_fixture, open_test_connection};

fn now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 15, 12, 0, 0)
        .unwrap()
}

fn loaded_api() -> DashboardApi {
    let api = DashboardApi::with_query(OrderQuery::default());
    api.paste_orders(&load_orders_fixture())
        .expect("样例订单应能导入");
    api
}

#[test]
fn test_fixture_summary() {
    let api = loaded_api();
    let summary = api.summary().unwrap();

    assert_eq!(summary.order_count, 4);
    assert!((summary.financial.total_sales - 98.45).abs() < 1e-9);
    assert!((summary.financial.total_taxes - 4.95).abs() < 1e-9);
    assert!((summary.financial.total_shipping - 3.99).abs() < 1e-9);
    assert!(
        (summary.financial.average_order_value - summary.financial.total_sales / 4.0).abs() < 1e-9
    );

    let names: Vec<&str> = summary.sku_stats.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Purple Body",
            "Default",
            "Gradient",
            "Green",
            "Lime/Neon Green Body",
            "White Body"
        ]
    );

    assert_eq!(summary.category_stats[0].name, "Cup");
    assert_eq!(summary.category_stats[0].quantity, 6);
    assert_eq!(summary.product_type_stats[0].name, "Owala");
    assert_eq!(summary.product_type_stats[0].quantity, 4);

    let statuses: Vec<&str> = summary.statuses.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(statuses, vec!["Awaiting Shipment", "Shipped", "Completed", "Status 140"]);
}

#[test]
fn test_fixture_pieces_required() {
    let api = loaded_api();
    let pieces = api.pieces_required().unwrap();
    assert_eq!(pieces.len(), 15);

    let top: Vec<(&str, u64)> = pieces
        .iter()
        .take(5)
        .map(|p| (p.name.as_str(), p.quantity))
        .collect();
    assert_eq!(
        top,
        vec![
            ("Blue Ring", 2),
            ("Magenta Lid", 2),
            ("Orange Button", 2),
            ("Purple Bottle", 2),
            ("Yellow Handle", 2)
        ]
    );

    let by_type = api.pieces_by_type().unwrap();
    assert_eq!(by_type["Bottle"].len(), 3);
    assert_eq!(by_type["Ring"].len(), 3);
}

#[test]
fn test_reingest_same_payload_is_noop() {
    let api = loaded_api();
    let before = api.summary().unwrap();
    let after = api.paste_orders(&load_orders_fixture()).unwrap();
    assert_eq!(before, after);
    assert_eq!(api.order_count().unwrap(), 4);
}

#[test]
fn test_missing_main_orders_leaves_list_unchanged() {
    let previous = ingest_payload(&[], &load_orders_fixture()).unwrap().orders;
    assert!(ingest_payload(&previous, r#"{"data":{"orders":[]}}"#).is_err());

    let api = loaded_api();
    let err = api.paste_orders(r#"{"data":{"orders":[]}}"#).unwrap_err();
    assert!(matches!(err, ApiError::ImportError(_)));
    assert_eq!(api.order_count().unwrap(), 4);
    assert!(api.last_error().unwrap().is_some());
}

#[test]
fn test_unusable_entries_skipped_without_losing_valid_orders() {
    let api = DashboardApi::with_query(OrderQuery::default());
    let text = r#"{"data":{"main_orders":[
        {"main_order_id":"A1","sku_module":[{"sku_name":"White Body","quantity":1}],
         "price_module":{"grand_total":{"price_val":"15.99"}}},
        null,
        {"main_order_id":""}
    ]}}"#;

    let summary = api.paste_orders(text).expect("部分条目无效时仍应导入");
    assert_eq!(summary.order_count, 1);
    assert_eq!(api.order_count().unwrap(), 1);
    assert!(api.last_error().unwrap().is_none());
}

#[test]
fn test_table_date_buckets() {
    let api = loaded_api();

    let mut filter = OrderFilter {
        date_range: DateRange::Today,
        ..OrderFilter::default()
    };
    api.set_filter(filter.clone()).unwrap();
    assert_eq!(api.query_page_at(now()).unwrap().total_filtered, 1);

    filter.date_range = DateRange::Week;
    api.set_filter(filter.clone()).unwrap();
    assert_eq!(api.query_page_at(now()).unwrap().total_filtered, 2);

    filter.date_range = DateRange::Month;
    api.set_filter(filter.clone()).unwrap();
    assert_eq!(api.query_page_at(now()).unwrap().total_filtered, 3);

    filter.date_range = DateRange::All;
    api.set_filter(filter).unwrap();
    assert_eq!(api.query_page_at(now()).unwrap().total_filtered, 4);
}

#[test]
fn test_table_sort_and_rows() {
    let api = loaded_api();

    // 默认 date desc，无时间的订单排最后
    let page = api.query_page_at(now()).unwrap();
    let ids: Vec<&str> = page.rows.iter().map(|r| r.order_id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["576981234560001", "576981234560002", "576981234560003", "576981234560004"]
    );
    assert_eq!(page.rows[0].created_date, "2024-03-15");
    assert_eq!(page.rows[0].item_count, 3);
    assert_eq!(page.rows[0].total_display, "$41.97");
    assert_eq!(page.rows[2].total_display, "24.5");
    assert_eq!(page.rows[3].status, "Status 140");
    assert_eq!(page.rows[3].created_date, "N/A");

    let sort = api.request_sort(SortKey::Items).unwrap();
    assert_eq!(sort.direction, SortDirection::Asc);
    let page = api.query_page_at(now()).unwrap();
    assert_eq!(page.rows.last().unwrap().order_id, "576981234560001");
}

#[test]
fn test_filters_by_type_and_category() {
    let api = loaded_api();

    api.set_filter(OrderFilter {
        product_type: Some(ProductType::Stanley),
        ..OrderFilter::default()
    })
    .unwrap();
    let page = api.query_page_at(now()).unwrap();
    assert_eq!(page.total_filtered, 1);
    assert_eq!(page.rows[0].skus[1].display, "Stanley Gradient");

    api.set_filter(OrderFilter {
        category: Some(ProductCategory::Other),
        ..OrderFilter::default()
    })
    .unwrap();
    assert_eq!(api.query_page_at(now()).unwrap().total_filtered, 1);

    api.set_filter(OrderFilter {
        status: Some("SHIPPED".to_string()),
        ..OrderFilter::default()
    })
    .unwrap();
    assert_eq!(api.query_page_at(now()).unwrap().total_filtered, 1);
}

#[test]
fn test_pagination_resets_on_search() {
    let api = loaded_api();
    api.set_page_size(3).unwrap();
    api.set_page(2).unwrap();

    let page = api.query_page_at(now()).unwrap();
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.rows.len(), 1);

    api.set_search("0003").unwrap();
    let page = api.query_page_at(now()).unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.total_filtered, 1);
}

#[test]
fn test_app_state_uses_configured_defaults() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_test_config(&conn, config_keys::PAGE_SIZE, "2").unwrap();
    insert_test_config(&conn, config_keys::DEFAULT_SORT_KEY, "total").unwrap();
    insert_test_config(&conn, config_keys::DEFAULT_SORT_DIRECTION, "asc").unwrap();
    drop(conn);

    let state = AppState::new(db_path).expect("AppState should initialize");
    state
        .dashboard_api
        .paste_orders(&load_orders_fixture())
        .unwrap();

    let page = state.dashboard_api.query_page_at(now()).unwrap();
    assert_eq!(page.page_size, 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.rows[0].total_display, "$15.99");

    // 清空后恢复配置中的默认排序
    state.dashboard_api.request_sort(SortKey::Id).unwrap();
    state.dashboard_api.clear().unwrap();
    let query = state.dashboard_api.current_query().unwrap();
    assert_eq!(query.sort.key, SortKey::Total);
    assert_eq!(query.sort.direction, SortDirection::Asc);
}
