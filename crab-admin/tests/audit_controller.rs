// crab-admin/tests/audit_controller.rs
// 审计日志控制器测试

mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use common::{MockHttp, log_page, server_error};
use crab_admin::{
    AuditController, ClientError, DateRange, FetchOutcome, LoadStatus, LogClient, UserRef,
};
use serde_json::json;

const PAGED: &str = "activitylog/paged";
const FILTER: &str = "activitylog/filter";

fn controller(http: &Arc<MockHttp>) -> AuditController {
    AuditController::new(LogClient::new(http.clone()), 10)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn test_unfiltered_request_uses_paged_endpoint() {
    let http = MockHttp::new();
    http.reply(PAGED, Ok(log_page(1, 3, 23)));
    let audit = controller(&http);

    assert_eq!(audit.state().await.status, LoadStatus::Idle);
    assert_eq!(audit.request_page(1).await.unwrap(), FetchOutcome::Applied);

    let state = audit.state().await;
    assert_eq!(state.status, LoadStatus::Loaded);
    assert_eq!(state.items.len(), 3);
    assert_eq!(state.total_count, 23);
    assert_eq!(state.total_pages, 3);
    assert_eq!(state.current_page, 1);
    assert!(state.error.is_none());

    let calls = http.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, PAGED);
    assert_eq!(calls[0].param("page"), Some("1"));
    assert_eq!(calls[0].param("size"), Some("10"));
}

#[tokio::test]
async fn test_page_echoed_by_server_wins() {
    let http = MockHttp::new();
    http.reply(PAGED, Ok(log_page(3, 2, 22)));
    let audit = controller(&http);

    audit.request_page(9).await.unwrap();

    let state = audit.state().await;
    assert_eq!(state.current_page, 3);
    assert_eq!(state.total_pages, 3);
    assert_eq!(http.calls()[0].param("page"), Some("9"));
}

#[tokio::test]
async fn test_page_zero_rejected() {
    let http = MockHttp::new();
    let audit = controller(&http);

    let err = audit.request_page(0).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(http.call_count(), 0);
    assert_eq!(audit.state().await.status, LoadStatus::Idle);
}

#[tokio::test]
async fn test_inverted_range_rejected_without_request() {
    let http = MockHttp::new();
    let audit = controller(&http);

    let range = DateRange::new(Some(date("2024-05-10")), Some(date("2024-05-01")));
    let err = audit.apply_filter(None, range).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    let err = audit
        .apply_raw_filter(None, Some("2024-05-10"), Some("2024-05-01"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    assert_eq!(http.call_count(), 0);
    let state = audit.state().await;
    assert_eq!(state.status, LoadStatus::Idle);
    assert!(state.validation_error.is_some());
    assert!(state.filter.date_range.is_empty());
}

#[tokio::test]
async fn test_malformed_date_rejected() {
    let http = MockHttp::new();
    let audit = controller(&http);

    let err = audit
        .apply_raw_filter(None, Some("10/05/2024"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(http.call_count(), 0);
}

#[tokio::test]
async fn test_valid_filter_clears_validation_message() {
    let http = MockHttp::new();
    http.reply(FILTER, Ok(log_page(1, 1, 1)));
    let audit = controller(&http);

    let bad = DateRange::new(Some(date("2024-05-10")), Some(date("2024-05-01")));
    assert!(audit.apply_filter(None, bad).await.is_err());

    let good = DateRange::new(Some(date("2024-05-01")), Some(date("2024-05-10")));
    assert_eq!(
        audit.apply_filter(None, good).await.unwrap(),
        FetchOutcome::Applied
    );
    assert!(audit.state().await.validation_error.is_none());
}

#[tokio::test]
async fn test_user_filter_routes_to_filter_endpoint() {
    let http = MockHttp::new();
    http.reply(FILTER, Ok(log_page(1, 2, 2)));
    let audit = controller(&http);

    audit
        .apply_filter(Some("7".into()), DateRange::default())
        .await
        .unwrap();

    let call = &http.calls()[0];
    assert_eq!(call.path, FILTER);
    assert_eq!(call.param("userId"), Some("7"));
    assert_eq!(call.param("page"), Some("1"));
    assert_eq!(call.param("startDate"), None);
    assert_eq!(call.param("endDate"), None);
}

#[tokio::test]
async fn test_complete_range_routes_to_filter_endpoint() {
    let http = MockHttp::new();
    http.reply(FILTER, Ok(log_page(1, 2, 2)));
    let audit = controller(&http);

    audit
        .apply_raw_filter(None, Some("2024-01-01"), Some("2024-01-31"))
        .await
        .unwrap();

    let call = &http.calls()[0];
    assert_eq!(call.path, FILTER);
    assert_eq!(call.param("startDate"), Some("2024-01-01"));
    assert_eq!(call.param("endDate"), Some("2024-01-31"));
    assert_eq!(call.param("userId"), None);
}

#[tokio::test]
async fn test_half_open_range_uses_paged_endpoint() {
    let http = MockHttp::new();
    http.reply(PAGED, Ok(log_page(1, 2, 2)));
    let audit = controller(&http);

    audit
        .apply_raw_filter(None, Some("2024-01-01"), None)
        .await
        .unwrap();

    assert_eq!(http.calls()[0].path, PAGED);
}

#[tokio::test]
async fn test_select_user_does_not_fetch() {
    let http = MockHttp::new();
    http.reply(FILTER, Ok(log_page(1, 1, 1)));
    http.reply(PAGED, Ok(log_page(1, 4, 4)));
    let audit = controller(&http);

    let user = UserRef {
        id: "12".into(),
        display_name: "Ana".into(),
    };
    audit.select_user(Some(&user)).await;
    assert_eq!(http.call_count(), 0);

    // routing follows the filter at the time of each fetch
    audit.request_page(1).await.unwrap();
    audit.select_user(None).await;
    audit.request_page(1).await.unwrap();

    let calls = http.calls();
    assert_eq!(calls[0].path, FILTER);
    assert_eq!(calls[0].param("userId"), Some("12"));
    assert_eq!(calls[1].path, PAGED);
    assert_eq!(audit.state().await.items.len(), 4);
}

#[tokio::test]
async fn test_set_filter_then_single_page_request() {
    let http = MockHttp::new();
    http.reply(FILTER, Ok(log_page(3, 2, 25)));
    let audit = controller(&http);

    audit
        .set_raw_filter(Some("5".into()), Some("2024-03-01"), Some("2024-03-31"))
        .await
        .unwrap();
    assert_eq!(http.call_count(), 0);
    assert_eq!(audit.state().await.status, LoadStatus::Idle);

    assert_eq!(audit.request_page(3).await.unwrap(), FetchOutcome::Applied);

    let calls = http.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, FILTER);
    assert_eq!(calls[0].param("page"), Some("3"));
    assert_eq!(calls[0].param("userId"), Some("5"));
    assert_eq!(calls[0].param("startDate"), Some("2024-03-01"));
    assert_eq!(audit.state().await.current_page, 3);
}

#[tokio::test]
async fn test_set_filter_rejects_inverted_range() {
    let http = MockHttp::new();
    let audit = controller(&http);

    audit
        .set_filter(Some("5".into()), DateRange::default())
        .await
        .unwrap();

    let bad = DateRange::new(Some(date("2024-05-10")), Some(date("2024-05-01")));
    let err = audit.set_filter(None, bad).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    let state = audit.state().await;
    assert!(state.validation_error.is_some());
    // previous filter kept
    assert_eq!(state.filter.user_id.as_deref(), Some("5"));
    assert_eq!(http.call_count(), 0);
}

#[tokio::test]
async fn test_clear_filter_goes_back_to_paged() {
    let http = MockHttp::new();
    http.reply(FILTER, Ok(log_page(1, 1, 1)));
    http.reply(PAGED, Ok(log_page(1, 5, 40)));
    let audit = controller(&http);

    audit
        .apply_filter(Some("3".into()), DateRange::default())
        .await
        .unwrap();
    audit.clear_filter().await.unwrap();

    let calls = http.calls();
    assert_eq!(calls[1].path, PAGED);
    let state = audit.state().await;
    assert!(!state.filter.is_active());
    assert_eq!(state.total_pages, 4);
}

#[tokio::test]
async fn test_failure_keeps_previous_items() {
    let http = MockHttp::new();
    http.reply(PAGED, Ok(log_page(1, 3, 30)));
    http.reply(PAGED, Err(server_error("boom")));
    let audit = controller(&http);

    audit.request_page(1).await.unwrap();
    let before = audit.state().await.items;

    assert_eq!(audit.request_page(2).await.unwrap(), FetchOutcome::Failed);

    let state = audit.state().await;
    assert_eq!(state.status, LoadStatus::Failed);
    assert_eq!(state.items, before);
    assert_eq!(state.current_page, 1);
    assert!(state.error.as_deref().unwrap().contains("boom"));
}

#[tokio::test]
async fn test_decode_failure_is_downgraded() {
    let http = MockHttp::new();
    http.reply(PAGED, Ok(json!({ "data": "not a list" })));
    let audit = controller(&http);

    assert_eq!(audit.request_page(1).await.unwrap(), FetchOutcome::Failed);
    assert_eq!(audit.state().await.status, LoadStatus::Failed);
}

#[tokio::test]
async fn test_stale_response_suppressed() {
    let http = MockHttp::new();
    let release_first = http.reply_gated(PAGED, Ok(log_page(1, 10, 30)));
    http.reply(PAGED, Ok(log_page(2, 10, 30)));
    let audit = controller(&http);

    let (first, second) = tokio::join!(audit.request_page(1), async {
        let outcome = audit.request_page(2).await;
        release_first.send(()).unwrap();
        outcome
    });

    assert_eq!(second.unwrap(), FetchOutcome::Applied);
    assert_eq!(first.unwrap(), FetchOutcome::Stale);

    let state = audit.state().await;
    assert_eq!(state.status, LoadStatus::Loaded);
    assert_eq!(state.current_page, 2);
    assert!(
        state
            .items
            .iter()
            .all(|e| e.as_value()["page"] == json!(2))
    );
}

#[tokio::test]
async fn test_stale_failure_does_not_mark_failed() {
    let http = MockHttp::new();
    let release_first = http.reply_gated(PAGED, Err(server_error("late")));
    http.reply(PAGED, Ok(log_page(2, 1, 11)));
    let audit = controller(&http);

    let (first, second) = tokio::join!(audit.request_page(1), async {
        let outcome = audit.request_page(2).await;
        release_first.send(()).unwrap();
        outcome
    });

    assert_eq!(first.unwrap(), FetchOutcome::Stale);
    assert_eq!(second.unwrap(), FetchOutcome::Applied);
    let state = audit.state().await;
    assert_eq!(state.status, LoadStatus::Loaded);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_next_and_previous_page() {
    let http = MockHttp::new();
    http.reply(PAGED, Ok(log_page(1, 10, 25)));
    http.reply(PAGED, Ok(log_page(2, 10, 25)));
    http.reply(PAGED, Ok(log_page(3, 5, 25)));
    http.reply(PAGED, Ok(log_page(2, 10, 25)));
    let audit = controller(&http);

    assert_eq!(audit.previous_page().await.unwrap(), None);
    audit.request_page(1).await.unwrap();
    assert_eq!(audit.next_page().await.unwrap(), Some(FetchOutcome::Applied));
    assert_eq!(audit.next_page().await.unwrap(), Some(FetchOutcome::Applied));
    assert_eq!(audit.state().await.current_page, 3);
    assert_eq!(audit.next_page().await.unwrap(), None);
    assert_eq!(audit.previous_page().await.unwrap(), Some(FetchOutcome::Applied));
    assert_eq!(audit.state().await.current_page, 2);
    assert_eq!(http.call_count(), 4);
}

#[tokio::test]
async fn test_refresh_reloads_current_page() {
    let http = MockHttp::new();
    http.reply(PAGED, Ok(log_page(2, 3, 13)));
    http.reply(PAGED, Ok(log_page(2, 3, 14)));
    let audit = controller(&http);

    audit.request_page(2).await.unwrap();
    audit.refresh().await.unwrap();

    assert_eq!(http.calls()[1].param("page"), Some("2"));
    assert_eq!(audit.state().await.total_count, 14);
}

#[tokio::test]
async fn test_load_users() {
    let http = MockHttp::new();
    http.reply(
        "users/getalluser",
        Ok(json!([{ "id": 1, "username": "admin" }, { "id": 2, "name": "Luis" }])),
    );
    http.reply("users/getalluser", Err(server_error("down")));
    let audit = controller(&http);

    assert_eq!(audit.load_users().await, FetchOutcome::Applied);
    let users = audit.state().await.users;
    assert_eq!(users.len(), 2);
    assert_eq!(users[1].display_name, "Luis");

    assert_eq!(audit.load_users().await, FetchOutcome::Failed);
    let state = audit.state().await;
    assert_eq!(state.users.len(), 2);
    assert!(state.error.is_some());
}
