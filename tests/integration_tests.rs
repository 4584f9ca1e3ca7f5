//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: YAML config → table events → list API
//! requests → table view

use console_pager::api::{ConsoleApi, ListSource};
use console_pager::config::load_config_from_str;
use console_pager::http::HttpClient;
use console_pager::pagination::{PagedTable, PaginationController};
use console_pager::preferences::Preferences;
use console_pager::query::{FilterQueryBuilder, SortingState};
use console_pager::resource::Resource;
use console_pager::Error;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http_for(server: &MockServer) -> Arc<HttpClient> {
    let yaml = format!("base_url: {}\naccess_token: test-token\n", server.uri());
    let config = load_config_from_str(&yaml).unwrap();
    Arc::new(HttpClient::with_config(config.http_config().unwrap()).unwrap())
}

fn sessions(names: &[&str]) -> serde_json::Value {
    names
        .iter()
        .map(|name| json!({"Id": format!("id-{name}"), "Name": name}))
        .collect()
}

async fn mount_page(
    server: &MockServer,
    endpoint: &str,
    request: serde_json::Value,
    response: serde_json::Value,
    expected_calls: u64,
) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_json(request))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(expected_calls)
        .mount(server)
        .await;
}

// ============================================================================
// Paging Tests
// ============================================================================

#[tokio::test]
async fn test_walk_sessions_to_last_page() {
    let mock_server = MockServer::start().await;
    let sort = json!({"Key": "Name", "Operator": "asc"});

    mount_page(
        &mock_server,
        "/describeSessions",
        json!({"MaxResults": 2, "SortToken": sort}),
        json!({"Sessions": sessions(&["a", "b"]), "NextToken": "t1"}),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/describeSessions",
        json!({"MaxResults": 2, "NextToken": "t1", "SortToken": sort}),
        json!({"Sessions": sessions(&["c"]), "NextToken": null}),
        1,
    )
    .await;

    let api: ConsoleApi = ConsoleApi::new(http_for(&mock_server), Resource::Sessions);
    let controller = PaginationController::new(2, SortingState::ascending("Name"));
    let mut table =
        PagedTable::with_controller(api, controller, Preferences::default().with_page_size(2));

    assert_eq!(table.load().await, 1);
    {
        let view = table.view();
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.counter(), "(2+)");
        assert_eq!(view.pages_count, 2);
    }

    assert_eq!(table.next_page().await.unwrap(), 1);
    let view = table.view();
    assert_eq!(view.items[0]["Name"], "c");
    assert_eq!(view.pages_count, 2);
    assert!(!view.open_end);
    assert_eq!(view.total_count, 3);
    assert_eq!(view.counter(), "(3)");

    // Page 3 was never advertised
    assert!(table.change_page(3).await.is_err());
}

#[tokio::test]
async fn test_empty_trailing_page_steps_back() {
    let mock_server = MockServer::start().await;
    let sort = json!({"Key": "DisplayName", "Operator": "asc"});

    mount_page(
        &mock_server,
        "/describeUsers",
        json!({"MaxResults": 2, "SortToken": sort}),
        json!({"Users": [{"UserId": "u1"}, {"UserId": "u2"}], "NextToken": "t1"}),
        2,
    )
    .await;
    mount_page(
        &mock_server,
        "/describeUsers",
        json!({"MaxResults": 2, "NextToken": "t1", "SortToken": sort}),
        json!({"Users": [], "NextToken": null}),
        1,
    )
    .await;

    let api: ConsoleApi = ConsoleApi::new(http_for(&mock_server), Resource::Users);
    let controller = PaginationController::new(2, SortingState::ascending("DisplayName"));
    let mut table =
        PagedTable::with_controller(api, controller, Preferences::default().with_page_size(2));

    table.load().await;
    assert_eq!(table.next_page().await.unwrap(), 2);

    let view = table.view();
    assert_eq!(view.current_page_index, 1);
    assert_eq!(view.pages_count, 1);
    assert!(!view.open_end);
    assert_eq!(view.items.len(), 2);
    assert_eq!(table.controller().page_tokens(), &[None]);
}

#[tokio::test]
async fn test_filtered_servers_request() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/describeServers",
        json!({
            "MaxResults": 20,
            "SortToken": {"Key": "Hostname", "Operator": "desc"},
            "Hostnames": [
                {"Operator": "CONTAINS", "Value": "gpu"},
                {"Operator": "NOT_CONTAINS", "Value": "old"}
            ],
            "Availabilities": [{"Operator": "=", "Value": "AVAILABLE"}],
            "Region": "eu-west-1"
        }),
        json!({"Servers": [{"Hostname": "gpu-1"}], "NextToken": null}),
        1,
    )
    .await;

    let query = FilterQueryBuilder::for_resource(Resource::Servers)
        .expression("Hostnames:gpu")
        .expression("Hostnames!:old")
        .expression("Availabilities=AVAILABLE")
        .build()
        .unwrap();

    let mut extra = console_pager::StringMap::new();
    extra.insert("Region".to_string(), "eu-west-1".to_string());

    let api: ConsoleApi = ConsoleApi::new(http_for(&mock_server), Resource::Servers);
    let controller = PaginationController::new(20, SortingState::descending("Hostname"))
        .with_query(query)
        .with_extra_params(extra);
    let mut table = PagedTable::with_controller(api, controller, Preferences::default());

    table.load().await;
    let view = table.view();
    assert!(!view.error);
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.counter(), "(1)");
}

#[tokio::test]
async fn test_page_size_preference_resets() {
    let mock_server = MockServer::start().await;
    let sort = json!({"Key": "Name", "Operator": "asc"});

    mount_page(
        &mock_server,
        "/describeSessionTemplates",
        json!({"MaxResults": 20, "SortToken": sort}),
        json!({"SessionTemplates": [{"Name": "t"}], "NextToken": "t1"}),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/describeSessionTemplates",
        json!({"MaxResults": 20, "NextToken": "t1", "SortToken": sort}),
        json!({"SessionTemplates": [{"Name": "u"}], "NextToken": "t2"}),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/describeSessionTemplates",
        json!({"MaxResults": 50, "SortToken": sort}),
        json!({"SessionTemplates": [{"Name": "t"}, {"Name": "u"}], "NextToken": null}),
        1,
    )
    .await;

    let api: ConsoleApi = ConsoleApi::new(http_for(&mock_server), Resource::SessionTemplates);
    let mut table = PagedTable::new(api, SortingState::ascending("Name"));
    table.load().await;
    table.next_page().await.unwrap();
    assert_eq!(table.view().current_page_index, 2);

    let fetches = table
        .confirm_preferences(Preferences::default().with_page_size(50))
        .await
        .unwrap();
    assert_eq!(fetches, 1);

    let view = table.view();
    assert_eq!(view.current_page_index, 1);
    assert_eq!(view.pages_count, 1);
    assert!(!view.open_end);
    assert_eq!(view.total_count, 2);
}

// ============================================================================
// Error Tests
// ============================================================================

#[tokio::test]
async fn test_api_error_is_reported_in_view() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/describeUserGroups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "UserGroups": null,
            "Error": {"code": "AccessDenied", "message": "Not authorized"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api: ConsoleApi = ConsoleApi::new(http_for(&mock_server), Resource::UserGroups);
    let mut table = PagedTable::new(api, SortingState::ascending("DisplayName"));
    table.load().await;

    let view = table.view();
    assert!(view.error);
    assert!(!view.loading);
    assert!(view.error_message.unwrap().contains("Not authorized"));
    assert!(view.items.is_empty());
    assert_eq!(table.controller().page_tokens(), &[None]);
}

#[tokio::test]
async fn test_unauthorized_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/describeSessions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired token"))
        .mount(&mock_server)
        .await;

    let api: ConsoleApi = ConsoleApi::new(http_for(&mock_server), Resource::Sessions);
    let err = api
        .list(&console_pager::ListRequest::first_page(20))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(matches!(err, Error::HttpStatus { status: 401, .. }));
}
