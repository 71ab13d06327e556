// Integration tests for `ApiClient` using wiremock.
#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lmsync_api::{ApiClient, ApiToken, Error};
use secrecy::SecretString;

// ── Helpers ─────────────────────────────────────────────────────────

fn token() -> ApiToken {
    ApiToken::new("test-id", SecretString::from("test-key".to_string()))
}

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base = server.uri().parse().expect("mock server uri");
    let client = ApiClient::with_client(reqwest::Client::new(), base, token());
    (server, client)
}

fn list_body(items: serde_json::Value) -> serde_json::Value {
    json!({
        "status": 200,
        "errmsg": "OK",
        "data": { "total": items.as_array().map_or(0, Vec::len), "items": items }
    })
}

// ── Lookups ─────────────────────────────────────────────────────────

#[tokio::test]
async fn find_device_by_display_name_builds_unique_key_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/santaba/rest/device/devices"))
        .and(query_param("filter", "displayName:sw1"))
        .and(query_param("fields", "id,displayName"))
        .and(query_param("size", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(json!([
            { "id": 42, "displayName": "sw1" }
        ]))))
        .mount(&server)
        .await;

    let device = client
        .find_device_by_display_name("sw1", "id,displayName")
        .await
        .unwrap()
        .expect("device");

    assert_eq!(device.id, 42);
    assert_eq!(device.display_name, "sw1");
}

#[tokio::test]
async fn find_device_by_hostname_ands_collector_description() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/santaba/rest/device/devices"))
        .and(query_param(
            "filter",
            "hostName:sw1.example.com,collectorDescription:c1",
        ))
        .and(query_param("size", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(json!([
            { "id": 7, "name": "sw1.example.com" }
        ]))))
        .mount(&server)
        .await;

    let device = client
        .find_device_by_hostname("sw1.example.com", "c1", "id")
        .await
        .unwrap()
        .expect("device");

    assert_eq!(device.id, 7);
}

#[tokio::test]
async fn empty_item_list_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/santaba/rest/device/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(json!([]))))
        .mount(&server)
        .await;

    let device = client.find_device_by_display_name("ghost", "id").await.unwrap();
    assert!(device.is_none());
}

#[tokio::test]
async fn root_group_resolves_without_a_request() {
    // No mock mounted: any request would 404 and fail the call.
    let (_server, client) = setup().await;

    let group = client.find_device_group("/", "id").await.unwrap().expect("root");
    assert_eq!(group.id, lmsync_api::ROOT_GROUP_ID);
}

#[tokio::test]
async fn group_lookup_strips_leading_slash() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/santaba/rest/device/groups"))
        .and(query_param("filter", "fullPath:network/switches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(json!([
            { "id": 9, "fullPath": "network/switches", "parentId": 3 }
        ]))))
        .mount(&server)
        .await;

    let group = client
        .find_device_group("/network/switches", "id,parentId")
        .await
        .unwrap()
        .expect("group");

    assert_eq!(group.id, 9);
    assert_eq!(group.parent_id, 3);
}

#[tokio::test]
async fn groups_by_ids_render_or_filter() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/santaba/rest/device/groups"))
        .and(query_param("filter", "id:4||id:8"))
        .and(query_param("size", "-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(json!([
            { "id": 4, "fullPath": "network" },
            { "id": 8, "fullPath": "network/switches" }
        ]))))
        .mount(&server)
        .await;

    let groups = client
        .find_device_groups_by_ids(&[4, 8], "fullPath,appliesTo")
        .await
        .unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].full_path, "network/switches");
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn patch_carries_patch_fields_directive() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/santaba/rest/device/devices/42"))
        .and(query_param("size", "-1"))
        .and(query_param("patchFields", "description,disableAlerting"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200, "data": { "id": 42 }
        })))
        .mount(&server)
        .await;

    client
        .update_device(
            42,
            &json!({ "name": "sw1.example.com", "description": "edge", "disableAlerting": true }),
            vec!["description".into(), "disableAlerting".into()],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn create_group_returns_new_record() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/santaba/rest/device/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "data": { "id": 31, "fullPath": "network", "parentId": 1 }
        })))
        .mount(&server)
        .await;

    let group = client
        .create_device_group(&json!({ "name": "network", "parentId": 1 }))
        .await
        .unwrap();

    assert_eq!(group.id, 31);
    assert_eq!(group.parent_id, 1);
}

#[tokio::test]
async fn requests_are_lmv1_signed() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/santaba/rest/setting/collectors"))
        .and(header_regex("Authorization", r"^LMv1 test-id:[A-Za-z0-9+/=]+:\d+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(json!([
            { "id": 12, "description": "c1" }
        ]))))
        .mount(&server)
        .await;

    let collector = client.find_collector("c1", "id").await.unwrap().expect("collector");
    assert_eq!(collector.id, 12);
}

// ── Validation failures ─────────────────────────────────────────────

#[tokio::test]
async fn in_band_envelope_failure_surfaces_raw_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 1401, "errmsg": "Authentication failed"
        })))
        .mount(&server)
        .await;

    let err = client
        .find_device_by_display_name("sw1", "id")
        .await
        .expect_err("envelope failure");

    match err {
        Error::Api { status, ref body } => {
            assert_eq!(status, 1401);
            assert!(body.contains("Authentication failed"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn http_error_surfaces_status_and_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/santaba/rest/device/devices/42"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client.delete_device(42).await.expect_err("http failure");

    match err {
        Error::Api { status, ref body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client
        .find_device_by_display_name("sw1", "id")
        .await
        .expect_err("parse failure");

    match err {
        Error::Deserialization { ref body, .. } => assert_eq!(body, "not json"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
