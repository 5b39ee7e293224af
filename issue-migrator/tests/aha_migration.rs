mod common;

use common::{aha_runner, write_settings};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{bearer_token, body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gitlab_epic(id: u64, title: &str, parent_id: Option<u64>) -> Value {
    json!({"id": id, "iid": id, "group_id": 10000, "title": title, "parent_id": parent_id})
}

async fn mount_release(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/releases/PRJ-R-1/epics"))
        .and(bearer_token("aha-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "epics": [{"reference_num": "PRJ-E-1"}],
            "pagination": {"total_records": 1, "total_pages": 1, "current_page": 1}
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/epics/PRJ-E-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "epic": {
                "name": "Checkout",
                "description": {"body": "<p>Pay <strong>now</strong></p>"},
                "resource": "https://acme.aha.io/api/v1/epics/PRJ-E-1",
                "release": {"name": "Q1"},
                "features": [
                    {"name": "Cart", "resource": format!("{}/api/v1/features/PRJ-1", server.uri())}
                ]
            }
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/features/PRJ-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feature": {
                "name": "Cart",
                "description": {"body": "<ul><li>Add</li><li>Remove</li></ul>"},
                "resource": "https://acme.aha.io/api/v1/features/PRJ-1"
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn creates_epic_and_feature_child_epic() {
    let server = MockServer::start().await;
    mount_release(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v4/groups/10000/epics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v4/groups/10000/epics"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([gitlab_epic(41, "Checkout", None)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v4/groups/10000/epics"))
        .and(body_partial_json(json!({"title": "Checkout", "labels": "PM,release,Aha::Epic"})))
        .and(body_string_contains("Pay **now**"))
        .and(body_string_contains(
            "Roadmap: [Checkout](https://acme.aha.io/api/v1/epics/PRJ-E-1)",
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(gitlab_epic(41, "Checkout", None)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v4/groups/10000/epics"))
        .and(body_partial_json(json!({
            "title": "Cart",
            "labels": "PM,release,Aha::Feature",
            "parent_id": 41
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(gitlab_epic(42, "Cart", Some(41))))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let settings = write_settings(dir.path(), "aha.toml", &server, "per-record");

    let summary = aha_runner(settings, false).migrate_aha().await.unwrap();

    assert_eq!(summary.records_fetched, 1);
    assert_eq!(summary.records_migrated, 1);
    assert_eq!(summary.epics_created, 2);
    assert_eq!(summary.epics_reused, 0);
}

#[tokio::test]
async fn rerun_reuses_existing_epics() {
    let server = MockServer::start().await;
    mount_release(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v4/groups/10000/epics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            gitlab_epic(41, "Checkout", None),
            gitlab_epic(42, "Cart", Some(41))
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v4/groups/10000/epics"))
        .respond_with(ResponseTemplate::new(201).set_body_json(gitlab_epic(99, "x", None)))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let settings = write_settings(dir.path(), "aha.toml", &server, "per-record");

    let summary = aha_runner(settings, false).migrate_aha().await.unwrap();

    assert_eq!(summary.epics_created, 0);
    assert_eq!(summary.epics_reused, 2);
}

#[tokio::test]
async fn dry_run_only_reads() {
    let server = MockServer::start().await;
    mount_release(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v4/groups/10000/epics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let settings = write_settings(dir.path(), "aha.toml", &server, "per-record");

    let summary = aha_runner(settings, true).migrate_aha().await.unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.records_migrated, 1);
    assert_eq!(summary.epics_created, 0);
}
