//! Netlify adapter tests

use std::io::{Cursor, Read};

use serde_json::json;
use shipyard::http::client::{Method, RequestBody};
use shipyard::models::deployment::{DeployConfig, DeployStatus, Provider};

use crate::support::{sample_files, service_with_all_tokens, MockTransport};

fn archive_entries(data: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).unwrap();
            let mut content = Vec::new();
            entry.read_to_end(&mut content).unwrap();
            (entry.name().to_string(), content)
        })
        .collect()
}

#[tokio::test]
async fn test_deploy_new_site() {
    let transport = MockTransport::new();
    transport.push_json(201, json!({"id": "site-123", "name": "demo"}));
    transport.push_json(
        200,
        json!({
            "id": "dep-1",
            "site_id": "site-123",
            "state": "uploaded",
            "ssl_url": "https://demo.netlify.app",
            "deploy_ssl_url": "https://dep-1--demo.netlify.app",
            "created_at": "2024-05-01T12:00:00Z"
        }),
    );
    let service = service_with_all_tokens(transport.clone());

    let result = service
        .deploy(&DeployConfig::new(Provider::Netlify, "demo"), &sample_files())
        .await;

    assert_eq!(result.status, DeployStatus::Building);
    assert!(!result.success);
    assert_eq!(result.deployment_id.as_deref(), Some("dep-1"));
    assert_eq!(result.url.as_deref(), Some("https://demo.netlify.app"));
    assert_eq!(
        result.preview_url.as_deref(),
        Some("https://dep-1--demo.netlify.app")
    );
    assert_eq!(result.created_at.to_rfc3339(), "2024-05-01T12:00:00+00:00");

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url, "https://api.netlify.com/api/v1/sites");
    assert_eq!(
        requests[0].body,
        RequestBody::Json(json!({"name": "demo"}))
    );
    assert_eq!(
        requests[1].url,
        "https://api.netlify.com/api/v1/sites/site-123/deploys"
    );
}

#[tokio::test]
async fn test_deploy_existing_site_uploads_zip() {
    let transport = MockTransport::new();
    transport.push_json(422, json!({"errors": {"subdomain": ["must be unique"]}}));
    transport.push_json(200, json!({"id": "dep-2", "state": "ready", "url": "http://demo.netlify.app"}));
    let service = service_with_all_tokens(transport.clone());

    let result = service
        .deploy(&DeployConfig::new(Provider::Netlify, "demo"), &sample_files())
        .await;

    assert!(result.success);
    assert_eq!(result.status, DeployStatus::Ready);
    assert_eq!(result.url.as_deref(), Some("http://demo.netlify.app"));

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].method, Method::POST);
    assert_eq!(
        requests[1].url,
        "https://api.netlify.com/api/v1/sites/demo.netlify.app/deploys"
    );
    assert_eq!(requests[1].bearer.as_deref(), Some("netlify_token"));

    let RequestBody::Bytes { content_type, data } = &requests[1].body else {
        panic!("expected a ZIP body, got {:?}", requests[1].body);
    };
    assert_eq!(*content_type, "application/zip");

    let entries = archive_entries(data);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].0, "img/logo.png");
    assert_eq!(entries[0].1, vec![0x89, 0x50, 0x4e, 0x47]);
    assert_eq!(entries[1].0, "index.html");
    assert_eq!(entries[1].1, b"<h1>hello</h1>".to_vec());
}

#[tokio::test]
async fn test_site_creation_failure_stops_deploy() {
    let transport = MockTransport::new();
    transport.push_json(401, json!({"code": 401, "message": "Access Denied"}));
    let service = service_with_all_tokens(transport.clone());

    let result = service
        .deploy(&DeployConfig::new(Provider::Netlify, "demo"), &sample_files())
        .await;

    assert_eq!(result.status, DeployStatus::Error);
    assert_eq!(result.error.as_deref(), Some("Access Denied"));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_deploy_upload_failure_fallback_message() {
    let transport = MockTransport::new();
    transport.push_json(201, json!({"id": "site-123"}));
    transport.push_json(502, json!({}));
    let service = service_with_all_tokens(transport);

    let result = service
        .deploy(&DeployConfig::new(Provider::Netlify, "demo"), &sample_files())
        .await;

    assert_eq!(result.status, DeployStatus::Error);
    assert_eq!(
        result.error.as_deref(),
        Some("Netlify deployment failed (HTTP 502)")
    );
}

#[tokio::test]
async fn test_get_status() {
    let transport = MockTransport::new();
    transport.push_json(
        200,
        json!({
            "id": "dep-1",
            "state": "ready",
            "ssl_url": "https://demo.netlify.app",
            "published_at": "2024-05-01T12:01:30Z"
        }),
    );
    transport.push_json(200, json!({"id": "dep-2", "state": "error"}));
    let service = service_with_all_tokens(transport.clone());

    let ready = service.get_deployment_status(Provider::Netlify, "dep-1").await;
    assert!(ready.success);
    assert!(ready.ready_at.is_some());

    let failed = service.get_deployment_status(Provider::Netlify, "dep-2").await;
    assert_eq!(failed.status, DeployStatus::Error);
    assert_eq!(failed.error.as_deref(), Some("Deployment failed"));

    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].url, "https://api.netlify.com/api/v1/deploys/dep-1");
}

#[tokio::test]
async fn test_get_status_encodes_deploy_id() {
    let transport = MockTransport::new();
    transport.push_json(200, json!({"id": "dep-1", "state": "building"}));
    let service = service_with_all_tokens(transport.clone());

    service
        .get_deployment_status(Provider::Netlify, "dep-1/../../sites?x=1")
        .await;

    assert_eq!(
        transport.requests()[0].url,
        "https://api.netlify.com/api/v1/deploys/dep-1%2F..%2F..%2Fsites%3Fx=1"
    );
}
