//! Vercel adapter tests

use serde_json::json;
use shipyard::http::client::{Method, RequestBody};
use shipyard::models::deployment::{DeployConfig, DeployStatus, Provider};
use shipyard::models::project::{FileEncoding, ProjectFile, ProjectFiles};

use crate::support::{sample_files, service_with_all_tokens, MockTransport};

#[tokio::test]
async fn test_deploy_ready() {
    let transport = MockTransport::new();
    transport.push_json(
        200,
        json!({
            "id": "dpl_1",
            "url": "demo.vercel.app",
            "readyState": "READY",
            "createdAt": 1_700_000_000_000i64,
            "ready": 1_700_000_060_000i64
        }),
    );
    let service = service_with_all_tokens(transport.clone());

    let result = service
        .deploy(&DeployConfig::new(Provider::Vercel, "demo"), &sample_files())
        .await;

    assert!(result.success);
    assert_eq!(result.status, DeployStatus::Ready);
    assert_eq!(result.deployment_id.as_deref(), Some("dpl_1"));
    assert_eq!(result.url.as_deref(), Some("https://demo.vercel.app"));
    assert!(result.error.is_none());
    assert_eq!(result.created_at.timestamp(), 1_700_000_000);
    assert_eq!(result.ready_at.map(|t| t.timestamp()), Some(1_700_000_060));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].url, "https://api.vercel.com/v13/deployments");
    assert_eq!(requests[0].bearer.as_deref(), Some("vercel_token"));
}

#[tokio::test]
async fn test_deploy_request_body() {
    let transport = MockTransport::new();
    transport.push_json(200, json!({"id": "dpl_2", "readyState": "QUEUED"}));
    let service = service_with_all_tokens(transport.clone());

    let mut config = DeployConfig::new(Provider::Vercel, "demo");
    config.framework = Some("nextjs".to_string());
    config
        .environment_variables
        .insert("API_URL".to_string(), "https://api.example.com".to_string());

    let result = service.deploy(&config, &sample_files()).await;
    assert!(!result.success);
    assert_eq!(result.status, DeployStatus::Building);
    assert!(result.error.is_none());

    let requests = transport.requests();
    let RequestBody::Json(body) = &requests[0].body else {
        panic!("expected a JSON body, got {:?}", requests[0].body);
    };
    assert_eq!(body["name"], "demo");
    assert_eq!(body["target"], "production");
    assert_eq!(body["projectSettings"]["framework"], "nextjs");
    assert_eq!(body["env"]["API_URL"], "https://api.example.com");
    assert_eq!(body["files"][0]["file"], "img/logo.png");
    assert_eq!(body["files"][0]["encoding"], "base64");
    assert_eq!(body["files"][0]["data"], "iVBORw==");
    assert_eq!(body["files"][1]["file"], "index.html");
    assert_eq!(body["files"][1]["data"], "PGgxPmhlbGxvPC9oMT4=");
}

#[tokio::test]
async fn test_deploy_error_envelope() {
    let transport = MockTransport::new();
    transport.push_json(
        403,
        json!({"error": {"code": "forbidden", "message": "Not authorized"}}),
    );
    let service = service_with_all_tokens(transport);

    let result = service
        .deploy(&DeployConfig::new(Provider::Vercel, "demo"), &sample_files())
        .await;

    assert!(!result.success);
    assert_eq!(result.status, DeployStatus::Error);
    assert_eq!(result.error.as_deref(), Some("Not authorized"));
}

#[tokio::test]
async fn test_deploy_error_without_message() {
    let transport = MockTransport::new();
    transport.push_json(500, json!({}));
    let service = service_with_all_tokens(transport);

    let result = service
        .deploy(&DeployConfig::new(Provider::Vercel, "demo"), &sample_files())
        .await;

    assert_eq!(result.status, DeployStatus::Error);
    assert_eq!(
        result.error.as_deref(),
        Some("Vercel deployment failed (HTTP 500)")
    );
}

#[tokio::test]
async fn test_deploy_transport_error() {
    let transport = MockTransport::new();
    transport.push_transport_error("connection refused");
    let service = service_with_all_tokens(transport);

    let result = service
        .deploy(&DeployConfig::new(Provider::Vercel, "demo"), &sample_files())
        .await;

    assert!(!result.success);
    assert_eq!(result.status, DeployStatus::Error);
    assert!(result.error.unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_get_status() {
    let transport = MockTransport::new();
    transport.push_json(
        200,
        json!({
            "id": "dpl_1",
            "url": "demo.vercel.app",
            "readyState": "ERROR",
            "errorMessage": "Build step failed"
        }),
    );
    let service = service_with_all_tokens(transport.clone());

    let result = service.get_deployment_status(Provider::Vercel, "dpl_1").await;

    assert_eq!(result.status, DeployStatus::Error);
    assert_eq!(result.error.as_deref(), Some("Build step failed"));
    assert!(result.ready_at.is_none());

    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].url, "https://api.vercel.com/v13/deployments/dpl_1");
}

#[tokio::test]
async fn test_get_status_cancelled() {
    let transport = MockTransport::new();
    transport.push_json(200, json!({"id": "dpl_3", "readyState": "CANCELED"}));
    let service = service_with_all_tokens(transport);

    let result = service.get_deployment_status(Provider::Vercel, "dpl_3").await;

    assert_eq!(result.status, DeployStatus::Cancelled);
    assert!(!result.success);
    assert!(result.error.is_none());
}

#[tokio::test]
async fn test_get_status_encodes_deployment_id() {
    let transport = MockTransport::new();
    transport.push_json(200, json!({"id": "dpl_1", "readyState": "BUILDING"}));
    let service = service_with_all_tokens(transport.clone());

    service
        .get_deployment_status(Provider::Vercel, "../../v2/user#")
        .await;

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url,
        "https://api.vercel.com/v13/deployments/..%2F..%2Fv2%2Fuser%23"
    );
}

#[tokio::test]
async fn test_invalid_manifest_makes_no_request() {
    let transport = MockTransport::new();
    let service = service_with_all_tokens(transport.clone());
    let config = DeployConfig::new(Provider::Vercel, "demo");

    for path in ["../secrets.txt", "/etc/passwd"] {
        let files = ProjectFiles::new(vec![ProjectFile::text(path, "x")]);
        let result = service.deploy(&config, &files).await;
        assert_eq!(result.status, DeployStatus::Error);
        assert!(result.error.unwrap().starts_with("Validation error"));
    }

    let corrupt = ProjectFiles::new(vec![ProjectFile {
        path: "logo.png".to_string(),
        content: "%%%".to_string(),
        encoding: FileEncoding::Base64,
    }]);
    let result = service.deploy(&config, &corrupt).await;
    assert_eq!(result.status, DeployStatus::Error);
    assert!(result.error.unwrap().contains("Invalid base64 in 'logo.png'"));

    assert_eq!(transport.call_count(), 0);
}
