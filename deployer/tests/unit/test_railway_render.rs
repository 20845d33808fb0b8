//! Railway and Render adapter tests

use serde_json::json;
use shipyard::http::client::RequestBody;
use shipyard::models::deployment::{DeployConfig, DeployStatus, Provider};

use crate::support::{sample_files, service_with_all_tokens, MockTransport};

#[tokio::test]
async fn test_railway_project_created() {
    let transport = MockTransport::new();
    transport.push_json(
        200,
        json!({"data": {"projectCreate": {"id": "prj_42", "name": "demo"}}}),
    );
    let service = service_with_all_tokens(transport.clone());

    let result = service
        .deploy(&DeployConfig::new(Provider::Railway, "demo"), &sample_files())
        .await;

    assert_eq!(result.status, DeployStatus::Building);
    assert!(!result.success);
    assert_eq!(result.deployment_id.as_deref(), Some("prj_42"));
    assert_eq!(result.url.as_deref(), Some("https://railway.app/project/prj_42"));

    let requests = transport.requests();
    assert_eq!(requests[0].url, "https://backboard.railway.app/graphql/v2");
    let RequestBody::Json(body) = &requests[0].body else {
        panic!("expected a JSON body");
    };
    assert!(body["query"].as_str().unwrap().contains("projectCreate"));
    assert_eq!(body["variables"]["input"]["name"], "demo");
}

#[tokio::test]
async fn test_railway_graphql_errors_on_http_200() {
    let transport = MockTransport::new();
    transport.push_json(
        200,
        json!({"data": null, "errors": [{"message": "Not Authorized"}, {"message": "second"}]}),
    );
    let service = service_with_all_tokens(transport);

    let result = service
        .deploy(&DeployConfig::new(Provider::Railway, "demo"), &sample_files())
        .await;

    assert_eq!(result.status, DeployStatus::Error);
    assert_eq!(result.error.as_deref(), Some("Not Authorized"));
}

#[tokio::test]
async fn test_railway_http_failure() {
    let transport = MockTransport::new();
    transport.push_json(503, json!({}));
    let service = service_with_all_tokens(transport);

    let result = service
        .deploy(&DeployConfig::new(Provider::Railway, "demo"), &sample_files())
        .await;

    assert_eq!(
        result.error.as_deref(),
        Some("Railway deployment failed (HTTP 503)")
    );
}

#[tokio::test]
async fn test_render_static_site_request() {
    let transport = MockTransport::new();
    transport.push_json(
        201,
        json!({
            "service": {
                "id": "srv-abc",
                "name": "demo",
                "serviceDetails": {"url": "https://demo.onrender.com"}
            },
            "deployId": "dep-xyz"
        }),
    );
    let service = service_with_all_tokens(transport.clone());

    let mut config = DeployConfig::new(Provider::Render, "demo");
    config.build_command = Some("npm run build".to_string());
    config.output_directory = Some("dist".to_string());
    config
        .environment_variables
        .insert("NODE_ENV".to_string(), "production".to_string());
    config
        .environment_variables
        .insert("API_URL".to_string(), "https://api.example.com".to_string());

    let result = service.deploy(&config, &sample_files()).await;

    assert_eq!(result.status, DeployStatus::Building);
    assert_eq!(result.deployment_id.as_deref(), Some("srv-abc"));
    assert_eq!(result.url.as_deref(), Some("https://demo.onrender.com"));

    let requests = transport.requests();
    assert_eq!(requests[0].url, "https://api.render.com/v1/services");
    assert_eq!(requests[0].bearer.as_deref(), Some("render_token"));
    let RequestBody::Json(body) = &requests[0].body else {
        panic!("expected a JSON body");
    };
    assert_eq!(body["type"], "static_site");
    assert_eq!(body["name"], "demo");
    assert_eq!(body["serviceDetails"]["buildCommand"], "npm run build");
    assert_eq!(body["serviceDetails"]["publishPath"], "dist");
    assert_eq!(
        body["envVars"],
        json!([
            {"key": "API_URL", "value": "https://api.example.com"},
            {"key": "NODE_ENV", "value": "production"}
        ])
    );
}

#[tokio::test]
async fn test_render_error_message() {
    let transport = MockTransport::new();
    transport.push_json(400, json!({"id": "invalid", "message": "name is taken"}));
    transport.push_json(500, json!({}));
    let service = service_with_all_tokens(transport);
    let config = DeployConfig::new(Provider::Render, "demo");

    let first = service.deploy(&config, &sample_files()).await;
    assert_eq!(first.error.as_deref(), Some("name is taken"));

    let second = service.deploy(&config, &sample_files()).await;
    assert_eq!(
        second.error.as_deref(),
        Some("Render deployment failed (HTTP 500)")
    );
}
