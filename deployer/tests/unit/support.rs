//! Shared test helpers

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use shipyard::deploy::credentials::Credentials;
use shipyard::deploy::service::DeployService;
use shipyard::errors::DeployError;
use shipyard::http::client::{HttpRequest, HttpResponse, HttpTransport, StatusCode};
use shipyard::models::deployment::Provider;
use shipyard::models::project::{ProjectFile, ProjectFiles};
use shipyard::storage::settings::EndpointSettings;

/// Transport that replays queued responses and records every request
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, DeployError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_json(&self, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).unwrap();
        let body = serde_json::to_vec(&body).unwrap();
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn push_transport_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(DeployError::Internal(message.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, DeployError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DeployError::Internal("no response queued".to_string())))
    }
}

/// Service with every provider configured, talking to `transport`
pub fn service_with_all_tokens(transport: Arc<MockTransport>) -> DeployService {
    let credentials = Provider::ALL
        .into_iter()
        .fold(Credentials::default(), |creds, provider| {
            creds.with_token(provider, format!("{}_token", provider.as_str()))
        });
    DeployService::new(credentials, transport, &EndpointSettings::default())
}

pub fn sample_files() -> ProjectFiles {
    ProjectFiles::new(vec![
        ProjectFile::binary("img/logo.png", &[0x89, 0x50, 0x4e, 0x47]),
        ProjectFile::text("index.html", "<h1>hello</h1>"),
    ])
}
