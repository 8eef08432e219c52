// Remote data gateway
//
// Every business operation funnels through one generic ExecuteRequest call.
// The trait seam exists so the wizard (and its tests) can run against a stub
// instead of a live portal backend.

use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};
use uuid::Uuid;

use crate::config::GatewayConfig;
use crate::error::PortalError;
use crate::models::requests::ExecuteRequestBody;
use crate::models::responses::ExecuteResponse;

/// One ExecuteRequest call, minus the entity name (the gateway owns that).
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub request_name: String,
    pub record_id: Option<String>,
    pub input_parameters: serde_json::Value,
}

impl GatewayRequest {
    pub fn new(request_name: &str, input_parameters: serde_json::Value) -> Self {
        Self {
            request_name: request_name.to_string(),
            record_id: None,
            input_parameters,
        }
    }

    pub fn with_record_id(
        request_name: &str,
        record_id: &str,
        input_parameters: serde_json::Value,
    ) -> Self {
        Self {
            request_name: request_name.to_string(),
            record_id: Some(record_id.to_string()),
            input_parameters,
        }
    }
}

/// Trait for gateway calls. Production code uses `RestGateway`; tests use
/// the scripted stub.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Issue one ExecuteRequest. Transport failures become `RemoteCall`
    /// errors; a response with `isSuccess=false` is returned as-is for the
    /// call site to interpret.
    async fn execute(&self, request: GatewayRequest) -> Result<ExecuteResponse, PortalError>;
}

/// Production gateway speaking to the portal backend over HTTP.
pub struct RestGateway {
    client: reqwest::Client,
    base_url: String,
    entity_name: String,
}

impl RestGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, PortalError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| PortalError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            entity_name: config.entity_name.clone(),
        })
    }
}

#[async_trait]
impl Gateway for RestGateway {
    async fn execute(&self, request: GatewayRequest) -> Result<ExecuteResponse, PortalError> {
        let correlation_id = Uuid::new_v4().simple().to_string();
        let url = format!(
            "{}/entities/ExecuteRequest?RequestName={}",
            self.base_url, request.request_name
        );
        info!(
            "[PHASE: gateway] [STEP: execute] {} requested (correlation_id={})",
            request.request_name, correlation_id
        );

        let body = ExecuteRequestBody {
            entity_name: self.entity_name.clone(),
            request_name: request.request_name.clone(),
            record_id: request.record_id,
            input_parameters: request.input_parameters,
        };

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(
                    "[PHASE: gateway] [STEP: execute] {} transport failure: {} (correlation_id={})",
                    request.request_name, e, correlation_id
                );
                return Err(PortalError::remote_fallback());
            }
        };

        // Business failures arrive as a normal JSON envelope regardless of
        // the HTTP status; only a body that cannot be parsed is treated as a
        // transport failure.
        let status = response.status();
        match response.json::<ExecuteResponse>().await {
            Ok(parsed) => {
                if !parsed.is_success {
                    info!(
                        "[PHASE: gateway] [STEP: execute] {} reported isSuccess=false (http={}, correlation_id={})",
                        request.request_name, status, correlation_id
                    );
                }
                Ok(parsed)
            }
            Err(e) => {
                warn!(
                    "[PHASE: gateway] [STEP: execute] {} returned an unreadable body: {} (http={}, correlation_id={})",
                    request.request_name, e, status, correlation_id
                );
                Err(PortalError::remote_fallback())
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StubGateway;
    use super::*;
    use serde_json::json;

    #[test]
    fn request_constructors_set_record_id() {
        let plain = GatewayRequest::new("CreateApplication", json!({}));
        assert!(plain.record_id.is_none());

        let scoped = GatewayRequest::with_record_id("UpdateApplication", "APP-1", json!({}));
        assert_eq!(scoped.record_id.as_deref(), Some("APP-1"));
    }

    #[test]
    fn rest_gateway_requires_a_usable_base_url() {
        let config = GatewayConfig::default();
        assert!(RestGateway::new(&config).is_ok());
    }

    #[tokio::test]
    async fn stub_replays_scripts_in_order_per_request_name() {
        let stub = StubGateway::new();
        stub.push_success("CreateApplication", json!({ "ApplicationId": "A" }));
        stub.push_failure("CreateApplication", "second call fails");

        let first = stub
            .execute(GatewayRequest::new("CreateApplication", json!({})))
            .await
            .unwrap();
        assert!(first.is_success);

        let second = stub
            .execute(GatewayRequest::new("CreateApplication", json!({})))
            .await
            .unwrap();
        assert!(!second.is_success);

        // Unscripted name falls back to an empty success.
        let other = stub
            .execute(GatewayRequest::new("RetrieveMasterValues", json!({})))
            .await
            .unwrap();
        assert!(other.is_success);
        assert_eq!(stub.call_count(), 3);
    }
}
