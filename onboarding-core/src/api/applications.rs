// Application operations over the remote data gateway
//
// Create, per-section update, resume, and master data retrieval. Every call
// site converts gateway failures into the error taxonomy; nothing here
// retries automatically; a failed call is re-issued only by explicit user
// action.

use log::{info, warn};
use serde_json::{json, Value};

use crate::api::gateway::{Gateway, GatewayRequest};
use crate::error::PortalError;
use crate::models::responses::{ExecuteResponse, MasterDataSchema, MasterValuesData, ResumePayload};

/// RequestName values understood by the portal backend.
pub const REQUEST_CREATE_APPLICATION: &str = "CreateApplication";
pub const REQUEST_UPDATE_APPLICATION: &str = "UpdateApplication";
pub const REQUEST_RESUME_APPLICATION: &str = "ResumeApplication";
pub const REQUEST_RETRIEVE_MASTER_VALUES: &str = "RetrieveMasterValues";

/// Create a new application from the first submitted section. Returns the
/// server-assigned application id.
pub async fn create_application(
    gateway: &dyn Gateway,
    section_payload: Value,
) -> Result<String, PortalError> {
    let response = gateway
        .execute(GatewayRequest::new(
            REQUEST_CREATE_APPLICATION,
            section_payload,
        ))
        .await?;
    let response = require_success(response)?;
    extract_application_id(&response).ok_or_else(|| {
        warn!("[PHASE: application] [STEP: create] response carried no application id");
        PortalError::remote_fallback()
    })
}

/// Update one section of an existing application. The payload is scoped to
/// that section only.
pub async fn update_application_section(
    gateway: &dyn Gateway,
    application_id: &str,
    section_payload: Value,
) -> Result<(), PortalError> {
    let response = gateway
        .execute(GatewayRequest::with_record_id(
            REQUEST_UPDATE_APPLICATION,
            application_id,
            section_payload,
        ))
        .await?;
    require_success(response).map(|_| ())
}

/// Fetch a previously saved application. Any failure maps to
/// `ResumeNotFound`: there is no safe default state to resume into, so the
/// caller must redirect instead of rendering the wizard.
pub async fn resume_application(
    gateway: &dyn Gateway,
    application_id: &str,
) -> Result<ResumePayload, PortalError> {
    let response = gateway
        .execute(GatewayRequest::with_record_id(
            REQUEST_RESUME_APPLICATION,
            application_id,
            Value::Object(Default::default()),
        ))
        .await
        .map_err(|e| {
            warn!(
                "[PHASE: application] [STEP: resume] fetch for '{}' failed: {}",
                application_id, e
            );
            not_found(application_id)
        })?;
    if !response.is_success {
        info!(
            "[PHASE: application] [STEP: resume] backend could not resolve '{}'",
            application_id
        );
        return Err(not_found(application_id));
    }
    serde_json::from_value::<ResumePayload>(response.results).map_err(|e| {
        warn!(
            "[PHASE: application] [STEP: resume] unreadable resume payload for '{}': {}",
            application_id, e
        );
        not_found(application_id)
    })
}

/// Fetch the master data option lists for one wizard page.
pub async fn retrieve_master_values(
    gateway: &dyn Gateway,
    page: u8,
) -> Result<Vec<MasterDataSchema>, PortalError> {
    let response = gateway
        .execute(GatewayRequest::new(
            REQUEST_RETRIEVE_MASTER_VALUES,
            json!({ "Page": page }),
        ))
        .await?;
    let response = require_success(response)?;
    let data: MasterValuesData = serde_json::from_value(response.results).map_err(|e| {
        warn!(
            "[PHASE: application] [STEP: master_values] unreadable payload for page {}: {}",
            page, e
        );
        PortalError::remote_fallback()
    })?;
    Ok(data.static_data)
}

fn not_found(application_id: &str) -> PortalError {
    PortalError::ResumeNotFound {
        application_id: application_id.to_string(),
    }
}

fn require_success(response: ExecuteResponse) -> Result<ExecuteResponse, PortalError> {
    if response.is_success {
        Ok(response)
    } else {
        Err(PortalError::remote(response.user_message()))
    }
}

/// The id may arrive in `outputParameters` or in `results`, as a string or a
/// number.
fn extract_application_id(response: &ExecuteResponse) -> Option<String> {
    if let Some(output) = response.output_parameters.as_ref() {
        if let Some(id) = id_from(output) {
            return Some(id);
        }
    }
    id_from(&response.results)
}

fn id_from(value: &Value) -> Option<String> {
    let id = value
        .get("ApplicationId")
        .or_else(|| value.get("applicationId"))?;
    match id {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::gateway::testing::StubGateway;
    use serde_json::json;

    #[tokio::test]
    async fn create_reads_id_from_output_parameters() {
        let stub = StubGateway::new();
        stub.push(
            REQUEST_CREATE_APPLICATION,
            Ok(ExecuteResponse::success_with_output(
                Value::Null,
                json!({ "ApplicationId": "APP-10" }),
            )),
        );
        let id = create_application(&stub, json!({ "FirstName": "Jane" }))
            .await
            .unwrap();
        assert_eq!(id, "APP-10");
    }

    #[tokio::test]
    async fn create_reads_numeric_id_from_results() {
        let stub = StubGateway::new();
        stub.push_success(REQUEST_CREATE_APPLICATION, json!({ "ApplicationId": 42 }));
        let id = create_application(&stub, json!({})).await.unwrap();
        assert_eq!(id, "42");
    }

    #[tokio::test]
    async fn create_without_id_is_a_remote_failure() {
        let stub = StubGateway::new();
        stub.push_success(REQUEST_CREATE_APPLICATION, json!({}));
        let result = create_application(&stub, json!({})).await;
        assert!(matches!(result, Err(PortalError::RemoteCall { .. })));
    }

    #[tokio::test]
    async fn business_failure_surfaces_the_client_message() {
        let stub = StubGateway::new();
        stub.push_failure(REQUEST_CREATE_APPLICATION, "Duplicate national id");
        let err = create_application(&stub, json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), "Duplicate national id");
    }

    #[tokio::test]
    async fn update_sends_the_record_id() {
        let stub = StubGateway::new();
        update_application_section(&stub, "APP-7", json!({ "Email": "a@b.co" }))
            .await
            .unwrap();
        let calls = stub.calls_named(REQUEST_UPDATE_APPLICATION);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].record_id.as_deref(), Some("APP-7"));
        assert_eq!(calls[0].input_parameters["Email"], "a@b.co");
    }

    #[tokio::test]
    async fn resume_maps_business_failure_to_not_found() {
        let stub = StubGateway::new();
        stub.push_failure(REQUEST_RESUME_APPLICATION, "no such application");
        let err = resume_application(&stub, "APP-404").await.unwrap_err();
        assert!(matches!(err, PortalError::ResumeNotFound { .. }));
    }

    #[tokio::test]
    async fn resume_maps_transport_failure_to_not_found() {
        let stub = StubGateway::new();
        stub.push_transport_error(REQUEST_RESUME_APPLICATION);
        let err = resume_application(&stub, "APP-404").await.unwrap_err();
        assert!(matches!(err, PortalError::ResumeNotFound { .. }));
    }

    #[tokio::test]
    async fn resume_maps_garbage_payload_to_not_found() {
        let stub = StubGateway::new();
        stub.push_success(REQUEST_RESUME_APPLICATION, json!("not an object"));
        let err = resume_application(&stub, "APP-9").await.unwrap_err();
        assert!(matches!(err, PortalError::ResumeNotFound { .. }));
    }

    #[tokio::test]
    async fn resume_parses_sections_and_step() {
        let stub = StubGateway::new();
        stub.push_success(
            REQUEST_RESUME_APPLICATION,
            json!({
                "PersonalDetails": {
                    "PersonalInformation": { "FirstName": "Jane" }
                },
                "CurrentStep": 3
            }),
        );
        let payload = resume_application(&stub, "APP-1").await.unwrap();
        assert_eq!(payload.current_step, 3);
        assert!(payload.personal_details.personal_information.is_some());
    }

    #[tokio::test]
    async fn master_values_sends_the_page_parameter() {
        let stub = StubGateway::new();
        stub.push_success(
            REQUEST_RETRIEVE_MASTER_VALUES,
            json!({
                "staticData": [
                    { "schemaName": "Gender", "options": [ { "lable": "Male", "value": "1" } ] }
                ]
            }),
        );
        let schemas = retrieve_master_values(&stub, 2).await.unwrap();
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0].schema_name, "Gender");

        let calls = stub.calls_named(REQUEST_RETRIEVE_MASTER_VALUES);
        assert_eq!(calls[0].input_parameters["Page"], 2);
    }

    #[tokio::test]
    async fn master_values_failure_is_a_remote_error() {
        let stub = StubGateway::new();
        stub.push_failure(REQUEST_RETRIEVE_MASTER_VALUES, "backend offline");
        let err = retrieve_master_values(&stub, 1).await.unwrap_err();
        assert!(matches!(err, PortalError::RemoteCall { .. }));
    }
}
