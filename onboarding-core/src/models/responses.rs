// Response models for the remote data gateway

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GENERIC_REMOTE_FAILURE;
use crate::models::requests::{
    ContactInformationWire, DocumentPayload, PersonalInformationWire, QualificationWire,
    WorkExperienceWire,
};

// =========================
// Generic envelope
// =========================

/// Envelope returned by every ExecuteRequest call. `isSuccess=false` is a
/// recoverable business failure regardless of HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    #[serde(default)]
    pub is_success: bool,
    #[serde(default)]
    pub results: Value,
    #[serde(default)]
    pub client_message: Option<String>,
    #[serde(default)]
    pub output_parameters: Option<Value>,
}

impl ExecuteResponse {
    pub fn success(results: Value) -> Self {
        Self {
            is_success: true,
            results,
            client_message: None,
            output_parameters: None,
        }
    }

    pub fn success_with_output(results: Value, output_parameters: Value) -> Self {
        Self {
            is_success: true,
            results,
            client_message: None,
            output_parameters: Some(output_parameters),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            results: Value::Null,
            client_message: Some(message.into()),
            output_parameters: None,
        }
    }

    /// User-facing message for a failed call. Falls back to the generic text
    /// when the backend sent nothing usable.
    pub fn user_message(&self) -> String {
        self.client_message
            .as_ref()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| GENERIC_REMOTE_FAILURE.to_string())
    }
}

// =========================
// Master data
// =========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterValuesData {
    #[serde(default)]
    pub static_data: Vec<MasterDataSchema>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterDataSchema {
    #[serde(default)]
    pub schema_name: String,
    #[serde(default)]
    pub options: Vec<MasterDataOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterDataOption {
    /// `lable` (sic) is the wire contract, preserved exactly.
    #[serde(rename = "lable")]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

// =========================
// Resume
// =========================

/// Payload returned by `RequestName=ResumeApplication`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumePayload {
    #[serde(rename = "PersonalDetails", default)]
    pub personal_details: ResumeSections,
    #[serde(rename = "CurrentStep", default)]
    pub current_step: i64,
}

/// Sections present in a resume response. Absent sections leave the local
/// draft untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResumeSections {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_information: Option<PersonalInformationWire>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_information: Option<ContactInformationWire>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<Vec<QualificationWire>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_experience: Option<Vec<WorkExperienceWire>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<DocumentPayload>>,
}
