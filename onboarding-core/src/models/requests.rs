// Wire-shaped request models for the remote data gateway
//
// The flat PascalCase field naming and the misspelled `inputParamters` key
// are the backend's fixed wire contract. Preserve them exactly; do not "fix"
// the spelling.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version string stamped on every document transfer payload.
pub const DOCUMENT_VERSION: &str = "1.0.0";

// =========================
// ExecuteRequest envelope
// =========================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequestBody {
    pub entity_name: String,
    pub request_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    /// Misspelling is part of the wire contract.
    #[serde(rename = "inputParamters")]
    pub input_parameters: Value,
}

// =========================
// Section payloads
// =========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonalInformationWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// `YYYY-MM-DD`, omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(default)]
    pub national_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<LanguageWire>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LanguageWire {
    #[serde(default)]
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proficiency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactInformationWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_number: Option<String>,
    #[serde(default)]
    pub address_line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default)]
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QualificationWire {
    #[serde(default)]
    pub institution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    /// Omitted when unset; the backend applies its own defaulting. Never
    /// sent as `0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_completed: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkExperienceWire {
    #[serde(default)]
    pub employer: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duties: Option<String>,
}

/// Upload payload for one document. `FileContent` is base64 with no data-URL
/// prefix; `DocLibId` is serialized even when null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentPayload {
    pub doc_lib_id: Option<String>,
    pub document_type: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub file_extension: String,
    #[serde(default = "default_version_number")]
    pub version_number: String,
    #[serde(default)]
    pub file_content: String,
}

fn default_version_number() -> String {
    DOCUMENT_VERSION.to_string()
}

// =========================
// Array-section wrappers
// =========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QualificationsWire {
    #[serde(default)]
    pub qualifications: Vec<QualificationWire>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkExperienceSectionWire {
    #[serde(default)]
    pub work_experience: Vec<WorkExperienceWire>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentsWire {
    #[serde(default)]
    pub documents: Vec<DocumentPayload>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_preserves_the_misspelled_key() {
        let body = ExecuteRequestBody {
            entity_name: "ApplicantPortal".to_string(),
            request_name: "CreateApplication".to_string(),
            record_id: None,
            input_parameters: json!({ "FirstName": "Jane" }),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("inputParamters").is_some());
        assert!(value.get("inputParameters").is_none());
        assert!(value.get("recordId").is_none());
        assert_eq!(value["entityName"], "ApplicantPortal");
    }

    #[test]
    fn envelope_includes_record_id_when_present() {
        let body = ExecuteRequestBody {
            entity_name: "ApplicantPortal".to_string(),
            request_name: "UpdateApplication".to_string(),
            record_id: Some("APP-7".to_string()),
            input_parameters: json!({}),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["recordId"], "APP-7");
    }

    #[test]
    fn personal_wire_omits_absent_optionals() {
        let wire = PersonalInformationWire {
            record_id: None,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            date_of_birth: None,
            gender: None,
            marital_status: None,
            national_id: "9007145800089".to_string(),
            nationality: None,
            languages: Vec::new(),
        };
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(value["FirstName"], "Jane");
        assert!(value.get("DateOfBirth").is_none());
        assert!(value.get("Gender").is_none());
        assert!(value.get("Languages").is_none());
        assert!(value.get("RecordId").is_none());
    }

    #[test]
    fn document_payload_serializes_null_doc_lib_id() {
        let payload = DocumentPayload {
            doc_lib_id: None,
            document_type: 3,
            name: "payslip.pdf".to_string(),
            file_extension: "pdf".to_string(),
            version_number: DOCUMENT_VERSION.to_string(),
            file_content: "JVBERi0=".to_string(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        // DocLibId must be present and null, not omitted.
        assert!(value.get("DocLibId").is_some());
        assert!(value["DocLibId"].is_null());
        assert_eq!(value["VersionNumber"], "1.0.0");
        assert_eq!(value["DocumentType"], 3);
    }

    #[test]
    fn document_payload_deserializes_without_content() {
        let payload: DocumentPayload = serde_json::from_value(json!({
            "DocLibId": "LIB-1",
            "DocumentType": 2,
            "Name": "id-card.png"
        }))
        .unwrap();
        assert_eq!(payload.doc_lib_id.as_deref(), Some("LIB-1"));
        assert_eq!(payload.version_number, "1.0.0");
        assert!(payload.file_content.is_empty());
    }

    #[test]
    fn year_completed_is_omitted_not_zeroed() {
        let wire = QualificationWire {
            institution: "UCT".to_string(),
            qualification_type: None,
            field_of_study: None,
            year_completed: None,
        };
        let value = serde_json::to_value(&wire).unwrap();
        assert!(value.get("YearCompleted").is_none());
    }
}
