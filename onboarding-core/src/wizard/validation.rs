// Per-step validation
//
// Results are produced fresh per call and never persisted. Error keys use the
// field names the form surfaces ("firstName"), which is what step components
// bind their error banners to.

use std::collections::BTreeMap;

use crate::models::draft::ApplicationDraft;
use crate::utils::validation::{is_plausible_year, is_valid_email, is_valid_phone};

/// Outcome of validating one step against the draft.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    errors: BTreeMap<String, String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.add_error(field, message);
        result
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field.to_string(), message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

pub fn validate_personal_information(draft: &ApplicationDraft) -> ValidationResult {
    let section = &draft.personal_information;
    let mut result = ValidationResult::ok();
    if section.first_name.trim().is_empty() {
        result.add_error("firstName", "First name is required");
    }
    if section.last_name.trim().is_empty() {
        result.add_error("lastName", "Last name is required");
    }
    if section.national_id.trim().is_empty() {
        result.add_error("nationalId", "Identity number is required");
    }
    if section.date_of_birth.is_none() {
        result.add_error("dateOfBirth", "Date of birth is required");
    }
    for (index, entry) in section.languages.iter().enumerate() {
        if entry.language.trim().is_empty() {
            result.add_error(
                &format!("languages[{}].language", index),
                "Language is required",
            );
        }
    }
    result
}

pub fn validate_contact_information(draft: &ApplicationDraft) -> ValidationResult {
    let section = &draft.contact_information;
    let mut result = ValidationResult::ok();
    if section.email.trim().is_empty() {
        result.add_error("email", "Email address is required");
    } else if !is_valid_email(&section.email) {
        result.add_error("email", "Enter a valid email address");
    }
    if section.mobile_number.trim().is_empty() {
        result.add_error("mobileNumber", "Mobile number is required");
    } else if !is_valid_phone(&section.mobile_number) {
        result.add_error("mobileNumber", "Enter a valid mobile number");
    }
    if let Some(alternate) = section.alternate_number.as_deref() {
        if !alternate.trim().is_empty() && !is_valid_phone(alternate) {
            result.add_error("alternateNumber", "Enter a valid phone number");
        }
    }
    if section.address_line1.trim().is_empty() {
        result.add_error("addressLine1", "Street address is required");
    }
    if section.city.trim().is_empty() {
        result.add_error("city", "City is required");
    }
    if section.postal_code.trim().is_empty() {
        result.add_error("postalCode", "Postal code is required");
    }
    result
}

pub fn validate_qualifications(draft: &ApplicationDraft) -> ValidationResult {
    let mut result = ValidationResult::ok();
    if draft.qualifications.is_empty() {
        result.add_error("qualifications", "Add at least one qualification");
        return result;
    }
    for (index, entry) in draft.qualifications.iter().enumerate() {
        if entry.institution.trim().is_empty() {
            result.add_error(
                &format!("qualifications[{}].institution", index),
                "Institution is required",
            );
        }
        if let Some(year) = entry.year_completed {
            if !is_plausible_year(year) {
                result.add_error(
                    &format!("qualifications[{}].yearCompleted", index),
                    "Enter a valid completion year",
                );
            }
        }
    }
    result
}

// Work history may legitimately be empty (first-time applicants); entries
// that are present must be complete.
pub fn validate_work_experience(draft: &ApplicationDraft) -> ValidationResult {
    let mut result = ValidationResult::ok();
    for (index, entry) in draft.work_experience.iter().enumerate() {
        if entry.employer.trim().is_empty() {
            result.add_error(
                &format!("workExperience[{}].employer", index),
                "Employer is required",
            );
        }
        if entry.job_title.trim().is_empty() {
            result.add_error(
                &format!("workExperience[{}].jobTitle", index),
                "Job title is required",
            );
        }
        if entry.start_date.is_none() {
            result.add_error(
                &format!("workExperience[{}].startDate", index),
                "Start date is required",
            );
        }
        if !entry.is_current && entry.end_date.is_none() {
            result.add_error(
                &format!("workExperience[{}].endDate", index),
                "End date is required unless this is your current position",
            );
        }
        if let (Some(start), Some(end)) = (entry.start_date, entry.end_date) {
            if end < start {
                result.add_error(
                    &format!("workExperience[{}].endDate", index),
                    "End date cannot be before the start date",
                );
            }
        }
    }
    result
}

pub fn validate_documents(draft: &ApplicationDraft) -> ValidationResult {
    let mut result = ValidationResult::ok();
    if draft.documents.is_empty() {
        result.add_error("documents", "Upload at least one supporting document");
        return result;
    }
    for (index, file) in draft.documents.iter().enumerate() {
        if file.document_type <= 0 {
            result.add_error(
                &format!("documents[{}].documentType", index),
                "Select a document type",
            );
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UploadConfig;
    use crate::documents::UploadedFile;
    use crate::models::draft::{
        ContactInformation, LanguageEntry, PersonalInformation, QualificationEntry,
        WorkExperienceEntry,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_personal() -> PersonalInformation {
        PersonalInformation {
            record_id: None,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            date_of_birth: Some(date(1990, 7, 14)),
            gender: None,
            marital_status: None,
            national_id: "9007145800089".to_string(),
            nationality: None,
            languages: vec![LanguageEntry::new("English")],
        }
    }

    fn valid_contact() -> ContactInformation {
        ContactInformation {
            record_id: None,
            email: "jane@example.com".to_string(),
            mobile_number: "+27825551234".to_string(),
            alternate_number: None,
            address_line1: "1 Long Street".to_string(),
            address_line2: None,
            city: "Cape Town".to_string(),
            province: None,
            postal_code: "8001".to_string(),
        }
    }

    #[test]
    fn complete_personal_section_passes() {
        let mut draft = ApplicationDraft::default();
        draft.personal_information = valid_personal();
        assert!(validate_personal_information(&draft).is_valid());
    }

    #[test]
    fn missing_first_name_is_reported_under_its_field_key() {
        let mut draft = ApplicationDraft::default();
        let mut section = valid_personal();
        section.first_name = "  ".to_string();
        draft.personal_information = section;

        let result = validate_personal_information(&draft);
        assert!(!result.is_valid());
        assert!(result.error_for("firstName").is_some());
        assert!(result.error_for("lastName").is_none());
    }

    #[test]
    fn blank_language_entry_is_flagged_by_index() {
        let mut draft = ApplicationDraft::default();
        let mut section = valid_personal();
        section.languages = vec![LanguageEntry::new("English"), LanguageEntry::new("  ")];
        draft.personal_information = section;

        let result = validate_personal_information(&draft);
        assert!(result.error_for("languages[1].language").is_some());
    }

    #[test]
    fn contact_rejects_malformed_email_and_phone() {
        let mut draft = ApplicationDraft::default();
        let mut section = valid_contact();
        section.email = "not-an-email".to_string();
        section.mobile_number = "123".to_string();
        draft.contact_information = section;

        let result = validate_contact_information(&draft);
        assert_eq!(result.error_for("email"), Some("Enter a valid email address"));
        assert!(result.error_for("mobileNumber").is_some());
    }

    #[test]
    fn contact_allows_blank_alternate_number() {
        let mut draft = ApplicationDraft::default();
        let mut section = valid_contact();
        section.alternate_number = Some(String::new());
        draft.contact_information = section;
        assert!(validate_contact_information(&draft).is_valid());
    }

    #[test]
    fn qualifications_require_at_least_one_entry() {
        let draft = ApplicationDraft::default();
        let result = validate_qualifications(&draft);
        assert!(result.error_for("qualifications").is_some());
    }

    #[test]
    fn qualification_year_must_be_plausible() {
        let mut draft = ApplicationDraft::default();
        let mut entry = QualificationEntry::new("UCT");
        entry.year_completed = Some(1492);
        draft.qualifications = vec![entry];

        let result = validate_qualifications(&draft);
        assert!(result.error_for("qualifications[0].yearCompleted").is_some());
    }

    #[test]
    fn empty_work_history_is_allowed() {
        let draft = ApplicationDraft::default();
        assert!(validate_work_experience(&draft).is_valid());
    }

    #[test]
    fn current_position_does_not_need_an_end_date() {
        let mut draft = ApplicationDraft::default();
        let mut entry = WorkExperienceEntry::new("Acme", "Clerk");
        entry.start_date = Some(date(2020, 1, 1));
        entry.is_current = true;
        draft.work_experience = vec![entry];
        assert!(validate_work_experience(&draft).is_valid());
    }

    #[test]
    fn end_date_before_start_date_is_rejected() {
        let mut draft = ApplicationDraft::default();
        let mut entry = WorkExperienceEntry::new("Acme", "Clerk");
        entry.start_date = Some(date(2021, 6, 1));
        entry.end_date = Some(date(2020, 1, 1));
        draft.work_experience = vec![entry];

        let result = validate_work_experience(&draft);
        assert!(result.error_for("workExperience[0].endDate").is_some());
    }

    #[test]
    fn documents_step_requires_an_upload_with_a_type() {
        let mut draft = ApplicationDraft::default();
        assert!(validate_documents(&draft).error_for("documents").is_some());

        let file = UploadedFile::from_bytes(
            "payslip.pdf",
            0,
            b"%PDF".to_vec(),
            &UploadConfig::default(),
        )
        .unwrap();
        draft.documents = vec![file];
        let result = validate_documents(&draft);
        assert!(result.error_for("documents[0].documentType").is_some());
    }
}
