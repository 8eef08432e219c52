// Application draft store
//
// Reconciles defaults, resumed server state, and local edits into one
// draft, and projects sections into the flat wire shape the
// gateway expects. Sections are overwritten in full on submit; server-assigned
// identity fields survive the overwrite.

use chrono::NaiveDate;
use serde_json::Value;
use uuid::Uuid;

use crate::documents::UploadedFile;
use crate::models::requests::{
    ContactInformationWire, DocumentsWire, LanguageWire, PersonalInformationWire,
    QualificationWire, QualificationsWire, WorkExperienceSectionWire, WorkExperienceWire,
};
use crate::models::responses::ResumeSections;
use crate::utils::validation::{format_wire_date, parse_wire_date};

/// Names of the draft sections, in wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionId {
    PersonalInformation,
    ContactInformation,
    Qualifications,
    WorkExperience,
    Documents,
}

impl SectionId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PersonalInformation => "personalInformation",
            Self::ContactInformation => "contactInformation",
            Self::Qualifications => "qualifications",
            Self::WorkExperience => "workExperience",
            Self::Documents => "documents",
        }
    }
}

// =========================
// Sections
// =========================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonalInformation {
    /// Server-assigned identity; survives section overwrite.
    pub record_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub marital_status: Option<String>,
    pub national_id: String,
    pub nationality: Option<String>,
    pub languages: Vec<LanguageEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageEntry {
    /// Client-side id for list editing; stripped before projection.
    pub entry_id: Uuid,
    pub language: String,
    pub proficiency: Option<String>,
}

impl LanguageEntry {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            language: language.into(),
            proficiency: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactInformation {
    /// Server-assigned identity; survives section overwrite.
    pub record_id: Option<String>,
    pub email: String,
    pub mobile_number: String,
    pub alternate_number: Option<String>,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub province: Option<String>,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualificationEntry {
    /// Client-side id for list editing; stripped before projection.
    pub entry_id: Uuid,
    pub institution: String,
    pub qualification_type: Option<String>,
    pub field_of_study: Option<String>,
    pub year_completed: Option<i32>,
}

impl QualificationEntry {
    pub fn new(institution: impl Into<String>) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            institution: institution.into(),
            qualification_type: None,
            field_of_study: None,
            year_completed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkExperienceEntry {
    /// Client-side id for list editing; stripped before projection.
    pub entry_id: Uuid,
    pub employer: String,
    pub job_title: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
    pub duties: Option<String>,
}

impl WorkExperienceEntry {
    pub fn new(employer: impl Into<String>, job_title: impl Into<String>) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            employer: employer.into(),
            job_title: job_title.into(),
            start_date: None,
            end_date: None,
            is_current: false,
            duties: None,
        }
    }
}

/// The in-progress application. Unvisited sections hold the canonical
/// defaults produced by `Default`; there is exactly one source of default
/// values per section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApplicationDraft {
    pub personal_information: PersonalInformation,
    pub contact_information: ContactInformation,
    pub qualifications: Vec<QualificationEntry>,
    pub work_experience: Vec<WorkExperienceEntry>,
    pub documents: Vec<UploadedFile>,
}

/// Intent dispatched by a step component. One variant per section keeps the
/// accepted fields to a fixed allowlist; unknown fields cannot ride along.
#[derive(Debug, Clone)]
pub enum SectionPatch {
    PersonalInformation(PersonalInformation),
    ContactInformation(ContactInformation),
    Qualifications(Vec<QualificationEntry>),
    WorkExperience(Vec<WorkExperienceEntry>),
    Documents(Vec<UploadedFile>),
}

impl SectionPatch {
    pub fn section_id(&self) -> SectionId {
        match self {
            Self::PersonalInformation(_) => SectionId::PersonalInformation,
            Self::ContactInformation(_) => SectionId::ContactInformation,
            Self::Qualifications(_) => SectionId::Qualifications,
            Self::WorkExperience(_) => SectionId::WorkExperience,
            Self::Documents(_) => SectionId::Documents,
        }
    }
}

impl ApplicationDraft {
    /// Overwrite the patched section in full. Server-assigned identity fields
    /// survive when the patch does not carry them.
    pub fn apply_patch(&mut self, patch: SectionPatch) {
        match patch {
            SectionPatch::PersonalInformation(mut section) => {
                if section.record_id.is_none() {
                    section.record_id = self.personal_information.record_id.take();
                }
                self.personal_information = section;
            }
            SectionPatch::ContactInformation(mut section) => {
                if section.record_id.is_none() {
                    section.record_id = self.contact_information.record_id.take();
                }
                self.contact_information = section;
            }
            SectionPatch::Qualifications(entries) => self.qualifications = entries,
            SectionPatch::WorkExperience(entries) => self.work_experience = entries,
            SectionPatch::Documents(files) => self.documents = files,
        }
    }

    /// Overwrite only the sections present in a server response. Array-typed
    /// sections are replaced wholesale; matching server rows against client
    /// temporary ids is deliberately avoided.
    pub fn merge_server_response(&mut self, sections: ResumeSections) {
        if let Some(wire) = sections.personal_information {
            self.personal_information = PersonalInformation::from(wire);
        }
        if let Some(wire) = sections.contact_information {
            self.contact_information = ContactInformation::from(wire);
        }
        if let Some(entries) = sections.qualifications {
            self.qualifications = entries.into_iter().map(QualificationEntry::from).collect();
        }
        if let Some(entries) = sections.work_experience {
            self.work_experience = entries
                .into_iter()
                .map(WorkExperienceEntry::from)
                .collect();
        }
        if let Some(documents) = sections.documents {
            self.documents = documents.into_iter().map(UploadedFile::from_payload).collect();
        }
    }

    /// Project one section into the flat wire object sent as `inputParamters`.
    /// Total: every known field has an explicit mapping, client-only fields
    /// are stripped, and absent optionals are omitted rather than defaulted.
    pub fn project_section(&self, section: SectionId) -> Value {
        let projected = match section {
            SectionId::PersonalInformation => {
                serde_json::to_value(PersonalInformationWire::from(&self.personal_information))
            }
            SectionId::ContactInformation => {
                serde_json::to_value(ContactInformationWire::from(&self.contact_information))
            }
            SectionId::Qualifications => serde_json::to_value(QualificationsWire {
                qualifications: self.qualifications.iter().map(QualificationWire::from).collect(),
            }),
            SectionId::WorkExperience => serde_json::to_value(WorkExperienceSectionWire {
                work_experience: self
                    .work_experience
                    .iter()
                    .map(WorkExperienceWire::from)
                    .collect(),
            }),
            SectionId::Documents => serde_json::to_value(DocumentsWire {
                documents: self.documents.iter().map(UploadedFile::to_payload).collect(),
            }),
        };
        projected.unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
    }
}

/// Optional text normalization: blank strings are treated as absent so they
/// are omitted from payloads instead of sent empty.
fn none_if_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// =========================
// Projection (draft -> wire)
// =========================

impl From<&PersonalInformation> for PersonalInformationWire {
    fn from(section: &PersonalInformation) -> Self {
        Self {
            record_id: none_if_blank(&section.record_id),
            first_name: section.first_name.clone(),
            last_name: section.last_name.clone(),
            date_of_birth: section.date_of_birth.map(format_wire_date),
            gender: none_if_blank(&section.gender),
            marital_status: none_if_blank(&section.marital_status),
            national_id: section.national_id.clone(),
            nationality: none_if_blank(&section.nationality),
            languages: section.languages.iter().map(LanguageWire::from).collect(),
        }
    }
}

impl From<&LanguageEntry> for LanguageWire {
    fn from(entry: &LanguageEntry) -> Self {
        Self {
            language: entry.language.clone(),
            proficiency: none_if_blank(&entry.proficiency),
        }
    }
}

impl From<&ContactInformation> for ContactInformationWire {
    fn from(section: &ContactInformation) -> Self {
        Self {
            record_id: none_if_blank(&section.record_id),
            email: section.email.clone(),
            mobile_number: section.mobile_number.clone(),
            alternate_number: none_if_blank(&section.alternate_number),
            address_line1: section.address_line1.clone(),
            address_line2: none_if_blank(&section.address_line2),
            city: section.city.clone(),
            province: none_if_blank(&section.province),
            postal_code: section.postal_code.clone(),
        }
    }
}

impl From<&QualificationEntry> for QualificationWire {
    fn from(entry: &QualificationEntry) -> Self {
        Self {
            institution: entry.institution.clone(),
            qualification_type: none_if_blank(&entry.qualification_type),
            field_of_study: none_if_blank(&entry.field_of_study),
            year_completed: entry.year_completed,
        }
    }
}

impl From<&WorkExperienceEntry> for WorkExperienceWire {
    fn from(entry: &WorkExperienceEntry) -> Self {
        Self {
            employer: entry.employer.clone(),
            job_title: entry.job_title.clone(),
            start_date: entry.start_date.map(format_wire_date),
            end_date: entry.end_date.map(format_wire_date),
            is_current: entry.is_current,
            duties: none_if_blank(&entry.duties),
        }
    }
}

// =========================
// Interpretation (wire -> draft)
// =========================

impl From<PersonalInformationWire> for PersonalInformation {
    fn from(wire: PersonalInformationWire) -> Self {
        Self {
            record_id: none_if_blank(&wire.record_id),
            first_name: wire.first_name,
            last_name: wire.last_name,
            date_of_birth: wire
                .date_of_birth
                .as_deref()
                .and_then(|d| parse_wire_date(d).ok()),
            gender: none_if_blank(&wire.gender),
            marital_status: none_if_blank(&wire.marital_status),
            national_id: wire.national_id,
            nationality: none_if_blank(&wire.nationality),
            languages: wire.languages.into_iter().map(LanguageEntry::from).collect(),
        }
    }
}

impl From<LanguageWire> for LanguageEntry {
    fn from(wire: LanguageWire) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            language: wire.language,
            proficiency: none_if_blank(&wire.proficiency),
        }
    }
}

impl From<ContactInformationWire> for ContactInformation {
    fn from(wire: ContactInformationWire) -> Self {
        Self {
            record_id: none_if_blank(&wire.record_id),
            email: wire.email,
            mobile_number: wire.mobile_number,
            alternate_number: none_if_blank(&wire.alternate_number),
            address_line1: wire.address_line1,
            address_line2: none_if_blank(&wire.address_line2),
            city: wire.city,
            province: none_if_blank(&wire.province),
            postal_code: wire.postal_code,
        }
    }
}

impl From<QualificationWire> for QualificationEntry {
    fn from(wire: QualificationWire) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            institution: wire.institution,
            qualification_type: none_if_blank(&wire.qualification_type),
            field_of_study: none_if_blank(&wire.field_of_study),
            year_completed: wire.year_completed,
        }
    }
}

impl From<WorkExperienceWire> for WorkExperienceEntry {
    fn from(wire: WorkExperienceWire) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            employer: wire.employer,
            job_title: wire.job_title,
            start_date: wire.start_date.as_deref().and_then(|d| parse_wire_date(d).ok()),
            end_date: wire.end_date.as_deref().and_then(|d| parse_wire_date(d).ok()),
            is_current: wire.is_current,
            duties: none_if_blank(&wire.duties),
        }
    }
}
