// Step registry
//
// The ordered list of wizard steps is fixed at configuration time; the
// sequence is the only legal forward/backward transition path.

use crate::error::PortalError;
use crate::models::draft::{ApplicationDraft, SectionId};
use crate::wizard::validation::{self, ValidationResult};

/// Validator signature: inspect the draft, report per-field errors.
pub type StepValidator = fn(&ApplicationDraft) -> ValidationResult;

#[derive(Debug, Clone, Copy)]
pub struct StepDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    /// Draft section this step edits and submits.
    pub section: SectionId,
    /// `Page` parameter sent on the master data fetch for this step.
    pub master_data_page: u8,
    pub validate: StepValidator,
}

#[derive(Debug, Clone)]
pub struct StepRegistry {
    steps: Vec<StepDescriptor>,
}

impl StepRegistry {
    /// Build a registry. Step ids must be unique; the order given here is
    /// the wizard's only transition path.
    pub fn new(steps: Vec<StepDescriptor>) -> Result<Self, PortalError> {
        if steps.is_empty() {
            return Err(PortalError::Config(
                "step registry must not be empty".to_string(),
            ));
        }
        for (index, step) in steps.iter().enumerate() {
            if steps[..index].iter().any(|earlier| earlier.id == step.id) {
                return Err(PortalError::Config(format!(
                    "duplicate step id '{}'",
                    step.id
                )));
            }
        }
        Ok(Self { steps })
    }

    /// The five-step applicant onboarding flow.
    pub fn onboarding() -> Self {
        // Fixed list with distinct ids; the uniqueness check cannot fail.
        Self {
            steps: vec![
                StepDescriptor {
                    id: "personal-information",
                    label: "Personal Information",
                    section: SectionId::PersonalInformation,
                    master_data_page: 1,
                    validate: validation::validate_personal_information,
                },
                StepDescriptor {
                    id: "contact-information",
                    label: "Contact Information",
                    section: SectionId::ContactInformation,
                    master_data_page: 2,
                    validate: validation::validate_contact_information,
                },
                StepDescriptor {
                    id: "qualifications",
                    label: "Qualifications",
                    section: SectionId::Qualifications,
                    master_data_page: 3,
                    validate: validation::validate_qualifications,
                },
                StepDescriptor {
                    id: "work-experience",
                    label: "Work Experience",
                    section: SectionId::WorkExperience,
                    master_data_page: 4,
                    validate: validation::validate_work_experience,
                },
                StepDescriptor {
                    id: "documents",
                    label: "Documents",
                    section: SectionId::Documents,
                    master_data_page: 5,
                    validate: validation::validate_documents,
                },
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StepDescriptor> {
        self.steps.get(index)
    }

    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Clamp a backend-supplied step index into the rendered range. An
    /// out-of-range value falls back to step 0, since a bad resume point must not
    /// strand the user off the wizard.
    pub fn clamp_index(&self, raw: i64) -> usize {
        if raw >= 0 && (raw as usize) < self.steps.len() {
            raw as usize
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn onboarding_registry_has_five_ordered_steps() {
        let registry = StepRegistry::onboarding();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get(0).map(|s| s.id), Some("personal-information"));
        assert_eq!(registry.get(4).map(|s| s.id), Some("documents"));
        assert_eq!(registry.last_index(), 4);
    }

    #[test]
    fn each_step_maps_to_a_distinct_master_data_page() {
        let registry = StepRegistry::onboarding();
        let mut pages: Vec<u8> = (0..registry.len())
            .filter_map(|i| registry.get(i).map(|s| s.master_data_page))
            .collect();
        pages.sort_unstable();
        pages.dedup();
        assert_eq!(pages.len(), registry.len());
    }

    #[test]
    fn duplicate_step_ids_are_rejected() {
        let step = StepDescriptor {
            id: "dup",
            label: "Dup",
            section: crate::models::draft::SectionId::PersonalInformation,
            master_data_page: 1,
            validate: validation::validate_personal_information,
        };
        let result = StepRegistry::new(vec![step, step]);
        assert!(matches!(result, Err(PortalError::Config(_))));
    }

    #[test]
    fn empty_registry_is_rejected() {
        assert!(StepRegistry::new(Vec::new()).is_err());
    }

    #[test]
    fn clamp_passes_valid_indexes_through() {
        let registry = StepRegistry::onboarding();
        assert_eq!(registry.clamp_index(0), 0);
        assert_eq!(registry.clamp_index(4), 4);
    }

    #[test]
    fn clamp_floors_out_of_range_indexes_to_zero() {
        let registry = StepRegistry::onboarding();
        assert_eq!(registry.clamp_index(99), 0);
        assert_eq!(registry.clamp_index(5), 0);
        assert_eq!(registry.clamp_index(-1), 0);
    }
}
