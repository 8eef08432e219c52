// Wizard session state (in-memory)
//
// Owned exclusively by the WizardController for the lifetime of one session
// (start to terminal navigation). Step components signal intent through the
// controller; nothing else mutates this.

use crate::models::draft::ApplicationDraft;

/// Exactly one mode is active per session. `application_id` is `None` iff
/// the mode is `NewApplication` and no create call has succeeded yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardMode {
    NewApplication,
    ExistingApplication,
    ResumeApplication,
}

/// Submit lifecycle layered on top of the step index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
    Error,
}

#[derive(Debug, Clone)]
pub struct WizardState {
    pub current_step_index: usize,
    pub application_id: Option<String>,
    pub mode: WizardMode,
    pub phase: SubmitPhase,
    pub draft: ApplicationDraft,
}

impl WizardState {
    pub fn new_application() -> Self {
        Self {
            current_step_index: 0,
            application_id: None,
            mode: WizardMode::NewApplication,
            phase: SubmitPhase::Idle,
            draft: ApplicationDraft::default(),
        }
    }

    pub fn existing_application(application_id: String) -> Self {
        Self {
            current_step_index: 0,
            application_id: Some(application_id),
            mode: WizardMode::ExistingApplication,
            phase: SubmitPhase::Idle,
            draft: ApplicationDraft::default(),
        }
    }

    pub fn resumed(application_id: String, draft: ApplicationDraft, step_index: usize) -> Self {
        Self {
            current_step_index: step_index,
            application_id: Some(application_id),
            mode: WizardMode::ResumeApplication,
            phase: SubmitPhase::Idle,
            draft,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_application_starts_unpersisted_at_step_zero() {
        let state = WizardState::new_application();
        assert_eq!(state.current_step_index, 0);
        assert!(state.application_id.is_none());
        assert_eq!(state.mode, WizardMode::NewApplication);
        assert_eq!(state.phase, SubmitPhase::Idle);
    }

    #[test]
    fn non_new_modes_always_carry_an_id() {
        let existing = WizardState::existing_application("APP-1".to_string());
        assert!(existing.application_id.is_some());

        let resumed = WizardState::resumed("APP-2".to_string(), ApplicationDraft::default(), 3);
        assert!(resumed.application_id.is_some());
        assert_eq!(resumed.current_step_index, 3);
        assert_eq!(resumed.mode, WizardMode::ResumeApplication);
    }
}
