//! Wizard controller.
//!
//! Drives linear progression through the step registry: gates each advance on
//! validation, persists the step remotely before moving, and recovers an
//! in-progress application on resume. The controller owns the session state
//! exclusively; step components signal intent through `submit_current_step`
//! and the navigation methods, and never mutate the draft directly.

pub mod registry;
pub mod validation;

use std::sync::Arc;

use log::{info, warn};

use crate::api::applications::{
    create_application, resume_application, update_application_section,
};
use crate::api::gateway::Gateway;
use crate::error::PortalError;
use crate::master_data::MasterDataCache;
use crate::models::draft::{ApplicationDraft, SectionId, SectionPatch};
use crate::models::state::{SubmitPhase, WizardMode, WizardState};
use crate::utils::logging::{mask_email, mask_national_id};
use registry::{StepDescriptor, StepRegistry};
use validation::ValidationResult;

/// How a wizard session begins.
#[derive(Debug, Clone)]
pub enum StartMode {
    NewApplication,
    ExistingApplication { application_id: String },
    ResumeApplication { application_id: String },
}

/// Outcome of one submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; no remote call was made. The attempted patch stays
    /// visible in the draft for correction.
    Rejected(ValidationResult),
    /// The step was persisted and the wizard advanced by one.
    Advanced { application_id: String },
    /// The last step was persisted. The session is finished; the caller owns
    /// the terminal redirect.
    Completed { application_id: String },
    /// A submission was already in flight, or the session has finished; the
    /// call was dropped.
    Ignored,
}

pub struct WizardController {
    gateway: Arc<dyn Gateway>,
    registry: StepRegistry,
    master_data: MasterDataCache,
    state: WizardState,
    finished: bool,
}

impl WizardController {
    /// Initialize a session. Resume mode fetches the saved draft before the
    /// first render; a backend that cannot resolve the application id fails
    /// the whole start with `ResumeNotFound` and the caller redirects to the
    /// application list.
    pub async fn start(
        gateway: Arc<dyn Gateway>,
        registry: StepRegistry,
        mode: StartMode,
    ) -> Result<Self, PortalError> {
        let state = match mode {
            StartMode::NewApplication => WizardState::new_application(),
            StartMode::ExistingApplication { application_id } => {
                WizardState::existing_application(application_id)
            }
            StartMode::ResumeApplication { application_id } => {
                let payload = resume_application(gateway.as_ref(), &application_id).await?;
                let mut draft = ApplicationDraft::default();
                draft.merge_server_response(payload.personal_details);
                let step_index = registry.clamp_index(payload.current_step);
                info!(
                    "[PHASE: wizard] [STEP: start] resuming '{}' at step {} (applicant {})",
                    application_id,
                    step_index,
                    mask_national_id(&draft.personal_information.national_id)
                );
                WizardState::resumed(application_id, draft, step_index)
            }
        };
        let mut controller = Self {
            master_data: MasterDataCache::new(Arc::clone(&gateway)),
            gateway,
            registry,
            state,
            finished: false,
        };
        controller.reload_master_data().await;
        Ok(controller)
    }

    /// Apply the patch, validate, persist, then advance. Advancement is
    /// atomic with respect to the remote call: a failed call leaves the step
    /// index and saved state exactly as they were. At most one remote submission is in
    /// flight per wizard instance; a duplicate submit is dropped.
    pub async fn submit_current_step(
        &mut self,
        patch: SectionPatch,
    ) -> Result<SubmitOutcome, PortalError> {
        if self.state.phase == SubmitPhase::Submitting {
            warn!(
                "[PHASE: wizard] [STEP: submit] duplicate submit ignored (step {})",
                self.state.current_step_index
            );
            return Ok(SubmitOutcome::Ignored);
        }
        if self.finished {
            warn!("[PHASE: wizard] [STEP: submit] session already finished; submit ignored");
            return Ok(SubmitOutcome::Ignored);
        }
        // A retry after a failed attempt starts from a clean phase.
        self.state.phase = SubmitPhase::Idle;

        let Some(step) = self.registry.get(self.state.current_step_index).copied() else {
            return Err(PortalError::Config(
                "current step index is outside the registry".to_string(),
            ));
        };
        if patch.section_id() != step.section {
            warn!(
                "[PHASE: wizard] [STEP: submit] patch for '{}' dispatched while on step '{}'",
                patch.section_id().as_str(),
                step.id
            );
            return Ok(SubmitOutcome::Rejected(ValidationResult::single(
                "section",
                "Submitted data does not belong to the current step",
            )));
        }

        // The patch stays visible in the draft even when validation or the
        // remote call fails; it is just not considered saved.
        self.state.draft.apply_patch(patch);

        let result = (step.validate)(&self.state.draft);
        if !result.is_valid() {
            info!(
                "[PHASE: wizard] [STEP: submit] {} field error(s) on step '{}'",
                result.errors().len(),
                step.id
            );
            return Ok(SubmitOutcome::Rejected(result));
        }

        let payload = self.state.draft.project_section(step.section);
        self.state.phase = SubmitPhase::Submitting;

        let call_result = match (self.state.mode, self.state.application_id.clone()) {
            (WizardMode::NewApplication, None) => {
                create_application(self.gateway.as_ref(), payload).await
            }
            (_, Some(application_id)) => {
                update_application_section(self.gateway.as_ref(), &application_id, payload)
                    .await
                    .map(|()| application_id)
            }
            (mode, None) => {
                // Mode invariant broken: only NewApplication may lack an id.
                warn!(
                    "[PHASE: wizard] [STEP: submit] mode {:?} has no application id",
                    mode
                );
                self.state.phase = SubmitPhase::Error;
                return Err(PortalError::remote_fallback());
            }
        };

        match call_result {
            Ok(application_id) => {
                self.state.phase = SubmitPhase::Idle;
                if self.state.mode == WizardMode::NewApplication {
                    self.state.mode = WizardMode::ExistingApplication;
                }
                self.state.application_id = Some(application_id.clone());
                if self.is_last_step() {
                    self.finished = true;
                    info!(
                        "[PHASE: wizard] [STEP: submit] final step '{}' persisted; session complete",
                        step.id
                    );
                    return Ok(SubmitOutcome::Completed { application_id });
                }
                self.state.current_step_index += 1;
                info!(
                    "[PHASE: wizard] [STEP: submit] step '{}' persisted; advancing to step {}",
                    step.id, self.state.current_step_index
                );
                if step.section == SectionId::ContactInformation {
                    // Audit trace; contact details are PII and go out masked.
                    info!(
                        "[PHASE: wizard] [STEP: submit] contact details saved for {}",
                        mask_email(&self.state.draft.contact_information.email)
                    );
                }
                self.reload_master_data().await;
                Ok(SubmitOutcome::Advanced { application_id })
            }
            Err(e) => {
                // No partial advancement: index, mode, and saved state are
                // untouched; the applicant may retry the same step.
                self.state.phase = SubmitPhase::Error;
                warn!(
                    "[PHASE: wizard] [STEP: submit] step '{}' submit failed: {}",
                    step.id, e
                );
                Err(e)
            }
        }
    }

    /// Step back one step. No remote persistence, no validation; a no-op on
    /// the first step.
    pub async fn go_to_previous_step(&mut self) {
        if self.state.phase == SubmitPhase::Submitting {
            warn!("[PHASE: wizard] [STEP: navigate] navigation ignored while submitting");
            return;
        }
        if self.state.current_step_index == 0 {
            return;
        }
        self.state.current_step_index -= 1;
        self.state.phase = SubmitPhase::Idle;
        self.reload_master_data().await;
    }

    pub fn is_last_step(&self) -> bool {
        self.state.current_step_index == self.registry.last_index()
    }

    /// Whether the final step has been persisted.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consume the controller at the end of the flow, handing the final
    /// state to the caller (which owns the terminal redirect).
    pub fn finish(self) -> WizardState {
        self.state
    }

    pub fn current_step(&self) -> Option<&StepDescriptor> {
        self.registry.get(self.state.current_step_index)
    }

    pub fn current_step_index(&self) -> usize {
        self.state.current_step_index
    }

    pub fn mode(&self) -> WizardMode {
        self.state.mode
    }

    pub fn phase(&self) -> SubmitPhase {
        self.state.phase
    }

    pub fn application_id(&self) -> Option<&str> {
        self.state.application_id.as_deref()
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.state.draft
    }

    pub fn master_data(&self) -> &MasterDataCache {
        &self.master_data
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    async fn reload_master_data(&mut self) {
        let step = self.registry.get(self.state.current_step_index).copied();
        if let Some(step) = step {
            self.master_data
                .load_for_step(step.id, step.master_data_page)
                .await;
        }
    }
}
