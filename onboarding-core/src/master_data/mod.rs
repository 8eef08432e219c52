// Step-scoped master data cache
//
// Option lists are fetched per wizard step and replaced wholesale on step
// change, never accumulated. A fetch completion is applied only if the
// wizard is still on the step the fetch was issued for; late responses for
// abandoned steps are discarded to avoid stale-data flicker.

use std::sync::Arc;

use log::{info, warn};

use crate::api::applications::retrieve_master_values;
use crate::api::gateway::Gateway;
use crate::error::PortalError;
use crate::models::responses::{MasterDataOption, MasterDataSchema};

const NO_OPTIONS: &[MasterDataOption] = &[];

/// Tags an in-flight fetch with the step it was issued for.
struct LoadTicket {
    step_id: String,
}

pub struct MasterDataCache {
    gateway: Arc<dyn Gateway>,
    /// Step the wizard is currently on; compared against the ticket when a
    /// fetch completes.
    active_step: Option<String>,
    /// Step whose schemas are currently held, once a load has finished.
    loaded_step: Option<String>,
    schemas: Vec<MasterDataSchema>,
    error: Option<String>,
}

impl MasterDataCache {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            active_step: None,
            loaded_step: None,
            schemas: Vec::new(),
            error: None,
        }
    }

    /// Fetch the option lists for a step. Failures degrade to empty lists
    /// and are surfaced on `error()`; there is no automatic retry, so the
    /// caller re-invokes to retry.
    pub async fn load_for_step(&mut self, step_id: &str, page: u8) {
        let ticket = self.begin_load(step_id);
        let result = retrieve_master_values(self.gateway.as_ref(), page).await;
        self.complete_load(ticket, result);
    }

    /// Mark a fetch as issued for `step_id`. Held data is cleared up front:
    /// while a fetch is in flight the cache serves empty lists.
    fn begin_load(&mut self, step_id: &str) -> LoadTicket {
        self.active_step = Some(step_id.to_string());
        self.loaded_step = None;
        self.schemas.clear();
        self.error = None;
        LoadTicket {
            step_id: step_id.to_string(),
        }
    }

    /// Apply a fetch completion unless the wizard has moved on since the
    /// fetch was issued.
    fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<MasterDataSchema>, PortalError>,
    ) {
        if self.active_step.as_deref() != Some(ticket.step_id.as_str()) {
            info!(
                "[PHASE: master_data] [STEP: load] discarding stale response for '{}' (active step: {:?})",
                ticket.step_id, self.active_step
            );
            return;
        }
        match result {
            Ok(schemas) => {
                info!(
                    "[PHASE: master_data] [STEP: load] {} schema(s) loaded for '{}'",
                    schemas.len(),
                    ticket.step_id
                );
                self.schemas = schemas;
                self.loaded_step = Some(ticket.step_id);
                self.error = None;
            }
            Err(e) => {
                warn!(
                    "[PHASE: master_data] [STEP: load] fetch for '{}' failed: {}",
                    ticket.step_id, e
                );
                self.schemas.clear();
                self.loaded_step = None;
                self.error = Some(e.to_string());
            }
        }
    }

    /// Synchronous lookup into the last successfully loaded set. Unknown
    /// schema names and in-flight loads both yield an empty list; a
    /// dropdown must render empty, never crash the form.
    pub fn options_for_schema(&self, schema_name: &str) -> &[MasterDataOption] {
        self.schemas
            .iter()
            .find(|s| s.schema_name == schema_name)
            .map(|s| s.options.as_slice())
            .unwrap_or(NO_OPTIONS)
    }

    /// Last fetch failure, if any. Cleared by the next successful load.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Step whose option lists are currently held.
    pub fn loaded_step(&self) -> Option<&str> {
        self.loaded_step.as_deref()
    }
}
