use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::error::{SelectionError, SubmitError};
use super::state::{CalendarRequest, FormState, FormView};
use crate::client::ApiClient;
use crate::models::booking::{BookingPayload, Confirmation, DraftPatch};
use crate::models::branch::BranchId;

/// Drives one booking form: applies transitions to its state and makes the
/// remote calls they ask for. The state lock is never held across a call.
pub struct BookingController {
    api: ApiClient,
    state: Mutex<FormState>,
}

impl BookingController {
    pub fn new(api: ApiClient) -> Self {
        BookingController {
            api,
            state: Mutex::new(FormState::default()),
        }
    }

    /// A controller with its branch list (and the first branch's calendar)
    /// already loaded.
    pub async fn open(api: ApiClient) -> Self {
        let controller = Self::new(api);
        controller.load_branches().await;
        controller
    }

    pub async fn load_branches(&self) {
        let result = self.api.branches().await;
        let request = self.state.lock().await.branches_loaded(result);
        self.load_calendar(request).await;
    }

    pub async fn select_branch(&self, branch: Option<BranchId>) {
        let request = self.state.lock().await.select_branch(branch);
        self.load_calendar(request).await;
    }

    async fn load_calendar(&self, request: Option<CalendarRequest>) {
        let Some(request) = request else {
            return;
        };

        let result = self.api.calendar(&request.branch).await;
        self.state.lock().await.calendar_loaded(request.id, result);
    }

    pub async fn select_date(&self, date: Option<String>) -> Result<(), SelectionError> {
        self.state.lock().await.select_date(date)
    }

    pub async fn select_time(&self, time: Option<String>) -> Result<(), SelectionError> {
        self.state.lock().await.select_time(time)
    }

    pub async fn edit(&self, patch: DraftPatch) {
        self.state.lock().await.edit(patch);
    }

    /// Validates, checks the document has no booking that day, then submits.
    pub async fn submit(&self) -> Result<Confirmation, SubmitError> {
        let payload = self.state.lock().await.begin_submit()?;
        info!(
            "submitting booking for branch {} on {} {}",
            payload.branch_id, payload.date, payload.start_time
        );

        let outcome = self.send(&payload).await;
        self.state.lock().await.finish_submit(&payload, outcome)
    }

    async fn send(&self, payload: &BookingPayload) -> Result<Value, SubmitError> {
        if self
            .api
            .booking_exists(&payload.document, &payload.date)
            .await?
        {
            warn!("document already has a booking on {}", payload.date);
            return Err(SubmitError::Conflict);
        }

        Ok(self.api.create_booking(payload).await?)
    }

    pub async fn reset(&self) {
        self.state.lock().await.reset();
    }

    pub async fn dismiss_confirmation(&self) {
        self.state.lock().await.dismiss_confirmation();
    }

    pub async fn view(&self) -> FormView {
        self.state.lock().await.view()
    }
}
