use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use super::confirmation::{ConfirmationView, format_day};
use super::error::{SelectionError, SubmitError};
use super::notice::*;
use super::validation::validate;
use crate::client::ApiError;
use crate::models::availability::{DayAvailability, available_times, retain_enabled};
use crate::models::booking::{BookingDraft, BookingPayload, Confirmation, DraftPatch};
use crate::models::branch::{Branch, BranchId};

pub type RequestId = u64;

/// A calendar fetch the form wants made. The answer is only applied while
/// `id` is still the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRequest {
    pub id: RequestId,
    pub branch: BranchId,
}

/// State of one booking form. Every method is a transition; none of them
/// performs I/O.
#[derive(Debug, Default)]
pub struct FormState {
    draft: BookingDraft,
    branches: Vec<Branch>,
    calendar: Option<Vec<DayAvailability>>,
    times: Option<Vec<String>>,
    confirmation: Option<Confirmation>,
    notices: Vec<Notice>,
    sending: bool,
    calendar_request: RequestId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateOption {
    pub value: String,
    pub label: String,
}

/// Snapshot handed to the view layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub draft: BookingDraft,
    pub branches: Vec<Branch>,
    pub dates: Vec<DateOption>,
    pub times: Option<Vec<String>>,
    pub sending: bool,
    pub confirmation: Option<ConfirmationView>,
    pub notices: Vec<Notice>,
}

#[cfg(test)]
impl FormState {
    fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    fn times(&self) -> Option<&[String]> {
        self.times.as_deref()
    }
}

impl FormState {
    pub fn branches_loaded(
        &mut self,
        result: Result<Vec<Branch>, ApiError>,
    ) -> Option<CalendarRequest> {
        match result {
            Ok(branches) => {
                self.branches = branches;
                let Some(first) = self.branches.first().cloned() else {
                    warn!("backend returned no branches");
                    self.notify(Notice::info(NO_BRANCHES));
                    return None;
                };
                self.draft.branch_name = first.street_name;
                self.select_branch(Some(first.id))
            }
            Err(e) => {
                error!("Error fetching branches: {}", e);
                self.notify(Notice::error(BRANCHES_FAILED));
                None
            }
        }
    }

    /// Changes the branch. A new non-empty branch asks for its calendar and
    /// supersedes any calendar request still in flight.
    pub fn select_branch(&mut self, branch: Option<BranchId>) -> Option<CalendarRequest> {
        let branch = branch.filter(|id| !id.as_str().is_empty());
        if self.draft.branch_id == branch {
            return None;
        }

        self.draft.branch_id = branch.clone();
        self.calendar_request += 1;

        let Some(branch) = branch else {
            self.set_calendar(None);
            return None;
        };

        if let Some(found) = self.branches.iter().find(|b| b.id == branch) {
            self.draft.branch_name = found.street_name.clone();
        }

        Some(CalendarRequest {
            id: self.calendar_request,
            branch,
        })
    }

    /// Applies a calendar answer. Returns false when the answer was stale.
    pub fn calendar_loaded(
        &mut self,
        request: RequestId,
        result: Result<Vec<DayAvailability>, ApiError>,
    ) -> bool {
        if request != self.calendar_request {
            warn!(
                "discarding calendar response {} superseded by {}",
                request, self.calendar_request
            );
            return false;
        }

        match result {
            Ok(days) if days.is_empty() => {
                info!("no calendar days for the selected branch");
                self.set_calendar(Some(Vec::new()));
                self.notify(Notice::info(NO_DATES));
            }
            Ok(days) => self.set_calendar(Some(retain_enabled(days))),
            Err(e) => {
                error!("Error fetching calendar: {}", e);
                self.set_calendar(Some(Vec::new()));
                self.notify(Notice::error(DATES_FAILED));
            }
        }
        true
    }

    pub fn select_date(&mut self, date: Option<String>) -> Result<(), SelectionError> {
        if let Some(date) = &date {
            let offered = self
                .calendar
                .as_deref()
                .unwrap_or_default()
                .iter()
                .any(|day| &day.date == date);
            if !offered {
                return Err(SelectionError::UnknownDate(date.clone()));
            }
        }

        self.draft.date = date;
        self.refresh_times();
        Ok(())
    }

    pub fn select_time(&mut self, time: Option<String>) -> Result<(), SelectionError> {
        if let Some(time) = &time {
            if !self.times.as_deref().unwrap_or_default().contains(time) {
                return Err(SelectionError::UnknownTime(time.clone()));
            }
        }

        self.draft.time = time;
        Ok(())
    }

    pub fn edit(&mut self, patch: DraftPatch) {
        patch.apply(&mut self.draft);
    }

    /// Validates and locks the form for submission.
    pub fn begin_submit(&mut self) -> Result<BookingPayload, SubmitError> {
        if self.sending {
            return Err(SubmitError::InFlight);
        }
        validate(&self.draft).map_err(SubmitError::Invalid)?;

        self.sending = true;
        Ok(BookingPayload::from_draft(&self.draft))
    }

    pub fn finish_submit(
        &mut self,
        payload: &BookingPayload,
        outcome: Result<Value, SubmitError>,
    ) -> Result<Confirmation, SubmitError> {
        self.sending = false;

        match outcome {
            Ok(answer) => {
                let confirmation = Confirmation::merge(payload, answer);
                info!(
                    "booking confirmed for {} at {}",
                    confirmation.date, confirmation.start_time
                );
                self.confirmation = Some(confirmation.clone());
                self.notify(Notice::success(BOOKING_CREATED));
                self.draft = self.draft.keeping_branch();
                self.refresh_times();
                Ok(confirmation)
            }
            Err(e) => {
                error!("Error creating booking: {}", e);
                self.notify(Notice::error(e.user_message()));
                Err(e)
            }
        }
    }

    /// Back to a blank form, branch included.
    pub fn reset(&mut self) {
        self.draft = BookingDraft::default();
        self.calendar_request += 1;
        self.set_calendar(None);
    }

    pub fn dismiss_confirmation(&mut self) {
        self.confirmation = None;
    }

    /// Current snapshot. Pending notices are handed over and cleared.
    pub fn view(&mut self) -> FormView {
        FormView {
            draft: self.draft.clone(),
            branches: self.branches.clone(),
            dates: self
                .calendar
                .iter()
                .flatten()
                .map(|day| DateOption {
                    value: day.date.clone(),
                    label: format_day(&day.date),
                })
                .collect(),
            times: self.times.clone(),
            sending: self.sending,
            confirmation: self.confirmation.as_ref().map(ConfirmationView::from),
            notices: std::mem::take(&mut self.notices),
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    // first offered day becomes the selected date
    fn set_calendar(&mut self, calendar: Option<Vec<DayAvailability>>) {
        self.draft.date = calendar
            .as_ref()
            .and_then(|days| days.first())
            .map(|day| day.date.clone());
        self.calendar = calendar;
        self.refresh_times();
    }

    // earliest slot of the selected date becomes the selected time
    fn refresh_times(&mut self) {
        let date = self.draft.date.as_deref().unwrap_or_default();
        self.times = available_times(self.calendar.as_deref(), date);
        self.draft.time = self.times.as_ref().and_then(|times| times.first()).cloned();
    }
}
