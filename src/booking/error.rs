use thiserror::Error;

use super::notice::{BOOKING_EXISTS, BOOKING_FAILED, BOOKING_IN_FLIGHT, FORM_INVALID};
use super::validation::FieldErrors;
use crate::client::ApiError;

/// A date or time the form does not currently offer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("{0} is not an offered date for the selected branch")]
    UnknownDate(String),

    #[error("{0} is not an offered time for the selected date")]
    UnknownTime(String),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a booking is already being submitted")]
    InFlight,

    #[error("the booking form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),

    #[error("the document already has a booking on that date")]
    Conflict,

    #[error(transparent)]
    Backend(#[from] ApiError),
}

impl SubmitError {
    /// Text shown to the customer.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::InFlight => BOOKING_IN_FLIGHT.to_string(),
            SubmitError::Invalid(_) => FORM_INVALID.to_string(),
            SubmitError::Conflict => BOOKING_EXISTS.to_string(),
            SubmitError::Backend(e) => e.server_message().unwrap_or(BOOKING_FAILED).to_string(),
        }
    }
}
