pub mod confirmation;
pub mod controller;
pub mod error;
pub mod notice;
pub mod state;
pub mod validation;

pub use controller::BookingController;
pub use error::{SelectionError, SubmitError};
