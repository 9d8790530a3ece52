pub mod availability;
pub mod booking;
pub mod branch;
pub mod lenient;
pub mod service;
