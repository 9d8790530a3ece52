pub mod api;
pub mod constants;
pub mod error;

pub use api::ApiClient;
pub use error::ApiError;
