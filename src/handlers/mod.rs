pub mod services;
pub mod sessions;
