pub mod client;
pub mod endpoint;

pub use client::{ApiClient, ApiError, PlaceholderApi};
