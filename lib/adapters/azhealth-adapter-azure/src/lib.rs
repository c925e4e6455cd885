//! Azure Resource Manager adapter.

pub mod client;
pub mod credential;
pub mod error;
mod models;

#[cfg(test)]
mod end_to_end;

pub use client::{AzureRestClient, AzureRestClientConfig};
pub use credential::AccessToken;
pub use error::AzureApiError;
