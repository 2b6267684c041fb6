use crate::types::{StackPage, StackStatus};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API error during {operation}: {message}")]
    Api {
        operation: &'static str,
        message: String,
    },

    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Request throttled: {message}")]
    Throttled { message: String },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Read-only access to a paginated stack listing.
#[async_trait]
pub trait StackProvider: Send + Sync {
    /// Fetches a single page of stacks matching `status_filter`, starting
    /// at `next_token` when one was returned by the previous page.
    async fn list_stacks_page(
        &self,
        status_filter: &[StackStatus],
        next_token: Option<String>,
    ) -> ProviderResult<StackPage>;

    fn provider_name(&self) -> &'static str;
}
