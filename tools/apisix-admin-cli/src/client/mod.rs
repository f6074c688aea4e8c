mod error;
mod http;
mod models;

pub use error::*;
pub use http::*;
pub use models::*;

use crate::config::ContextConfig;

/// Client factory for creating API clients
pub struct ClientFactory;

impl ClientFactory {
    /// Create an HTTP client for the given context
    pub fn create_http_client(
        context: &ContextConfig,
    ) -> Result<HttpClient, ClientError> {
        HttpClient::new(context)
    }
}
