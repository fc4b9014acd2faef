//! Backend liveness (`/health`).

use crate::client::{client::ApiClient, error::ApiError, types::HealthResponse};

#[derive(Debug, Clone, Copy)]
pub struct HealthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> HealthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<HealthResponse, ApiError> {
        let health: HealthResponse = self.client.get("/health", &[]).await?;
        tracing::debug!(
            "Health status {} (version {})",
            health.status,
            health.version.as_deref().unwrap_or("unknown")
        );
        Ok(health)
    }
}
