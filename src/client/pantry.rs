//! Pantry lot endpoints (`/pantry`).

use crate::client::{
    client::ApiClient,
    error::ApiError,
    types::{ListResponse, PantryFilters, PantryLot, PantryLotCreateRequest, PantryLotUpdateRequest},
};

/// Typed access to the pantry resource. Borrowed from [`ApiClient::pantry`].
#[derive(Debug, Clone, Copy)]
pub struct PantryApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PantryApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &PantryFilters) -> Result<ListResponse<PantryLot>, ApiError> {
        let lots: ListResponse<PantryLot> = self.client.get("/pantry", &filters.to_query()).await?;
        tracing::debug!("Retrieved {} of {} pantry lots", lots.items.len(), lots.total);
        Ok(lots)
    }

    pub async fn get(&self, id: &str) -> Result<PantryLot, ApiError> {
        self.client.get(&lot_path(id), &[]).await
    }

    pub async fn create(&self, data: &PantryLotCreateRequest) -> Result<PantryLot, ApiError> {
        let lot: PantryLot = self.client.post("/pantry", data).await?;
        tracing::info!("Created pantry lot {} ({})", lot.id, lot.name);
        Ok(lot)
    }

    /// Replaces the stored lot with `data` in full.
    pub async fn update(&self, id: &str, data: &PantryLotUpdateRequest) -> Result<PantryLot, ApiError> {
        self.client.put(&lot_path(id), data).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.del::<()>(&lot_path(id)).await?;
        tracing::info!("Deleted pantry lot {}", id);
        Ok(())
    }
}

fn lot_path(id: &str) -> String {
    format!("/pantry/{}", urlencoding::encode(id))
}
