//! Recipe endpoints (`/recipes`).

use crate::client::{
    client::ApiClient,
    error::ApiError,
    types::{ListResponse, Recipe, RecipeCreateRequest, RecipeFilters, RecipeUpdateRequest},
};

/// Typed access to the recipe resource. Borrowed from [`ApiClient::recipes`].
#[derive(Debug, Clone, Copy)]
pub struct RecipeApi<'a> {
    client: &'a ApiClient,
}

impl<'a> RecipeApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &RecipeFilters) -> Result<ListResponse<Recipe>, ApiError> {
        let recipes: ListResponse<Recipe> = self.client.get("/recipes", &filters.to_query()).await?;
        tracing::debug!("Retrieved {} of {} recipes", recipes.items.len(), recipes.total);
        Ok(recipes)
    }

    pub async fn get(&self, id: &str) -> Result<Recipe, ApiError> {
        self.client.get(&recipe_path(id), &[]).await
    }

    pub async fn create(&self, data: &RecipeCreateRequest) -> Result<Recipe, ApiError> {
        let recipe: Recipe = self.client.post("/recipes", data).await?;
        tracing::info!("Created recipe {} ({})", recipe.id, recipe.name);
        Ok(recipe)
    }

    /// Replaces the stored recipe with `data` in full.
    pub async fn update(&self, id: &str, data: &RecipeUpdateRequest) -> Result<Recipe, ApiError> {
        self.client.put(&recipe_path(id), data).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.del::<()>(&recipe_path(id)).await?;
        tracing::info!("Deleted recipe {}", id);
        Ok(())
    }
}

fn recipe_path(id: &str) -> String {
    format!("/recipes/{}", urlencoding::encode(id))
}
