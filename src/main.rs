use std::env;

use meal_planner_client::client::{PantryFilters, RecipeFilters};
use meal_planner_client::{ApiClient, ClientConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PROBE_LIMIT_VAR: &str = "MEAL_PLANNER_PROBE_LIMIT";
const DEFAULT_PROBE_LIMIT: u32 = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env()?;
    let limit = match env::var(PROBE_LIMIT_VAR) {
        Ok(raw) => raw.trim().parse::<u32>().map_err(|e| {
            anyhow::anyhow!("{} must be a whole number, got {:?}: {}", PROBE_LIMIT_VAR, raw, e)
        })?,
        Err(_) => DEFAULT_PROBE_LIMIT,
    };

    tracing::info!("Probing meal planner API at {}", config.base_url());
    let client = ApiClient::new(config)?;

    let health = match client.health().get().await {
        Ok(health) => health,
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            tracing::error!("Please verify:");
            tracing::error!("  - MEAL_PLANNER_BASE_URL is correct: {}", client.config().base_url());
            tracing::error!("  - The meal planner backend is running and accessible");
            std::process::exit(1);
        }
    };

    if !health.is_up() {
        tracing::error!("Backend reported status {} at {}", health.status, health.time);
        std::process::exit(1);
    }
    tracing::info!(
        "Backend is {} (version {}) at {}",
        health.status,
        health.version.as_deref().unwrap_or("unknown"),
        health.time
    );

    let pantry = client
        .pantry()
        .list(&PantryFilters {
            limit: Some(limit),
            offset: Some(0),
            ..Default::default()
        })
        .await?;
    tracing::info!("Pantry holds {} lots", pantry.total);
    for lot in &pantry.items {
        tracing::info!("  - {} [{}]: {}", lot.name, lot.lot_type, lot.display_quantity());
    }

    let recipes = client
        .recipes()
        .list(&RecipeFilters {
            limit: Some(limit),
            offset: Some(0),
            ..Default::default()
        })
        .await?;
    let page = recipes.page(limit, 0);
    tracing::info!(
        "Recipe book holds {} recipes across {} pages",
        recipes.total,
        page.total_pages()
    );
    for recipe in &recipes.items {
        tracing::info!(
            "  - {} (serves {}, {} ingredients) {}",
            recipe.name,
            recipe.servings,
            recipe.ingredients.len(),
            recipe.tags.join(", ")
        );
    }

    Ok(())
}
