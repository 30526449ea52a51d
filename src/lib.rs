pub mod config;
pub mod controller;
pub mod error;
pub mod generator;
pub mod model;
pub mod providers;
pub mod relay;
pub mod remote;
pub mod schema;

pub use config::{GenieConfig, ProviderConfig, ServerConfig};
pub use controller::{Controller, Key, KeyPress, ViewState, EXAMPLE_INGREDIENTS};
pub use error::{GenieError, ProviderError};
pub use generator::{decode_recipe, RecipeGenerator, RecipeSource};
pub use model::{Ingredient, Recipe};
pub use remote::RelayClient;

/// Generate a recipe with configuration loaded from `recipe-genie.toml` and the environment.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), recipe_genie::GenieError> {
/// let recipe = recipe_genie::generate_recipe("ovos, queijo, espinafre, pão").await?;
/// println!("{}", recipe);
/// # Ok(())
/// # }
/// ```
pub async fn generate_recipe(ingredients: &str) -> Result<Recipe, GenieError> {
    if ingredients.trim().is_empty() {
        return Err(GenieError::EmptyInput);
    }

    let config = GenieConfig::load()?;
    let generator = RecipeGenerator::from_config(&config)?;
    generator.generate(ingredients).await
}
