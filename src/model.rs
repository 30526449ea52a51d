use serde::{Deserialize, Serialize};
use std::fmt;

/// A generated recipe.
///
/// Field names on the wire follow the structured-output schema
/// (`recipeName`, `prepTime`, `cookTime`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Recipe name/title
    #[serde(rename = "recipeName")]
    pub name: String,
    /// Short description of the dish
    pub description: String,
    /// Preparation time as shown to the user, e.g. "15 minutos"
    pub prep_time: String,
    /// Cooking time as shown to the user, e.g. "25 minutos"
    pub cook_time: String,
    /// Yield as shown to the user, e.g. "4 porções"
    pub servings: String,
    /// Ingredients in the order the model produced them
    pub ingredients: Vec<Ingredient>,
    /// Steps in execution order
    pub instructions: Vec<String>,
}

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
}

impl Recipe {
    /// Check that the recipe is complete enough to be shown.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("recipeName is empty".to_string());
        }
        if self.ingredients.is_empty() {
            return Err("ingredients list is empty".to_string());
        }
        if self.instructions.is_empty() {
            return Err("instructions list is empty".to_string());
        }
        Ok(())
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Preparo: {} | Cozimento: {} | Porções: {}",
            self.prep_time, self.cook_time, self.servings
        )?;

        writeln!(f, "\nIngredientes")?;
        for ingredient in &self.ingredients {
            writeln!(f, "  ✓ {} {}", ingredient.quantity, ingredient.name)?;
        }

        writeln!(f, "\nInstruções")?;
        for (index, step) in self.instructions.iter().enumerate() {
            writeln!(f, "  {}. {}", index + 1, step)?;
        }
        Ok(())
    }
}
