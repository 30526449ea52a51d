/// The prompt template used to ask the model for a recipe.
///
/// Loaded from `prompt.txt` at compile time. Contains an `{{INGREDIENTS}}`
/// placeholder that [`inject_ingredients`] replaces with the user's input.
pub const RECIPE_PROMPT: &str = include_str!("prompt.txt");

/// Injects the raw ingredients string, verbatim, into the prompt template.
pub fn inject_ingredients(ingredients: &str) -> String {
    RECIPE_PROMPT.replace("{{INGREDIENTS}}", ingredients)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_embedded() {
        assert!(!RECIPE_PROMPT.is_empty());
        assert!(RECIPE_PROMPT.contains("{{INGREDIENTS}}"));
        assert!(RECIPE_PROMPT.contains("chef criativo"));
    }

    #[test]
    fn test_prompt_mentions_pantry_staples() {
        for staple in ["óleo", "sal", "pimenta", "água"] {
            assert!(RECIPE_PROMPT.contains(staple), "missing {}", staple);
        }
    }

    #[test]
    fn test_inject_ingredients_is_verbatim() {
        let raw = "  ovos, queijo,, espinafre {pão} ";
        let prompt = inject_ingredients(raw);
        assert!(prompt.contains(&format!("Ingredientes: {}", raw)));
        assert!(!prompt.contains("{{INGREDIENTS}}"));
    }
}
