//! Structured-output schema sent with every generation request.
//!
//! Written in the model's schema dialect (`OBJECT`, `STRING`, `ARRAY`) and built
//! once per process.

use serde_json::{json, Value};
use std::sync::OnceLock;

/// Top-level fields every recipe response must contain
pub const REQUIRED_FIELDS: [&str; 7] = [
    "recipeName",
    "description",
    "prepTime",
    "cookTime",
    "servings",
    "ingredients",
    "instructions",
];

static RECIPE_SCHEMA: OnceLock<Value> = OnceLock::new();

/// The schema describing a [`crate::Recipe`] response
pub fn recipe_schema() -> &'static Value {
    RECIPE_SCHEMA.get_or_init(build_recipe_schema)
}

fn build_recipe_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recipeName": {
                "type": "STRING",
                "description": "O nome da receita."
            },
            "description": {
                "type": "STRING",
                "description": "Uma descrição curta e atraente do prato."
            },
            "prepTime": {
                "type": "STRING",
                "description": "Tempo de preparo estimado, ex: '15 minutos'."
            },
            "cookTime": {
                "type": "STRING",
                "description": "Tempo de cozimento estimado, ex: '25 minutos'."
            },
            "servings": {
                "type": "STRING",
                "description": "Número de porções que a receita rende, ex: '4 porções'."
            },
            "ingredients": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {
                            "type": "STRING",
                            "description": "O nome do ingrediente, ex: 'Peito de Frango'."
                        },
                        "quantity": {
                            "type": "STRING",
                            "description": "A quantidade do ingrediente, ex: '1 kg' ou '1 xícara'."
                        }
                    },
                    "required": ["name", "quantity"]
                },
                "description": "Uma lista dos ingredientes necessários para a receita, incluindo as quantidades."
            },
            "instructions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Instruções passo a passo para o preparo do prato."
            }
        },
        "required": REQUIRED_FIELDS,
    })
}
