//! Domain types produced by the Gateway.
//!
//! These are deserialized straight from model output. The service never
//! recomputes `isHarmful` or `riskScore` locally; the only local check is the
//! structural one (`riskScore` within 0-10, required fields present).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Safety assessment for a single ingredient, as judged by the model.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSafety {
    pub name: String,
    pub is_harmful: bool,
    /// Health risks, or the "None" sentinel when the ingredient is harmless.
    pub harmful_effects: String,
    /// Risk rating 0-10.
    #[validate(range(min = 0, max = 10))]
    pub risk_score: i32,
}

/// Full safety report for a product, one entry per ingredient.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductSafetyReport {
    /// Brief health verdict for the product as a whole.
    pub summary: String,
    /// Per-ingredient assessments, in the order the model returned them.
    #[validate(nested)]
    pub analysis: Vec<IngredientSafety>,
}

/// Result of reading an ingredient list off a product label photo.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExtractionResult {
    /// Product type, e.g. "snack" or "shampoo".
    #[serde(default = "default_category")]
    pub category: String,
    /// Ingredient names in label order.
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Whether any label content was detected at all.
    #[serde(default)]
    pub found: bool,
}

fn default_category() -> String {
    "unknown".to_string()
}
