//! Ingredient extraction from label photos using the vision model.

use crate::ai::prompts::render_label_extract_prompt;
use crate::ai::{GatewayClient, GenerateRequest, ImageData};
use crate::error::GatewayError;
use crate::normalize::normalize_json;
use crate::types::ExtractionResult;

/// Read the ingredient list off a label photo.
///
/// Sends the image with the fixed extraction prompt, normalizes the model's
/// text into JSON, and rejects labels where the model found nothing usable.
pub async fn extract_label(
    gateway: &dyn GatewayClient,
    image: ImageData,
) -> Result<ExtractionResult, GatewayError> {
    let request = GenerateRequest {
        prompt: render_label_extract_prompt(),
        image: Some(image),
        ..Default::default()
    };

    let text = gateway.generate(request).await?;
    let value = normalize_json(&text)?;

    let extracted: ExtractionResult =
        serde_json::from_value(value).map_err(|e| GatewayError::MalformedOutput {
            message: format!("Failed to parse extraction response: {}", e),
            raw: text,
        })?;

    if !extracted.found || extracted.ingredients.is_empty() {
        return Err(GatewayError::NoIngredientsDetected);
    }

    Ok(extracted)
}
