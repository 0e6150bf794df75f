//! Ingredient safety analysis using the text model.

use validator::Validate;

use crate::ai::prompts::{
    render_safety_analysis_prompt, report_response_schema, SAFETY_ANALYST_SYSTEM_INSTRUCTION,
};
use crate::ai::{GatewayClient, GenerateRequest};
use crate::error::GatewayError;
use crate::normalize::normalize_json;
use crate::types::ProductSafetyReport;

/// Ask the model for a safety report on the given ingredients.
///
/// Temperature is pinned to 0 and the output is schema-constrained.
/// The report is validated for shape only (riskScore bounds, required
/// fields); its judgments are never recomputed locally.
pub async fn analyze_ingredients(
    gateway: &dyn GatewayClient,
    ingredients: &[String],
) -> Result<ProductSafetyReport, GatewayError> {
    let request = GenerateRequest {
        prompt: render_safety_analysis_prompt(ingredients),
        system_instruction: Some(SAFETY_ANALYST_SYSTEM_INSTRUCTION.to_string()),
        temperature: Some(0.0),
        response_schema: Some(report_response_schema()),
        ..Default::default()
    };

    let text = gateway.generate(request).await?;
    let value = normalize_json(&text)?;

    let report: ProductSafetyReport =
        serde_json::from_value(value).map_err(|e| GatewayError::MalformedOutput {
            message: format!("Failed to parse safety report: {}", e),
            raw: text.clone(),
        })?;

    report.validate().map_err(|e| GatewayError::MalformedOutput {
        message: format!("Safety report failed validation: {}", e),
        raw: text,
    })?;

    Ok(report)
}
