//! Prompt template and output schema for the safety-analysis step.

/// System instruction pinning the model to regulatory sources only.
pub const SAFETY_ANALYST_SYSTEM_INSTRUCTION: &str = "You are a regulatory toxicologist. \
Assess ingredient safety using ONLY criteria published by the FDA, ECHA, and WHO. \
When sources conflict, prioritize ECHA and the CosIng database. \
Do not speculate beyond these sources. \
For each ingredient, report whether it is harmful, its known health effects \
(or the exact string \"None\" when it is not harmful), and a risk score from 0 to 10.";

/// Render the user prompt for the given ingredient list.
pub fn render_safety_analysis_prompt(ingredients: &[String]) -> String {
    format!(
        "Assess the safety of each of these product ingredients:\n{}",
        ingredients.join(", ")
    )
}

/// Output schema for `ProductSafetyReport`, in the Gemini response-schema
/// dialect (uppercase type names).
pub fn report_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "Brief health verdict of the product"
            },
            "analysis": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "isHarmful": { "type": "BOOLEAN" },
                        "harmfulEffects": {
                            "type": "STRING",
                            "description": "Health risks or 'None'"
                        },
                        "riskScore": {
                            "type": "INTEGER",
                            "description": "Risk rating 0-10"
                        }
                    },
                    "required": ["name", "isHarmful", "harmfulEffects", "riskScore"]
                }
            }
        },
        "required": ["summary", "analysis"]
    })
}
