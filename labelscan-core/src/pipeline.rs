//! Two-step extraction-then-analysis pipeline.
//!
//! Strictly sequential: the analysis step needs the extraction step's
//! ingredient list, so the steps never run concurrently and a failure in
//! extraction short-circuits before any analysis call. No retries, no
//! fallbacks. Failures carry the stage they occurred in, so callers and
//! tests can tell which step broke.

use std::fmt;

use thiserror::Error;

use crate::ai::{GatewayClient, ImageData};
use crate::analysis::analyze_ingredients;
use crate::error::GatewayError;
use crate::extraction::extract_label;
use crate::types::ProductSafetyReport;

/// Which pipeline step a failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Extraction,
    Analysis,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Extraction => write!(f, "extraction"),
            PipelineStage::Analysis => write!(f, "analysis"),
        }
    }
}

/// A pipeline failure, tagged with the stage it came from.
#[derive(Debug, Error)]
#[error("{stage} step failed: {source}")]
pub struct PipelineError {
    pub stage: PipelineStage,
    #[source]
    pub source: GatewayError,
}

/// Run the full label pipeline: extract ingredients from the photo, then
/// feed them verbatim (order preserved) into the safety analysis.
pub async fn run_label_pipeline(
    gateway: &dyn GatewayClient,
    image: ImageData,
) -> Result<ProductSafetyReport, PipelineError> {
    let extracted = extract_label(gateway, image)
        .await
        .map_err(|source| PipelineError {
            stage: PipelineStage::Extraction,
            source,
        })?;

    tracing::info!(
        category = %extracted.category,
        ingredient_count = extracted.ingredients.len(),
        "Label extraction complete, starting safety analysis"
    );

    analyze_ingredients(gateway, &extracted.ingredients)
        .await
        .map_err(|source| PipelineError {
            stage: PipelineStage::Analysis,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeGateway;

    const EXTRACTION: &str =
        r#"{"category":"snack","ingredients":["sugar","salt","citric acid"],"found":true}"#;
    const REPORT: &str = r#"{"summary":"Low risk","analysis":[{"name":"sugar","isHarmful":false,"harmfulEffects":"None","riskScore":2}]}"#;

    fn photo() -> ImageData {
        ImageData::jpeg(vec![1, 2, 3])
    }

    #[tokio::test]
    async fn test_pipeline_happy_path() {
        let gateway = FakeGateway::new();
        gateway.add_response("product label", EXTRACTION);
        gateway.add_response("Assess the safety", REPORT);

        let report = run_label_pipeline(&gateway, photo()).await.unwrap();
        assert_eq!(report.summary, "Low risk");
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn test_pipeline_feeds_extracted_ingredients_in_order() {
        let gateway = FakeGateway::new();
        gateway.add_response("product label", EXTRACTION);
        gateway.add_response("Assess the safety", REPORT);

        run_label_pipeline(&gateway, photo()).await.unwrap();

        let calls = gateway.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].prompt.contains("sugar, salt, citric acid"));
    }

    #[tokio::test]
    async fn test_extraction_failure_short_circuits() {
        let gateway = FakeGateway::new()
            .with_default_response(r#"{"category":"unknown","ingredients":[],"found":false}"#);

        let err = run_label_pipeline(&gateway, photo()).await.unwrap_err();
        assert_eq!(err.stage, PipelineStage::Extraction);
        assert!(matches!(err.source, GatewayError::NoIngredientsDetected));
        // Analysis was never attempted.
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_analysis_failure_is_tagged() {
        let gateway = FakeGateway::new();
        gateway.add_response("product label", EXTRACTION);
        gateway.add_response("Assess the safety", "");

        let err = run_label_pipeline(&gateway, photo()).await.unwrap_err();
        assert_eq!(err.stage, PipelineStage::Analysis);
        assert!(matches!(err.source, GatewayError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_rate_limit_propagates_from_first_call() {
        let gateway = FakeGateway::new();
        gateway.fail_with(GatewayError::RateLimited {
            retry_after_secs: Some(30),
        });

        let err = run_label_pipeline(&gateway, photo()).await.unwrap_err();
        assert_eq!(err.stage, PipelineStage::Extraction);
        assert!(matches!(err.source, GatewayError::RateLimited { .. }));
        assert_eq!(gateway.call_count(), 1);
    }
}
