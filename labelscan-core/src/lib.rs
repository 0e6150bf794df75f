pub mod ai;
pub mod analysis;
pub mod error;
pub mod extraction;
pub mod normalize;
pub mod pipeline;
pub mod types;

pub use ai::{AiConfig, ConfigError, FakeGateway, GatewayClient, GeminiClient, GenerateRequest, ImageData};
pub use analysis::analyze_ingredients;
pub use error::GatewayError;
pub use extraction::extract_label;
pub use normalize::normalize_json;
pub use pipeline::{run_label_pipeline, PipelineError, PipelineStage};
pub use types::{ExtractionResult, IngredientSafety, ProductSafetyReport};
