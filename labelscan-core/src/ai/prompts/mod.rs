//! Prompt templates.

pub mod label_extract;
pub mod safety_analysis;

pub use label_extract::render_label_extract_prompt;
pub use safety_analysis::{
    render_safety_analysis_prompt, report_response_schema, SAFETY_ANALYST_SYSTEM_INSTRUCTION,
};
