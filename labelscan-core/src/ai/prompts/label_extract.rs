//! Prompt template for reading an ingredient list off a product label photo.

pub fn render_label_extract_prompt() -> String {
    r#"Analyze this product label image.

Return a JSON object with this exact structure:
{
  "category": "The product type, e.g. 'snack' or 'shampoo', or 'unknown' if unclear",
  "ingredients": ["A clean list of all ingredient names, in label order"],
  "found": true
}

Rules:
- Set "found" to false if no ingredient list is visible in the image
- List ingredient names only, without percentages or E-number annotations
- Strictly return ONLY the JSON, no other text"#
        .to_string()
}
