//! Gateway request types.

/// An image attached to a generation request.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// MIME type of the image bytes (e.g., "image/jpeg").
    pub mime_type: String,
    /// Raw image bytes; base64-encoded on the wire by the client.
    pub data: Vec<u8>,
}

impl ImageData {
    /// Wrap raw bytes as a JPEG image. Uploads are assumed JPEG-compatible.
    pub fn jpeg(data: Vec<u8>) -> Self {
        Self {
            mime_type: "image/jpeg".to_string(),
            data,
        }
    }
}

/// A single-shot generation request.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// User-visible instruction text.
    pub prompt: String,
    /// Optional inline image for multimodal requests.
    pub image: Option<ImageData>,
    /// Optional system instruction constraining the model's persona.
    pub system_instruction: Option<String>,
    /// Sampling temperature; pin to 0.0 for deterministic output.
    pub temperature: Option<f32>,
    /// Optional JSON schema the model must shape its output to.
    pub response_schema: Option<serde_json::Value>,
}
