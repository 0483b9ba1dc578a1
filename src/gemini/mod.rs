/// Gemini integration module
///
/// Everything that talks to, or about, the hosted model:
/// - `schema.rs` - response schema descriptors and validation
/// - `request.rs` - prompts and multimodal parts per intent
/// - `client.rs` - HTTP transport to `generateContent`
/// - `parse.rs` - raw text to typed values
/// - `service.rs` - per-intent facade and error boundary

pub mod schema;
pub mod request;
pub mod client;
pub mod parse;
pub mod service;

pub use client::GeminiClient;
pub use request::ImagePart;
pub use service::PlantService;
