/// Request building for the four plant intents
///
/// Every intent becomes a `GenerateRequest`: an ordered list of content
/// parts (image first, then the instruction text) plus the response schema
/// the model must follow.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use thiserror::Error;

use super::schema::Schema;
use crate::state::data::Difficulty;

/// Builder rejected its input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("search query is empty")]
    EmptyQuery,
    #[error("plant name is empty")]
    EmptyPlantName,
    #[error("diagnosis needs a symptom description or a photo")]
    NothingToDiagnose,
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Inline image payload, validated at construction
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePart {
    mime_type: String,
    bytes: Vec<u8>,
}

impl ImagePart {
    /// Bytes must be non-empty and `mime_type` must be `image/<subtype>`
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Result<Self, RequestError> {
        let mime_type = mime_type.into();
        let subtype = mime_type.strip_prefix("image/").unwrap_or_default();
        if subtype.is_empty() {
            return Err(RequestError::InvalidImage(format!(
                "unsupported MIME type {mime_type:?}"
            )));
        }
        if bytes.is_empty() {
            return Err(RequestError::InvalidImage("no image data".to_string()));
        }
        Ok(Self { mime_type, bytes })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// One piece of multimodal content
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    Image(ImagePart),
}

/// Wire form of a part, as `generateContent` expects it
#[derive(Serialize)]
#[serde(untagged)]
enum WirePart<'a> {
    Text {
        text: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    Inline {
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

impl Serialize for Part {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Part::Text(text) => WirePart::Text { text }.serialize(serializer),
            Part::Image(image) => WirePart::Inline {
                inline_data: InlineData {
                    mime_type: image.mime_type(),
                    data: image.to_base64(),
                },
            }
            .serialize(serializer),
        }
    }
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Search { query: String },
    Detail { plant_name: String },
    Diagnose { description: String, image: Option<ImagePart> },
    Identify { image: ImagePart },
}

impl Intent {
    /// Short label for log lines
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Search { .. } => "search",
            Intent::Detail { .. } => "detail",
            Intent::Diagnose { .. } => "diagnose",
            Intent::Identify { .. } => "identify",
        }
    }
}

/// A prompt plus the shape we expect back
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub parts: Vec<Part>,
    pub schema: Schema,
}

impl GenerateRequest {
    /// Build the prompt and schema for an intent
    ///
    /// Only presence checks are performed here; the model is trusted with
    /// everything else.
    pub fn build(intent: Intent) -> Result<Self, RequestError> {
        match intent {
            Intent::Search { query } => {
                let query = query.trim();
                if query.is_empty() {
                    return Err(RequestError::EmptyQuery);
                }
                Ok(Self {
                    parts: vec![Part::Text(format!(
                        "Find 5 indoor plants matching the query: \"{query}\". Return a JSON array."
                    ))],
                    schema: Schema::array(search_result_schema(
                        "Common name in Chinese (if query is Chinese) or English",
                    )),
                })
            }
            Intent::Detail { plant_name } => {
                let plant_name = plant_name.trim();
                if plant_name.is_empty() {
                    return Err(RequestError::EmptyPlantName);
                }
                Ok(Self {
                    parts: vec![Part::Text(format!(
                        "Provide detailed encyclopedia data for the indoor plant: \"{plant_name}\". Return in Chinese."
                    ))],
                    schema: plant_data_schema(),
                })
            }
            Intent::Diagnose { description, image } => {
                let description = description.trim();
                if description.is_empty() && image.is_none() {
                    return Err(RequestError::NothingToDiagnose);
                }
                let with_image = if image.is_some() { " and image" } else { "" };
                let mut parts: Vec<Part> = image.into_iter().map(Part::Image).collect();
                parts.push(Part::Text(format!(
                    "You are an expert botanist. Diagnose the plant issue based on this description{with_image}: \"{description}\". Provide the output in Chinese JSON format."
                )));
                Ok(Self { parts, schema: diagnosis_schema() })
            }
            Intent::Identify { image } => Ok(Self {
                parts: vec![
                    Part::Image(image),
                    Part::Text(
                        "Identify this plant. Provide the common name (in Chinese), scientific name, and a short one-sentence description in Chinese. Return in JSON."
                            .to_string(),
                    ),
                ],
                schema: search_result_schema("Common name in Chinese"),
            }),
        }
    }

    pub fn has_image(&self) -> bool {
        self.parts.iter().any(|part| matches!(part, Part::Image(_)))
    }
}

fn search_result_schema(name_hint: &'static str) -> Schema {
    Schema::object(vec![
        ("name", Schema::described(name_hint)),
        ("scientificName", Schema::string()),
        ("shortDescription", Schema::described("One sentence summary")),
    ])
}

fn plant_data_schema() -> Schema {
    let difficulties: Vec<&'static str> = Difficulty::ALL.iter().map(|d| d.as_str()).collect();
    Schema::object(vec![
        ("name", Schema::string()),
        ("scientificName", Schema::string()),
        (
            "description",
            Schema::described("2-3 paragraphs about the plant history and appearance"),
        ),
        ("difficulty", Schema::one_of(&difficulties)),
        (
            "care",
            Schema::object(vec![
                ("light", Schema::described("Detailed light requirements")),
                ("water", Schema::described("Watering frequency and method")),
                ("soil", Schema::described("Soil type preferences")),
                ("temperature", Schema::described("Ideal temp range")),
                ("humidity", Schema::described("Humidity requirements")),
                ("fertilizer", Schema::described("Feeding guide")),
            ]),
        ),
        ("tags", Schema::array(Schema::string())),
    ])
}

fn diagnosis_schema() -> Schema {
    Schema::object(vec![
        ("diagnosis", Schema::described("Name of the disease or issue")),
        ("solution", Schema::described("Step by step fix")),
        ("prevention", Schema::described("How to prevent in future")),
    ])
}
