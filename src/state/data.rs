/// Shared data structures for the application state
///
/// These structs represent the plant records that flow between
/// the Gemini layer and the UI layer. Field names on the wire are
/// camelCase, matching the response schemas we send to the model.

use serde::{Deserialize, Serialize};

/// A single plant in a listing (search results, identification result)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Common name (Chinese when the query is Chinese)
    pub name: String,
    /// Latin binomial, e.g. "Monstera deliciosa"
    pub scientific_name: String,
    /// One sentence summary
    pub short_description: String,
    /// Card image; set to a `data:` URL for identified photos
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// How demanding a plant is to keep alive
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All values, in the order they appear in the response schema enum
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Care guide section of an encyclopedia entry
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlantCare {
    pub light: String,
    pub water: String,
    pub soil: String,
    pub temperature: String,
    pub humidity: String,
    pub fertilizer: String,
}

/// Full encyclopedia entry shown on the detail screen
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlantData {
    pub name: String,
    pub scientific_name: String,
    /// 2-3 paragraphs about history and appearance
    pub description: String,
    pub difficulty: Difficulty,
    pub care: PlantCare,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Plant doctor report
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DiagnosisResult {
    /// Name of the disease or issue
    pub diagnosis: String,
    /// Step by step fix
    pub solution: String,
    /// How to prevent it in future
    pub prevention: String,
}

/// Listing shown on the home screen before (or instead of) a search
pub fn default_plants() -> Vec<SearchResult> {
    [
        (
            "龟背竹",
            "Monstera deliciosa",
            "热带风情，叶片独特，适合室内散射光环境，非常受欢迎的网红植物。",
        ),
        (
            "虎尾兰",
            "Sansevieria trifasciata",
            "极强的空气净化能力，耐阴耐旱，非常适合懒人养护。",
        ),
        (
            "琴叶榕",
            "Ficus lyrata",
            "叶片如提琴般优美，植株高大挺拔，是提升家居格调的利器。",
        ),
        (
            "绿萝",
            "Epipremnum aureum",
            "生命力顽强，遇水即活，是新手入门的最佳选择。",
        ),
    ]
    .into_iter()
    .map(|(name, scientific_name, short_description)| SearchResult {
        name: name.to_string(),
        scientific_name: scientific_name.to_string(),
        short_description: short_description.to_string(),
        image_url: None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_uses_camel_case_on_the_wire() {
        let json = r#"{"name":"绿萝","scientificName":"Epipremnum aureum","shortDescription":"好养"}"#;
        let plant: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(plant.scientific_name, "Epipremnum aureum");
        assert_eq!(plant.image_url, None);

        let back = serde_json::to_value(&plant).unwrap();
        assert!(back.get("shortDescription").is_some());
        assert!(back.get("imageUrl").is_none());
    }

    #[test]
    fn test_difficulty_rejects_unknown_values() {
        assert!(serde_json::from_str::<Difficulty>(r#""Hard""#).is_ok());
        assert!(serde_json::from_str::<Difficulty>(r#""Impossible""#).is_err());
    }

    #[test]
    fn test_default_listing() {
        let plants = default_plants();
        assert_eq!(plants.len(), 4);
        assert!(plants.iter().any(|p| p.name == "绿萝"));
        assert!(plants.iter().all(|p| !p.short_description.is_empty()));
    }
}
