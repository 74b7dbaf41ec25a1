use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MovieSummary {
    pub id: i64,
    pub url_id: String,
    pub title: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub creation_year: Option<i32>,
    #[serde(default)]
    pub movie_rating: Option<String>,
    #[serde(default)]
    pub image_1: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CharacterSummary {
    pub id: i64,
    pub url_id: String,
    pub name: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub character_type: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub profile_image_1: Option<String>,
}

/// A content hint for a movie or a character. Exactly one of the url id
/// references is set, depending on the owner.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Hint {
    pub id: i64,
    pub content: String,
    pub difficulty: u8,
    pub hint_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_url_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_url_id: Option<String>,
}
