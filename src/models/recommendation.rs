use serde::{Deserialize, Deserializer, Serialize};

use super::Category;

/// A single recommended title, as shown to the user and saved to the watchlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationItem {
    pub id: u64,
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: Category,
    #[serde(
        default,
        deserialize_with = "year_from_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,
    pub description: String,
}

impl RecommendationItem {
    pub fn new(id: u64, title: &str, media_type: Category, description: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            media_type,
            year: None,
            description: description.to_string(),
        }
    }
}

/// Model replies put the year in quotes about half the time
fn year_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(u32),
    }

    Ok(match Option::<Year>::deserialize(deserializer)? {
        Some(Year::Text(text)) => Some(text),
        Some(Year::Number(number)) => Some(number.to_string()),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_accepts_string_and_number() {
        let quoted: RecommendationItem = serde_json::from_str(
            r#"{"id":1,"title":"Paprika","type":"Anime","year":"2006","description":"Dreamy."}"#,
        )
        .unwrap();
        let bare: RecommendationItem = serde_json::from_str(
            r#"{"id":1,"title":"Paprika","type":"Anime","year":2006,"description":"Dreamy."}"#,
        )
        .unwrap();

        assert_eq!(quoted.year.as_deref(), Some("2006"));
        assert_eq!(quoted, bare);
    }

    #[test]
    fn test_year_optional() {
        let item: RecommendationItem = serde_json::from_str(
            r#"{"id":2,"title":"Dune","type":"Book","description":"Sand."}"#,
        )
        .unwrap();
        assert_eq!(item.year, None);

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("year").is_none());
        assert_eq!(json["type"], "Book");
    }

    #[test]
    fn test_missing_title_is_a_schema_error() {
        let result = serde_json::from_str::<RecommendationItem>(
            r#"{"id":3,"type":"Movie","description":"?"}"#,
        );
        assert!(result.is_err());
    }
}
