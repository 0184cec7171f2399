use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Emotional intent steering the tone of recommendations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Adventurous,
    Chill,
    Romantic,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Adventurous,
        Mood::Chill,
        Mood::Romantic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Adventurous => "adventurous",
            Mood::Chill => "chill",
            Mood::Romantic => "romantic",
        }
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media type filter. Also used as the `type` of a recommendation item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    #[serde(alias = "movie")]
    Movie,
    #[serde(alias = "series", alias = "TV Series")]
    Series,
    #[serde(alias = "book")]
    Book,
    #[serde(alias = "anime")]
    Anime,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movie => "Movie",
            Category::Series => "Series",
            Category::Book => "Book",
            Category::Anime => "Anime",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a single recommendation request is shaped from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub mood: Mood,
    pub category: Category,
    #[serde(default)]
    pub favorites: String,
    #[serde(default)]
    pub user_age: Option<u32>,
    /// Restrict to highly-rated or trending titles
    #[serde(default)]
    pub critically_acclaimed: bool,
}

impl Preferences {
    pub fn new(mood: Mood, category: Category) -> Self {
        Self {
            mood,
            category,
            favorites: String::new(),
            user_age: None,
            critically_acclaimed: false,
        }
    }

    /// Users under 18 only get PG-13 or lower
    pub fn is_minor(&self) -> bool {
        self.user_age.is_some_and(|age| age < 18)
    }

    /// The analytics term recorded for this request, e.g. "chill Anime"
    pub fn search_term(&self) -> String {
        format!("{} {}", self.mood, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&Mood::Chill).unwrap(), "\"chill\"");
        assert_eq!(serde_json::to_string(&Category::Anime).unwrap(), "\"Anime\"");

        let category: Category = serde_json::from_str("\"book\"").unwrap();
        assert_eq!(category, Category::Book);
    }

    #[test]
    fn test_unknown_mood_is_rejected() {
        assert!(serde_json::from_str::<Mood>("\"angry\"").is_err());
    }

    #[test]
    fn test_preferences_defaults() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"mood":"happy","category":"Movie"}"#).unwrap();
        assert_eq!(prefs.favorites, "");
        assert_eq!(prefs.user_age, None);
        assert!(!prefs.critically_acclaimed);
        assert_eq!(prefs.search_term(), "happy Movie");
    }

    #[test]
    fn test_is_minor() {
        let mut prefs = Preferences::new(Mood::Sad, Category::Book);
        assert!(!prefs.is_minor());
        prefs.user_age = Some(17);
        assert!(prefs.is_minor());
        prefs.user_age = Some(18);
        assert!(!prefs.is_minor());
    }

    #[test]
    fn test_all_moods_listed() {
        assert_eq!(Mood::ALL.len(), 5);
    }
}
