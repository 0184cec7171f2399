use crate::models::Preferences;

/// Number of titles the model is asked for, and the most we pass on
pub const RECOMMENDATION_COUNT: usize = 5;

/// Builds the concierge prompt for a preference record
pub fn build_prompt(prefs: &Preferences) -> String {
    let category = prefs.category;

    let age = prefs
        .user_age
        .map(|age| format!("{} years old", age))
        .unwrap_or_else(|| "Unknown".to_string());

    let favorites = match prefs.favorites.trim() {
        "" => "None provided",
        listed => listed,
    };

    let preference = if prefs.critically_acclaimed {
        "Strictly highly-rated (IMDb 8.0+, Rotten Tomatoes 90%+) or currently trending."
    } else {
        "Hidden gems or popular hits."
    };

    let rating = if prefs.is_minor() {
        "STRICTLY PG-13 OR LOWER. NO R-RATED CONTENT."
    } else {
        "Any rating is fine, but flag extreme content."
    };

    format!(
        r#"Act as a world-class media concierge. Your goal is to provide the perfect {category} recommendations.

USER PROFILE:
- Mood: "{mood}"
- Category: {category}
- Age: {age}
- Favorites: {favorites}
- Preference: {preference}

CONSTRAINTS:
1. Age Appropriateness: {rating}
2. Relevance: Recommendations MUST match the mood. If "happy", give uplifting content. If "adventurous", give high-stakes action.
3. Variety: Provide {count} distinct choices (e.g., one classic, one modern hit, one indie/niche).
4. Logic: If the user lists favorites, recommend similar items in tone, creator, or genre, but DO NOT recommend the favorites themselves.

OUTPUT FORMAT:
- Return ONLY a raw JSON array.
- No markdown blocks.
- Schema:
  [
    {{
      "id": 1,
      "title": "Exact Title",
      "type": "{category}",
      "year": "YYYY",
      "description": "A compelling 1-sentence pitch explaining WHY this matches their mood/favorites."
    }}
  ]
"#,
        category = category,
        mood = prefs.mood,
        age = age,
        favorites = favorites,
        preference = preference,
        rating = rating,
        count = RECOMMENDATION_COUNT,
    )
}

/// Removes every markdown code fence the model adds despite being told not to
pub fn strip_code_fences(reply: &str) -> String {
    reply.replace("```json", "").replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Mood};

    #[test]
    fn test_prompt_embeds_profile() {
        let mut prefs = Preferences::new(Mood::Romantic, Category::Series);
        prefs.favorites = "Normal People, Fleabag".to_string();
        prefs.user_age = Some(29);

        let prompt = build_prompt(&prefs);
        assert!(prompt.contains("perfect Series recommendations"));
        assert!(prompt.contains("- Mood: \"romantic\""));
        assert!(prompt.contains("- Age: 29 years old"));
        assert!(prompt.contains("- Favorites: Normal People, Fleabag"));
        assert!(prompt.contains("\"type\": \"Series\""));
        assert!(prompt.contains("Any rating is fine"));
        assert!(prompt.contains("Hidden gems or popular hits."));
    }

    #[test]
    fn test_prompt_for_minor_is_pg13() {
        let mut prefs = Preferences::new(Mood::Adventurous, Category::Movie);
        prefs.user_age = Some(15);
        assert!(build_prompt(&prefs).contains("STRICTLY PG-13 OR LOWER"));
    }

    #[test]
    fn test_prompt_without_age_or_favorites() {
        let prompt = build_prompt(&Preferences::new(Mood::Happy, Category::Book));
        assert!(prompt.contains("- Age: Unknown"));
        assert!(prompt.contains("- Favorites: None provided"));
        assert!(!prompt.contains("PG-13"));
    }

    #[test]
    fn test_critically_acclaimed_flag_changes_preference() {
        let mut prefs = Preferences::new(Mood::Chill, Category::Anime);
        prefs.critically_acclaimed = true;
        let prompt = build_prompt(&prefs);
        assert!(prompt.contains("Strictly highly-rated"));
        assert!(!prompt.contains("Hidden gems"));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("```\n[]\n```\n"), "[]");
        assert_eq!(strip_code_fences("  [2]  "), "[2]");
        assert_eq!(strip_code_fences("[{\"a\":1}]```"), "[{\"a\":1}]");
    }
}
