use crate::models::{Category, Mood, RecommendationItem};

/// One entry of the built-in catalog, tagged with the mood it suits best
struct FallbackEntry {
    id: u64,
    title: &'static str,
    media_type: Category,
    mood: Mood,
    description: &'static str,
}

const CATALOG: [FallbackEntry; 5] = [
    FallbackEntry {
        id: 1,
        title: "Inception",
        media_type: Category::Movie,
        mood: Mood::Adventurous,
        description: "A mind-bending thriller that fits an adventurous mood.",
    },
    FallbackEntry {
        id: 2,
        title: "Spirited Away",
        media_type: Category::Anime,
        mood: Mood::Happy,
        description: "A magical journey perfect for a whimsical or chill mood.",
    },
    FallbackEntry {
        id: 3,
        title: "The Midnight Library",
        media_type: Category::Book,
        mood: Mood::Sad,
        description: "A thoughtful story about choices and regrets.",
    },
    FallbackEntry {
        id: 4,
        title: "Stranger Things",
        media_type: Category::Series,
        mood: Mood::Adventurous,
        description: "Nostalgic sci-fi horror that keeps you on the edge of your seat.",
    },
    FallbackEntry {
        id: 5,
        title: "Cowboy Bebop",
        media_type: Category::Anime,
        mood: Mood::Chill,
        description: "Cool, jazz-infused space western for a chill vibe.",
    },
];

impl From<&FallbackEntry> for RecommendationItem {
    fn from(entry: &FallbackEntry) -> Self {
        RecommendationItem::new(entry.id, entry.title, entry.media_type, entry.description)
    }
}

/// The whole built-in catalog, used when the model call fails
pub fn all() -> Vec<RecommendationItem> {
    CATALOG.iter().map(RecommendationItem::from).collect()
}

/// Catalog entries matching the category
///
/// When several match, entries tagged with the requested mood win if there
/// are any. An empty category match returns the whole catalog.
pub fn for_request(mood: Mood, category: Category) -> Vec<RecommendationItem> {
    let in_category: Vec<&FallbackEntry> = CATALOG
        .iter()
        .filter(|entry| entry.media_type == category)
        .collect();

    if in_category.is_empty() {
        return all();
    }

    let mood_matches: Vec<&FallbackEntry> = in_category
        .iter()
        .copied()
        .filter(|entry| entry.mood == mood)
        .collect();

    let chosen = if mood_matches.is_empty() {
        in_category
    } else {
        mood_matches
    };

    chosen.into_iter().map(RecommendationItem::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(items: &[RecommendationItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn test_all_has_five_unique_ids() {
        let items = all();
        assert_eq!(items.len(), 5);
        let mut ids: Vec<u64> = items.iter().map(|i| i.id).collect();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_book_returns_only_books() {
        for mood in Mood::ALL {
            let items = for_request(mood, Category::Book);
            assert!(!items.is_empty());
            assert!(items.iter().all(|i| i.media_type == Category::Book));
        }
    }

    #[test]
    fn test_chill_anime_is_cowboy_bebop() {
        assert_eq!(
            titles(&for_request(Mood::Chill, Category::Anime)),
            vec!["Cowboy Bebop"]
        );
    }

    #[test]
    fn test_category_without_mood_match_keeps_all_of_category() {
        assert_eq!(
            titles(&for_request(Mood::Romantic, Category::Anime)),
            vec!["Spirited Away", "Cowboy Bebop"]
        );
    }

    #[test]
    fn test_single_category_match_ignores_mood() {
        assert_eq!(
            titles(&for_request(Mood::Happy, Category::Series)),
            vec!["Stranger Things"]
        );
    }
}
