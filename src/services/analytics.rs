use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Role, SearchLog, User};

const TOP_TERMS: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

/// Admin dashboard figures
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub user_count: usize,
    pub avg_age: u32,
    pub top_search: String,
    pub total_searches: usize,
    pub top_terms: Vec<TermCount>,
}

/// Aggregates the user table and the search log
///
/// Admin accounts are not counted. A user without an age counts as zero
/// toward the average.
pub fn admin_stats(users: &[User], history: &SearchLog) -> AdminStats {
    let members: Vec<&User> = users.iter().filter(|u| u.role != Role::Admin).collect();

    let avg_age = if members.is_empty() {
        0
    } else {
        let total: u64 = members.iter().map(|u| u64::from(u.age.unwrap_or(0))).sum();
        (total as f64 / members.len() as f64).round() as u32
    };

    let top_terms = rank_terms(history);
    let top_search = top_terms
        .first()
        .map(|t| t.term.clone())
        .unwrap_or_else(|| "None".to_string());

    AdminStats {
        user_count: members.len(),
        avg_age,
        top_search,
        total_searches: history.len(),
        top_terms,
    }
}

/// Most frequent trimmed terms, highest count first, ties in first-seen order
fn rank_terms(history: &SearchLog) -> Vec<TermCount> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for entry in history.iter() {
        let term = entry.term.trim();
        let count = counts.entry(term).or_insert_with(|| {
            order.push(term);
            0
        });
        *count += 1;
    }

    let mut ranked: Vec<TermCount> = order
        .into_iter()
        .map(|term| TermCount {
            term: term.to_string(),
            count: counts[term],
        })
        .collect();
    // Stable sort keeps first-seen order among equal counts
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_TERMS);
    ranked
}
