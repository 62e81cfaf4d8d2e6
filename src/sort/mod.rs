use crate::model::Recipe;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Orderings offered by the recipe list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    TitleAscending,
    TitleDescending,
    RatingAscending,
    RatingDescending,
}

impl SortOrder {
    fn compare(self, a: &Recipe, b: &Recipe) -> Ordering {
        match self {
            SortOrder::TitleAscending => a.title.cmp(&b.title),
            SortOrder::TitleDescending => b.title.cmp(&a.title),
            SortOrder::RatingAscending => a.rating_or_zero().cmp(&b.rating_or_zero()),
            SortOrder::RatingDescending => b.rating_or_zero().cmp(&a.rating_or_zero()),
        }
    }
}

/// Returns the recipes in `order` without touching the caller's slice.
///
/// Titles compare byte-wise, so "Zucchini" sorts before "apple". Unrated
/// recipes count as zero stars. Ties keep their input order.
pub fn sort_recipes<'a>(recipes: &[&'a Recipe], order: SortOrder) -> Vec<&'a Recipe> {
    let mut sorted = recipes.to_vec();
    sorted.sort_by(|a, b| order.compare(a, b));
    sorted
}
