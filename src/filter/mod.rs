//! Category and status filtering.
//!
//! Narrows the whole collection down to what the category picker asks for.
//! This runs first; search and sort only ever see its output.

use crate::model::{Category, Recipe};
use log::{debug, warn};

mod model;

pub use model::CategoryFilter;

/// How many recipes the home screen's "recently viewed" strip shows.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Returns the recipes matching `filter`, in input order unless the filter
/// itself defines an order ("Most Recent").
///
/// A named filter that matches no stored category falls back to the
/// unfiltered input. That fallback is kept for compatibility with the app's
/// historical behavior and is logged.
pub fn filter_by_category<'a>(
    recipes: &'a [Recipe],
    categories: &[Category],
    filter: &CategoryFilter,
) -> Vec<&'a Recipe> {
    match filter {
        CategoryFilter::All => recipes.iter().collect(),
        CategoryFilter::MostRecent => most_recent(recipes),
        CategoryFilter::Favorites => recipes.iter().filter(|r| r.is_favorited).collect(),
        CategoryFilter::Uncategorized => recipes.iter().filter(|r| r.is_uncategorized()).collect(),
        CategoryFilter::Named(name) => {
            if categories.iter().any(|c| &c.name == name) {
                recipes.iter().filter(|r| r.has_category(name)).collect()
            } else {
                warn!("Unknown category filter {:?}, showing all recipes", name);
                recipes.iter().collect()
            }
        }
    }
}

/// The first `limit` recipes by last-viewed time, newest first.
pub fn recent_recipes(recipes: &[Recipe], limit: usize) -> Vec<&Recipe> {
    let mut recent = most_recent(recipes);
    recent.truncate(limit);
    recent
}

/// Every recipe, newest view first. Unparseable timestamps sort last.
fn most_recent(recipes: &[Recipe]) -> Vec<&Recipe> {
    let mut keyed: Vec<_> = recipes.iter().map(|r| (r.last_viewed(), r)).collect();

    let unparsed = keyed.iter().filter(|(at, _)| at.is_none()).count();
    if unparsed > 0 {
        debug!("{} recipe(s) have an unparseable last-viewed timestamp", unparsed);
    }

    // Option orders None below Some, so reversing puts them at the end
    keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
    keyed.into_iter().map(|(_, r)| r).collect()
}
