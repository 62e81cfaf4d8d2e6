use crate::model::Recipe;
use log::debug;

mod model;

pub use model::SearchScopes;

/// Keeps the recipes where any enabled scope contains `query`, ignoring case.
///
/// An empty query returns the input untouched. A non-empty query with no
/// scopes enabled matches nothing; it does not mean "search everywhere".
pub fn search<'a>(recipes: &[&'a Recipe], query: &str, scopes: &SearchScopes) -> Vec<&'a Recipe> {
    if query.is_empty() {
        return recipes.to_vec();
    }
    if scopes.is_empty() {
        debug!("Search for {:?} with every scope disabled", query);
        return Vec::new();
    }

    let needle = query.to_lowercase();
    recipes
        .iter()
        .copied()
        .filter(|recipe| matches_recipe(recipe, &needle, scopes))
        .collect()
}

/// `needle` must already be lowercased
fn matches_recipe(recipe: &Recipe, needle: &str, scopes: &SearchScopes) -> bool {
    (scopes.title && contains(&recipe.title, needle))
        || (scopes.author && contains(&recipe.author, needle))
        || (scopes.notes
            && recipe
                .notes
                .as_deref()
                .is_some_and(|notes| contains(notes, needle)))
        || (scopes.ingredients
            && recipe
                .ingredients
                .iter()
                .any(|i| contains(&i.ingredient, needle) || contains(&i.notes, needle)))
        || (scopes.directions
            && recipe
                .directions
                .iter()
                .any(|d| contains(&d.direction, needle)))
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
