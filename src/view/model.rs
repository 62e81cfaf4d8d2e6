use crate::filter::CategoryFilter;
use crate::model::{Recipe, RecipeId};
use crate::scale::scale_ingredients;
use crate::search::SearchScopes;
use crate::sort::SortOrder;
use serde::{Deserialize, Serialize};

/// Everything the list screen's controls can change.
///
/// Every field has a default, so `{}` is a valid configuration: all
/// recipes, no search, title-only scope, stored order, each recipe's own
/// scale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    pub category: CategoryFilter,
    pub search_text: String,
    pub scopes: SearchScopes,
    /// `None` keeps the category filter's order
    pub sort: Option<SortOrder>,
    /// Overrides every recipe's `current_scale` when set
    pub scale: Option<f64>,
}

impl QueryOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The ordered rows to display for one set of [`QueryOptions`].
#[derive(Debug, Clone)]
pub struct ViewModel<'a> {
    pub recipes: Vec<&'a Recipe>,
    pub(super) scale: Option<f64>,
}

impl<'a> ViewModel<'a> {
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn titles(&self) -> Vec<&'a str> {
        self.recipes.iter().copied().map(|r| r.title.as_str()).collect()
    }

    /// Detail screen content for a listed recipe.
    pub fn detail(&self, id: &RecipeId) -> Option<RecipeDetail> {
        self.recipes
            .iter()
            .find(|r| r.id() == *id)
            .map(|r| RecipeDetail::new(r, self.scale))
    }
}

/// Display-ready content of one recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetail {
    pub id: RecipeId,
    pub title: String,
    pub scale: f64,
    pub categories: Vec<String>,
    pub ingredient_lines: Vec<String>,
    /// `"{order}. {direction}"`, in display order
    pub direction_lines: Vec<String>,
}

impl RecipeDetail {
    /// Renders `recipe` at `scale`, or at its stored scale when `None`.
    pub fn new(recipe: &Recipe, scale: Option<f64>) -> Self {
        let scale = scale.unwrap_or(recipe.current_scale);
        RecipeDetail {
            id: recipe.id(),
            title: recipe.title.clone(),
            scale,
            categories: recipe.categories.iter().map(|c| c.name.clone()).collect(),
            ingredient_lines: scale_ingredients(&recipe.ingredients, scale),
            direction_lines: recipe
                .sorted_directions()
                .into_iter()
                .map(|d| format!("{}. {}", d.order, d.direction))
                .collect(),
        }
    }
}
