use crate::model::{
    format_timestamp, Category, Direction, ExpertiseLevel, Ingredient, Recipe, MAX_STAR_RATING,
};
use chrono::Utc;
use log::warn;
use serde::{Deserialize, Serialize};

/// Top-level layout shared by the bundled seed files.
///
/// `RecipesInitializer.json` carries only `recipes`,
/// `CategoriesInitializer.json` only `categories`; a single document may
/// carry both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub recipes: Vec<SeedRecipe>,
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedCategory {
    pub name: String,
}

/// A recipe as written in the seed JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecipe {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub expertise_required: ExpertiseLevel,
    #[serde(default)]
    pub date_last_viewed: Option<String>,
    #[serde(default, rename = "sourceURL")]
    pub source_url: Option<String>,
    #[serde(default)]
    pub prep_time: Option<u32>,
    #[serde(default)]
    pub cook_time: Option<u32>,
    #[serde(default)]
    pub servings: Option<f64>,
    #[serde(default = "default_scale")]
    pub current_scale: f64,
    #[serde(default)]
    pub is_favorited: bool,
    #[serde(default)]
    pub star_rating: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub directions: Vec<Direction>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Category names
    #[serde(default)]
    pub categories: Vec<String>,
}

fn default_scale() -> f64 {
    1.0
}

impl SeedRecipe {
    /// Builds a stored recipe with a fresh id. Missing timestamps become now.
    pub fn into_recipe(self) -> Recipe {
        let now = format_timestamp(Utc::now());
        let mut recipe = Recipe::new(self.title, self.author);

        recipe.date_created = self.date_created.unwrap_or_else(|| now.clone());
        recipe.date_last_viewed = self.date_last_viewed.unwrap_or(now);
        recipe.expertise_required = self.expertise_required;
        recipe.source_url = self.source_url;
        recipe.prep_time = self.prep_time;
        recipe.cook_time = self.cook_time;
        recipe.servings = self.servings;
        recipe.current_scale = self.current_scale;
        recipe.is_favorited = self.is_favorited;
        recipe.notes = self.notes;
        recipe.directions = self.directions;
        recipe.ingredients = self.ingredients;

        if let Some(rating) = self.star_rating {
            let clamped = rating.clamp(0, i64::from(MAX_STAR_RATING));
            if clamped != rating {
                warn!(
                    "Star rating {} on {:?} is out of range, using {}",
                    rating, recipe.title, clamped
                );
            }
            recipe.set_star_rating(u8::try_from(clamped).ok());
        }

        for name in self.categories {
            recipe.add_category(Category::new(name));
        }
        recipe
    }
}
