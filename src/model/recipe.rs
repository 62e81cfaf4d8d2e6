use super::category::Category;
use super::timestamp::{format_timestamp, parse_timestamp};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use uuid::Uuid;

/// Highest star rating a recipe can carry.
pub const MAX_STAR_RATING: u8 = 5;

/// Stable identity of a recipe, assigned once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    pub fn new() -> Self {
        RecipeId(Uuid::new_v4())
    }
}

impl Default for RecipeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecipeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(RecipeId)
    }
}

/// How much cooking experience a recipe assumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpertiseLevel {
    #[default]
    Beginner,
    Moderate,
    Advanced,
    Expert,
}

/// A single preparation step.
///
/// `order` is the display sort key. Values are not required to be unique or
/// contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Direction {
    pub order: i32,
    pub direction: String,
}

impl Direction {
    pub fn new(order: i32, direction: impl Into<String>) -> Self {
        Direction {
            order,
            direction: direction.into(),
        }
    }
}

/// One ingredient line. Every field is free text; `amount` is only treated
/// as a number when scaling.
///
/// `quantity` is accepted as another name for `amount`. A document carrying
/// both is rejected as a duplicate field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default, alias = "quantity")]
    pub amount: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub ingredient: String,
    #[serde(default)]
    pub notes: String,
}

impl Ingredient {
    pub fn new(
        amount: impl Into<String>,
        unit: impl Into<String>,
        ingredient: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Ingredient {
            amount: amount.into(),
            unit: unit.into(),
            ingredient: ingredient.into(),
            notes: notes.into(),
        }
    }
}

/// A recipe together with the directions and ingredients it owns.
///
/// Two recipes are equal when they share an id, whatever their fields say.
/// Lists diff by identity, so an edited recipe is still "the same row".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    id: RecipeId,
    pub title: String,
    pub author: String,
    pub date_created: String,
    pub date_last_viewed: String,
    #[serde(default)]
    pub expertise_required: ExpertiseLevel,
    #[serde(default)]
    pub source_url: Option<String>,
    /// Minutes
    #[serde(default)]
    pub prep_time: Option<u32>,
    /// Minutes
    #[serde(default)]
    pub cook_time: Option<u32>,
    #[serde(default)]
    pub servings: Option<f64>,
    #[serde(default = "default_scale")]
    pub current_scale: f64,
    #[serde(default)]
    pub is_favorited: bool,
    #[serde(default, deserialize_with = "deserialize_star_rating")]
    star_rating: Option<u8>,
    #[serde(default)]
    pub image: Option<Vec<u8>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub directions: Vec<Direction>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

fn default_scale() -> f64 {
    1.0
}

/// Loads a stored rating, clamped into `0..=MAX_STAR_RATING`.
fn deserialize_star_rating<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let rating = Option::<i64>::deserialize(deserializer)?;
    Ok(rating.map(|r| r.clamp(0, i64::from(MAX_STAR_RATING)) as u8))
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Recipe {}

impl Hash for Recipe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Recipe {
    /// Creates a recipe with a fresh id, stamped as created and viewed now.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        let now = format_timestamp(Utc::now());
        Recipe {
            id: RecipeId::new(),
            title: title.into(),
            author: author.into(),
            date_created: now.clone(),
            date_last_viewed: now,
            expertise_required: ExpertiseLevel::default(),
            source_url: None,
            prep_time: None,
            cook_time: None,
            servings: None,
            current_scale: default_scale(),
            is_favorited: false,
            star_rating: None,
            image: None,
            notes: None,
            directions: Vec::new(),
            ingredients: Vec::new(),
            categories: Vec::new(),
        }
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn star_rating(&self) -> Option<u8> {
        self.star_rating
    }

    /// Sets the star rating, clamping anything above [`MAX_STAR_RATING`].
    pub fn set_star_rating(&mut self, rating: Option<u8>) {
        self.star_rating = rating.map(|r| r.min(MAX_STAR_RATING));
    }

    /// Rating used for ordering; unrated recipes count as zero stars.
    pub fn rating_or_zero(&self) -> u8 {
        self.star_rating.unwrap_or(0)
    }

    /// Parsed last-viewed timestamp, or `None` if the stored text is malformed.
    pub fn last_viewed(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(&self.date_last_viewed)
    }

    pub fn mark_viewed(&mut self, at: DateTime<Utc>) {
        self.date_last_viewed = format_timestamp(at);
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    /// True when the recipe belongs to no category at all.
    pub fn is_uncategorized(&self) -> bool {
        self.categories.is_empty()
    }

    /// Adds a category unless the recipe already has one with that name.
    pub fn add_category(&mut self, category: Category) {
        if !self.has_category(&category.name) {
            self.categories.push(category);
        }
    }

    /// Removes the named category. Returns whether anything was removed.
    pub fn remove_category(&mut self, name: &str) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.name != name);
        self.categories.len() != before
    }

    /// Directions in display order. Steps sharing an `order` keep their
    /// stored relative position.
    pub fn sorted_directions(&self) -> Vec<&Direction> {
        let mut directions: Vec<&Direction> = self.directions.iter().collect();
        directions.sort_by_key(|d| d.order);
        directions
    }
}
