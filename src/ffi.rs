//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! The recipe book object owns a repository behind a mutex; queries run
//! against a snapshot and hand back plain records.

use crate::filter::{recent_recipes, CategoryFilter};
use crate::model::{Category, Direction, ExpertiseLevel, Ingredient, Recipe, RecipeId};
use crate::scale::scale_ingredients;
use crate::search::SearchScopes;
use crate::seed::{import_seed_once, parse_seed, SeedError, SeedGuard};
use crate::sort::SortOrder;
use crate::store::{InMemoryStore, JsonFileStore, RecipeRepository, StoreError};
use crate::view::{derive_view_model, QueryOptions, RecipeDetail};
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum RecipeBookError {
    #[error("Recipe not found: {message}")]
    NotFound { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Seed error: {message}")]
    SeedError { message: String },
}

impl From<StoreError> for RecipeBookError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::RecipeNotFound(id) => RecipeBookError::NotFound {
                message: id.to_string(),
            },
            StoreError::DuplicateCategory(_) | StoreError::CategoryNotFound(_) => {
                RecipeBookError::InvalidInput {
                    message: e.to_string(),
                }
            }
            StoreError::Io(_) | StoreError::Serialization(_) => RecipeBookError::StorageError {
                message: e.to_string(),
            },
        }
    }
}

impl From<SeedError> for RecipeBookError {
    fn from(e: SeedError) -> Self {
        match e {
            SeedError::Store(e) => e.into(),
            other => RecipeBookError::SeedError {
                message: other.to_string(),
            },
        }
    }
}

fn parse_id(id: &str) -> Result<RecipeId, RecipeBookError> {
    id.parse().map_err(|_| RecipeBookError::InvalidInput {
        message: format!("Malformed recipe id: {}", id),
    })
}

#[derive(Debug, Clone, Copy, uniffi::Enum)]
pub enum FfiSortOrder {
    TitleAscending,
    TitleDescending,
    RatingAscending,
    RatingDescending,
}

impl From<FfiSortOrder> for SortOrder {
    fn from(order: FfiSortOrder) -> Self {
        match order {
            FfiSortOrder::TitleAscending => SortOrder::TitleAscending,
            FfiSortOrder::TitleDescending => SortOrder::TitleDescending,
            FfiSortOrder::RatingAscending => SortOrder::RatingAscending,
            FfiSortOrder::RatingDescending => SortOrder::RatingDescending,
        }
    }
}

#[derive(Debug, Clone, Copy, uniffi::Enum)]
pub enum FfiExpertiseLevel {
    Beginner,
    Moderate,
    Advanced,
    Expert,
}

impl From<ExpertiseLevel> for FfiExpertiseLevel {
    fn from(level: ExpertiseLevel) -> Self {
        match level {
            ExpertiseLevel::Beginner => FfiExpertiseLevel::Beginner,
            ExpertiseLevel::Moderate => FfiExpertiseLevel::Moderate,
            ExpertiseLevel::Advanced => FfiExpertiseLevel::Advanced,
            ExpertiseLevel::Expert => FfiExpertiseLevel::Expert,
        }
    }
}

impl From<FfiExpertiseLevel> for ExpertiseLevel {
    fn from(level: FfiExpertiseLevel) -> Self {
        match level {
            FfiExpertiseLevel::Beginner => ExpertiseLevel::Beginner,
            FfiExpertiseLevel::Moderate => ExpertiseLevel::Moderate,
            FfiExpertiseLevel::Advanced => ExpertiseLevel::Advanced,
            FfiExpertiseLevel::Expert => ExpertiseLevel::Expert,
        }
    }
}

/// State of the list screen's filter, search and sort controls.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiQueryOptions {
    /// "All", "Most Recent", "Favorites", "Uncategorized" or a category name
    pub category: String,
    pub search_text: String,
    pub search_in_title: bool,
    pub search_in_author: bool,
    pub search_in_notes: bool,
    pub search_in_ingredients: bool,
    pub search_in_directions: bool,
    pub sort: Option<FfiSortOrder>,
}

impl From<FfiQueryOptions> for QueryOptions {
    fn from(o: FfiQueryOptions) -> Self {
        QueryOptions {
            category: CategoryFilter::from(o.category),
            search_text: o.search_text,
            scopes: SearchScopes {
                title: o.search_in_title,
                author: o.search_in_author,
                notes: o.search_in_notes,
                ingredients: o.search_in_ingredients,
                directions: o.search_in_directions,
            },
            sort: o.sort.map(SortOrder::from),
            scale: None,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiIngredient {
    pub amount: String,
    pub unit: String,
    pub ingredient: String,
    pub notes: String,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDirection {
    pub order: i32,
    pub direction: String,
}

/// Editable recipe fields, as sent from a create/edit form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipeInput {
    pub title: String,
    pub author: String,
    pub expertise_required: FfiExpertiseLevel,
    pub source_url: Option<String>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<f64>,
    pub current_scale: f64,
    pub is_favorited: bool,
    pub star_rating: Option<u8>,
    pub image: Option<Vec<u8>>,
    pub notes: Option<String>,
    pub directions: Vec<FfiDirection>,
    pub ingredients: Vec<FfiIngredient>,
    pub categories: Vec<String>,
}

impl FfiRecipeInput {
    fn apply_to(self, recipe: &mut Recipe) {
        recipe.title = self.title;
        recipe.author = self.author;
        recipe.expertise_required = self.expertise_required.into();
        recipe.source_url = self.source_url;
        recipe.prep_time = self.prep_time;
        recipe.cook_time = self.cook_time;
        recipe.servings = self.servings;
        recipe.current_scale = self.current_scale;
        recipe.is_favorited = self.is_favorited;
        recipe.set_star_rating(self.star_rating);
        recipe.image = self.image;
        recipe.notes = self.notes;
        recipe.directions = self
            .directions
            .into_iter()
            .map(|d| Direction::new(d.order, d.direction))
            .collect();
        recipe.ingredients = self
            .ingredients
            .into_iter()
            .map(|i| Ingredient::new(i.amount, i.unit, i.ingredient, i.notes))
            .collect();
        recipe.categories = Vec::new();
        for name in self.categories {
            recipe.add_category(Category::new(name));
        }
    }
}

/// One row of the recipe list.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipeSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub expertise_required: FfiExpertiseLevel,
    pub is_favorited: bool,
    pub star_rating: Option<u8>,
    pub has_image: bool,
    pub categories: Vec<String>,
}

impl From<&Recipe> for FfiRecipeSummary {
    fn from(r: &Recipe) -> Self {
        FfiRecipeSummary {
            id: r.id().to_string(),
            title: r.title.clone(),
            author: r.author.clone(),
            expertise_required: r.expertise_required.into(),
            is_favorited: r.is_favorited,
            star_rating: r.star_rating(),
            has_image: r.image.is_some(),
            categories: r.categories.iter().map(|c| c.name.clone()).collect(),
        }
    }
}

/// Detail screen content with ingredients already scaled.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipeDetail {
    pub id: String,
    pub title: String,
    pub scale: f64,
    pub categories: Vec<String>,
    pub ingredient_lines: Vec<String>,
    pub direction_lines: Vec<String>,
}

impl From<RecipeDetail> for FfiRecipeDetail {
    fn from(d: RecipeDetail) -> Self {
        FfiRecipeDetail {
            id: d.id.to_string(),
            title: d.title,
            scale: d.scale,
            categories: d.categories,
            ingredient_lines: d.ingredient_lines,
            direction_lines: d.direction_lines,
        }
    }
}

enum Backend {
    Memory(InMemoryStore),
    File(JsonFileStore),
}

impl Backend {
    fn repo(&self) -> &dyn RecipeRepository {
        match self {
            Backend::Memory(store) => store,
            Backend::File(store) => store,
        }
    }

    fn repo_mut(&mut self) -> &mut dyn RecipeRepository {
        match self {
            Backend::Memory(store) => store,
            Backend::File(store) => store,
        }
    }

    fn snapshot(&self) -> &InMemoryStore {
        match self {
            Backend::Memory(store) => store,
            Backend::File(store) => store.snapshot(),
        }
    }
}

/// The app's recipe collection.
#[derive(uniffi::Object)]
pub struct FfiRecipeBook {
    backend: Mutex<Backend>,
}

impl FfiRecipeBook {
    fn lock(&self) -> Result<MutexGuard<'_, Backend>, RecipeBookError> {
        self.backend.lock().map_err(|_| RecipeBookError::StorageError {
            message: "Recipe book lock poisoned".to_string(),
        })
    }
}

#[uniffi::export]
impl FfiRecipeBook {
    /// Creates an empty, memory-only recipe book.
    #[uniffi::constructor]
    pub fn in_memory() -> Self {
        FfiRecipeBook {
            backend: Mutex::new(Backend::Memory(InMemoryStore::new())),
        }
    }

    /// Opens (or creates on first write) a recipe book stored at `path`.
    #[uniffi::constructor]
    pub fn open(path: String) -> Result<Self, RecipeBookError> {
        let store = JsonFileStore::open(path)?;
        Ok(FfiRecipeBook {
            backend: Mutex::new(Backend::File(store)),
        })
    }

    /// Imports seed JSON unless this process already did. Returns whether
    /// anything was imported.
    pub fn import_seed_json(&self, json: String) -> Result<bool, RecipeBookError> {
        let document = parse_seed(&json)?;
        let mut backend = self.lock()?;
        let report = import_seed_once(backend.repo_mut(), document, SeedGuard::global())?;
        Ok(report.is_imported())
    }

    /// Runs the list query and returns the rows to display.
    pub fn query(&self, options: FfiQueryOptions) -> Result<Vec<FfiRecipeSummary>, RecipeBookError> {
        let backend = self.lock()?;
        let snapshot = backend.snapshot();
        let view = derive_view_model(
            snapshot.recipes(),
            snapshot.categories(),
            &QueryOptions::from(options),
        );
        Ok(view.recipes.into_iter().map(FfiRecipeSummary::from).collect())
    }

    /// The home screen's recently viewed recipes.
    pub fn recent(&self, limit: u32) -> Result<Vec<FfiRecipeSummary>, RecipeBookError> {
        let backend = self.lock()?;
        let recent = recent_recipes(backend.snapshot().recipes(), limit as usize);
        Ok(recent.into_iter().map(FfiRecipeSummary::from).collect())
    }

    /// Detail content at `scale`, or at the recipe's stored scale.
    pub fn detail(&self, id: String, scale: Option<f64>) -> Result<FfiRecipeDetail, RecipeBookError> {
        let id = parse_id(&id)?;
        let backend = self.lock()?;
        let recipe = backend
            .repo()
            .get(&id)
            .ok_or_else(|| RecipeBookError::NotFound {
                message: id.to_string(),
            })?;
        Ok(RecipeDetail::new(&recipe, scale).into())
    }

    /// Creates a recipe and returns its id.
    pub fn create_recipe(&self, input: FfiRecipeInput) -> Result<String, RecipeBookError> {
        let mut recipe = Recipe::new(String::new(), String::new());
        input.apply_to(&mut recipe);
        let id = recipe.id();
        self.lock()?.repo_mut().save(recipe)?;
        Ok(id.to_string())
    }

    /// Replaces the editable fields of an existing recipe.
    pub fn update_recipe(&self, id: String, input: FfiRecipeInput) -> Result<(), RecipeBookError> {
        let id = parse_id(&id)?;
        let mut backend = self.lock()?;
        let mut recipe = backend
            .repo()
            .get(&id)
            .ok_or_else(|| RecipeBookError::NotFound {
                message: id.to_string(),
            })?;
        input.apply_to(&mut recipe);
        backend.repo_mut().save(recipe)?;
        Ok(())
    }

    pub fn delete_recipe(&self, id: String) -> Result<(), RecipeBookError> {
        let id = parse_id(&id)?;
        self.lock()?.repo_mut().delete(&id)?;
        Ok(())
    }

    /// Stamps the recipe as viewed now.
    pub fn mark_viewed(&self, id: String) -> Result<(), RecipeBookError> {
        let id = parse_id(&id)?;
        self.lock()?.repo_mut().mark_viewed(&id, Utc::now())?;
        Ok(())
    }

    /// Category names, sorted.
    pub fn categories(&self) -> Result<Vec<String>, RecipeBookError> {
        let backend = self.lock()?;
        Ok(backend
            .repo()
            .list_categories()
            .into_iter()
            .map(|c| c.name)
            .collect())
    }

    pub fn add_category(&self, name: String) -> Result<(), RecipeBookError> {
        self.lock()?.repo_mut().add_category(Category::new(name))?;
        Ok(())
    }

    pub fn delete_category(&self, name: String) -> Result<(), RecipeBookError> {
        self.lock()?.repo_mut().delete_category(&name)?;
        Ok(())
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Scales ingredient lines without going through a recipe book.
///
/// # Arguments
/// * `ingredients` - Ingredient lines as entered
/// * `scale` - Multiplier for numeric amounts
///
/// # Returns
/// One display string per ingredient.
#[uniffi::export]
pub fn scale_ingredient_lines(ingredients: Vec<FfiIngredient>, scale: f64) -> Vec<String> {
    let ingredients: Vec<Ingredient> = ingredients
        .into_iter()
        .map(|i| Ingredient::new(i.amount, i.unit, i.ingredient, i.notes))
        .collect();
    scale_ingredients(&ingredients, scale)
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
