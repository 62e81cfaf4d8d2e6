//! Recipe persistence.
//!
//! The query functions only ever read snapshots. Everything that changes
//! stored state goes through [`RecipeRepository`], which also owns the
//! relationship rules:
//! - deleting a recipe deletes its directions and ingredients with it
//! - deleting a category removes it from every recipe but keeps the recipes

use crate::model::{Category, Recipe, RecipeId};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod file;

pub use file::JsonFileStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Recipe not found: {0}")]
    RecipeNotFound(RecipeId),

    #[error("Category already exists: {0}")]
    DuplicateCategory(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Failed to access store file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize store: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Storage for recipes and categories.
pub trait RecipeRepository {
    /// All recipes, in insertion order.
    fn list_recipes(&self) -> Vec<Recipe>;

    /// All categories, sorted by name.
    fn list_categories(&self) -> Vec<Category>;

    /// Inserts the recipe, or replaces the stored one with the same id.
    ///
    /// Categories the recipe refers to that the store lacks are created.
    fn save(&mut self, recipe: Recipe) -> Result<(), StoreError>;

    /// Removes the recipe along with the directions and ingredients it owns.
    fn delete(&mut self, id: &RecipeId) -> Result<Recipe, StoreError>;

    /// Adds a category. Names are unique, compared case-sensitively.
    fn add_category(&mut self, category: Category) -> Result<(), StoreError>;

    /// Removes a category and detaches it from every recipe.
    fn delete_category(&mut self, name: &str) -> Result<(), StoreError>;

    /// Records that a recipe was opened at `at`.
    fn mark_viewed(&mut self, id: &RecipeId, at: DateTime<Utc>) -> Result<(), StoreError>;

    fn get(&self, id: &RecipeId) -> Option<Recipe> {
        self.list_recipes().into_iter().find(|r| r.id() == *id)
    }

    fn recipes_in_category(&self, name: &str) -> Vec<Recipe> {
        self.list_recipes()
            .into_iter()
            .filter(|r| r.has_category(name))
            .collect()
    }
}

/// A repository held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryStore {
    #[serde(default)]
    recipes: Vec<Recipe>,
    #[serde(default)]
    categories: Vec<Category>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty() && self.categories.is_empty()
    }

    /// Borrowed view of the recipes, for querying without cloning.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    fn position(&self, id: &RecipeId) -> Result<usize, StoreError> {
        self.recipes
            .iter()
            .position(|r| r.id() == *id)
            .ok_or(StoreError::RecipeNotFound(*id))
    }
}

impl RecipeRepository for InMemoryStore {
    fn list_recipes(&self) -> Vec<Recipe> {
        self.recipes.clone()
    }

    fn list_categories(&self) -> Vec<Category> {
        let mut categories = self.categories.clone();
        categories.sort();
        categories
    }

    fn save(&mut self, recipe: Recipe) -> Result<(), StoreError> {
        for category in &recipe.categories {
            if !self.has_category(&category.name) {
                debug!("Creating category {:?} referenced by {}", category.name, recipe.title);
                self.categories.push(category.clone());
            }
        }

        match self.recipes.iter_mut().find(|r| r.id() == recipe.id()) {
            Some(existing) => *existing = recipe,
            None => self.recipes.push(recipe),
        }
        Ok(())
    }

    fn delete(&mut self, id: &RecipeId) -> Result<Recipe, StoreError> {
        let index = self.position(id)?;
        let removed = self.recipes.remove(index);
        info!(
            "Deleted recipe {:?} with {} direction(s) and {} ingredient(s)",
            removed.title,
            removed.directions.len(),
            removed.ingredients.len()
        );
        Ok(removed)
    }

    fn add_category(&mut self, category: Category) -> Result<(), StoreError> {
        if self.has_category(&category.name) {
            return Err(StoreError::DuplicateCategory(category.name));
        }
        self.categories.push(category);
        Ok(())
    }

    fn delete_category(&mut self, name: &str) -> Result<(), StoreError> {
        let before = self.categories.len();
        self.categories.retain(|c| c.name != name);
        if self.categories.len() == before {
            return Err(StoreError::CategoryNotFound(name.to_string()));
        }

        let detached = self
            .recipes
            .iter_mut()
            .map(|r| r.remove_category(name))
            .filter(|removed| *removed)
            .count();
        info!("Deleted category {:?}, detached from {} recipe(s)", name, detached);
        Ok(())
    }

    fn mark_viewed(&mut self, id: &RecipeId, at: DateTime<Utc>) -> Result<(), StoreError> {
        let index = self.position(id)?;
        self.recipes[index].mark_viewed(at);
        Ok(())
    }
}
