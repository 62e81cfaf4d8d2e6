use super::{InMemoryStore, RecipeRepository, StoreError};
use crate::model::{Category, Recipe, RecipeId};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use log::debug;
use std::fs;

/// A repository persisted as a single JSON document.
///
/// The whole store is kept in memory and rewritten after every successful
/// mutation. A failed mutation leaves both memory and disk untouched.
#[derive(Debug)]
pub struct JsonFileStore {
    path: Utf8PathBuf,
    inner: InMemoryStore,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file opens as an empty store;
    /// nothing is written until the first mutation.
    pub fn open(path: impl Into<Utf8PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let inner = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            debug!("No store at {}, starting empty", path);
            InMemoryStore::new()
        };
        Ok(JsonFileStore { path, inner })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Borrowed access for running queries without cloning the snapshot.
    pub fn snapshot(&self) -> &InMemoryStore {
        &self.inner
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.inner)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Applies `change` to a copy and only keeps it once it is on disk.
    fn update<T>(
        &mut self,
        change: impl FnOnce(&mut InMemoryStore) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let previous = self.inner.clone();
        let result = change(&mut self.inner).and_then(|value| self.persist().map(|()| value));
        if result.is_err() {
            self.inner = previous;
        }
        result
    }
}

impl RecipeRepository for JsonFileStore {
    fn list_recipes(&self) -> Vec<Recipe> {
        self.inner.list_recipes()
    }

    fn list_categories(&self) -> Vec<Category> {
        self.inner.list_categories()
    }

    fn save(&mut self, recipe: Recipe) -> Result<(), StoreError> {
        self.update(|store| store.save(recipe))
    }

    fn delete(&mut self, id: &RecipeId) -> Result<Recipe, StoreError> {
        self.update(|store| store.delete(id))
    }

    fn add_category(&mut self, category: Category) -> Result<(), StoreError> {
        self.update(|store| store.add_category(category))
    }

    fn delete_category(&mut self, name: &str) -> Result<(), StoreError> {
        self.update(|store| store.delete_category(name))
    }

    fn mark_viewed(&mut self, id: &RecipeId, at: DateTime<Utc>) -> Result<(), StoreError> {
        self.update(|store| store.mark_viewed(id, at))
    }
}
