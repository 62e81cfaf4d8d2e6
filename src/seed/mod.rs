//! First-launch seed import.
//!
//! The app ships a starter set of recipes and categories as JSON. They are
//! loaded into the repository once per process, behind a [`SeedGuard`].

use crate::model::Category;
use crate::store::{RecipeRepository, StoreError};
use camino::Utf8Path;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs;
use std::sync::atomic::{AtomicU8, Ordering};
use thiserror::Error;

mod model;

pub use model::{SeedCategory, SeedDocument, SeedRecipe};

/// File name of the bundled recipe seed.
pub const RECIPES_SEED_FILE: &str = "RecipesInitializer.json";
/// File name of the bundled category seed.
pub const CATEGORIES_SEED_FILE: &str = "CategoriesInitializer.json";

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse seed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to store seed data: {0}")]
    Store(#[from] StoreError),
}

/// What an import actually added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub recipes_imported: usize,
    pub categories_imported: usize,
    pub categories_skipped: usize,
}

/// Outcome of [`SeedGuard::run_once`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedRun<T> {
    /// This call ran the import.
    Imported(T),
    /// An earlier call already imported the seed.
    AlreadyImported,
    /// Another call is importing right now and may still fail.
    InProgress,
}

impl<T> SeedRun<T> {
    pub fn imported(self) -> Option<T> {
        match self {
            SeedRun::Imported(value) => Some(value),
            SeedRun::AlreadyImported | SeedRun::InProgress => None,
        }
    }

    pub fn is_imported(&self) -> bool {
        matches!(self, SeedRun::Imported(_))
    }
}

const PENDING: u8 = 0;
const RUNNING: u8 = 1;
const DONE: u8 = 2;

/// "Already initialized" flag for seed imports.
///
/// A failed import releases the flag so a later attempt can retry. Callers
/// arriving while an import runs get [`SeedRun::InProgress`], not a
/// success, since that import may still fail.
#[derive(Debug, Default)]
pub struct SeedGuard {
    state: AtomicU8,
}

static GLOBAL_GUARD: SeedGuard = SeedGuard::new();

impl SeedGuard {
    pub const fn new() -> Self {
        SeedGuard {
            state: AtomicU8::new(PENDING),
        }
    }

    /// The process-wide guard used by the app.
    pub fn global() -> &'static SeedGuard {
        &GLOBAL_GUARD
    }

    /// True once an import has finished successfully.
    pub fn is_initialized(&self) -> bool {
        self.state.load(Ordering::Acquire) == DONE
    }

    /// Runs `import` unless another call already claimed the guard.
    pub fn run_once<T, E>(&self, import: impl FnOnce() -> Result<T, E>) -> Result<SeedRun<T>, E> {
        match self
            .state
            .compare_exchange(PENDING, RUNNING, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {}
            Err(DONE) => {
                debug!("Seed data already initialized, skipping");
                return Ok(SeedRun::AlreadyImported);
            }
            Err(_) => {
                debug!("Seed import already running, skipping");
                return Ok(SeedRun::InProgress);
            }
        }

        match import() {
            Ok(value) => {
                self.state.store(DONE, Ordering::Release);
                Ok(SeedRun::Imported(value))
            }
            Err(e) => {
                self.state.store(PENDING, Ordering::Release);
                Err(e)
            }
        }
    }
}

/// Parses a seed document.
pub fn parse_seed(json: &str) -> Result<SeedDocument, SeedError> {
    Ok(serde_json::from_str(json)?)
}

/// Loads `document` into `repo`. Categories go in first; names the store
/// already has (or that repeat within the seed) are skipped.
pub fn import_seed<R: RecipeRepository + ?Sized>(
    repo: &mut R,
    document: SeedDocument,
) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();
    let mut known: HashSet<String> = repo
        .list_categories()
        .into_iter()
        .map(|c| c.name)
        .collect();

    for SeedCategory { name } in document.categories {
        if known.contains(&name) {
            warn!("Skipping duplicate seed category {:?}", name);
            report.categories_skipped += 1;
            continue;
        }
        repo.add_category(Category::new(name.clone()))?;
        known.insert(name);
        report.categories_imported += 1;
    }

    for seed in document.recipes {
        repo.save(seed.into_recipe())?;
        report.recipes_imported += 1;
    }

    info!(
        "Imported {} recipe(s) and {} category(ies) from seed data",
        report.recipes_imported, report.categories_imported
    );
    Ok(report)
}

/// Imports `document` unless `guard` says the seed already ran.
pub fn import_seed_once<R: RecipeRepository + ?Sized>(
    repo: &mut R,
    document: SeedDocument,
    guard: &SeedGuard,
) -> Result<SeedRun<SeedReport>, SeedError> {
    guard.run_once(|| import_seed(repo, document))
}

/// Reads the bundled seed files from `dir` and imports them once.
///
/// Either file may be missing. Categories are imported before recipes.
pub fn import_seed_dir<R: RecipeRepository + ?Sized>(
    repo: &mut R,
    dir: &Utf8Path,
    guard: &SeedGuard,
) -> Result<SeedRun<SeedReport>, SeedError> {
    guard.run_once(|| -> Result<SeedReport, SeedError> {
        let mut document = SeedDocument::default();

        for file in [CATEGORIES_SEED_FILE, RECIPES_SEED_FILE] {
            let path = dir.join(file);
            if !path.exists() {
                debug!("No seed file at {}", path);
                continue;
            }
            let part = parse_seed(&fs::read_to_string(&path)?)?;
            document.categories.extend(part.categories);
            document.recipes.extend(part.recipes);
        }

        import_seed(repo, document)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExpertiseLevel;
    use crate::store::InMemoryStore;
    use camino::Utf8PathBuf;
    use indoc::indoc;
    use tempfile::TempDir;

    const RECIPES_JSON: &str = indoc! {r#"
        {
          "recipes": [
            {
              "title": "Pancakes",
              "author": "Noa",
              "dateCreated": "2023-11-26T10:00:00+0000",
              "expertiseRequired": "beginner",
              "dateLastViewed": "2023-12-01T08:30:00+0000",
              "sourceURL": "https://example.com/pancakes",
              "prepTime": 10,
              "cookTime": 15,
              "servings": 4,
              "currentScale": 1.0,
              "isFavorited": true,
              "starRating": 7,
              "imageURL": null,
              "notes": "Rest the batter",
              "directions": [
                {"order": 2, "direction": "Fry"},
                {"order": 1, "direction": "Whisk"}
              ],
              "ingredients": [
                {"quantity": "2", "ingredient": "eggs", "notes": ""},
                {"amount": "1.5", "unit": "cups", "ingredient": "flour", "notes": "sifted"}
              ],
              "categories": ["Breakfast"]
            },
            {
              "title": "Toast",
              "author": "Noa",
              "expertiseRequired": "expert",
              "currentScale": 1.0,
              "isFavorited": false,
              "directions": [],
              "ingredients": []
            }
          ]
        }"#};

    const CATEGORIES_JSON: &str = indoc! {r#"
        {
          "categories": [
            {"name": "Breakfast"},
            {"name": "Dinner"},
            {"name": "Dinner"}
          ]
        }"#};

    #[test]
    fn test_parse_seed_recipe_fields() {
        let document = parse_seed(RECIPES_JSON).unwrap();
        assert_eq!(document.recipes.len(), 2);
        assert!(document.categories.is_empty());

        let recipe = document.recipes[0].clone().into_recipe();
        assert_eq!(recipe.title, "Pancakes");
        assert_eq!(recipe.date_last_viewed, "2023-12-01T08:30:00+0000");
        assert_eq!(recipe.source_url.as_deref(), Some("https://example.com/pancakes"));
        assert_eq!(recipe.servings, Some(4.0));
        assert_eq!(recipe.star_rating(), Some(5));
        assert!(recipe.is_favorited);
        assert_eq!(recipe.ingredients[0].amount, "2");
        assert_eq!(recipe.ingredients[1].unit, "cups");
        assert_eq!(recipe.sorted_directions()[0].direction, "Whisk");
        assert!(recipe.has_category("Breakfast"));

        let toast = document.recipes[1].clone().into_recipe();
        assert_eq!(toast.expertise_required, ExpertiseLevel::Expert);
        assert!(toast.last_viewed().is_some());
        assert!(toast.is_uncategorized());
    }

    #[test]
    fn test_parse_seed_rejects_bad_json() {
        assert!(matches!(parse_seed("{"), Err(SeedError::Json(_))));
        // title is required
        assert!(parse_seed(r#"{"recipes": [{"author": "x"}]}"#).is_err());
    }

    #[test]
    fn test_import_seed_skips_duplicate_categories() {
        let mut store = InMemoryStore::new();
        let report = import_seed(&mut store, parse_seed(CATEGORIES_JSON).unwrap()).unwrap();

        assert_eq!(report.categories_imported, 2);
        assert_eq!(report.categories_skipped, 1);
        assert_eq!(store.list_categories().len(), 2);
    }

    #[test]
    fn test_import_seed_once_is_guarded() {
        let guard = SeedGuard::new();
        let mut store = InMemoryStore::new();

        let first = import_seed_once(&mut store, parse_seed(RECIPES_JSON).unwrap(), &guard)
            .unwrap();
        assert_eq!(first.imported().unwrap().recipes_imported, 2);
        assert!(guard.is_initialized());

        let second = import_seed_once(&mut store, parse_seed(RECIPES_JSON).unwrap(), &guard)
            .unwrap();
        assert_eq!(second, SeedRun::AlreadyImported);
        assert_eq!(store.list_recipes().len(), 2);
    }

    #[test]
    fn test_failed_import_releases_guard() {
        let guard = SeedGuard::new();
        let result: Result<SeedRun<()>, SeedError> =
            guard.run_once(|| Err(SeedError::Json(serde_json::from_str::<()>("x").unwrap_err())));
        assert!(result.is_err());
        assert!(!guard.is_initialized());

        let result: Result<SeedRun<u8>, SeedError> = guard.run_once(|| Ok(1));
        assert_eq!(result.unwrap(), SeedRun::Imported(1));
    }

    #[test]
    fn test_caller_during_import_sees_in_progress() {
        let guard = SeedGuard::new();
        let result: Result<SeedRun<()>, SeedError> = guard.run_once(|| {
            let nested: Result<SeedRun<()>, SeedError> = guard.run_once(|| Ok(()));
            assert_eq!(nested.unwrap(), SeedRun::InProgress);
            assert!(!guard.is_initialized());
            Err(SeedError::Json(serde_json::from_str::<()>("x").unwrap_err()))
        });

        assert!(result.is_err());
        assert!(!guard.is_initialized());
        let retry: Result<SeedRun<()>, SeedError> = guard.run_once(|| Ok(()));
        assert!(retry.unwrap().is_imported());
    }

    #[test]
    fn test_import_seed_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap();
        fs::write(dir.join(RECIPES_SEED_FILE), RECIPES_JSON).unwrap();
        fs::write(dir.join(CATEGORIES_SEED_FILE), CATEGORIES_JSON).unwrap();

        let guard = SeedGuard::new();
        let mut store = InMemoryStore::new();
        let report = import_seed_dir(&mut store, &dir, &guard)
            .unwrap()
            .imported()
            .unwrap();

        assert_eq!(report.recipes_imported, 2);
        assert_eq!(report.categories_imported, 2);
        assert_eq!(store.recipes_in_category("Breakfast").len(), 1);
        assert_eq!(
            store.list_categories(),
            vec![Category::new("Breakfast"), Category::new("Dinner")]
        );

        assert_eq!(
            import_seed_dir(&mut store, &dir, &guard).unwrap(),
            SeedRun::AlreadyImported
        );
    }

    #[test]
    fn test_import_seed_dir_missing_files() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap();

        let guard = SeedGuard::new();
        let mut store = InMemoryStore::new();
        let report = import_seed_dir(&mut store, &dir, &guard).unwrap();
        assert_eq!(report, SeedRun::Imported(SeedReport::default()));
        assert!(store.is_empty());
    }
}
