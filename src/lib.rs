pub mod filter;
pub mod model;
pub mod scale;
pub mod search;
pub mod seed;
pub mod sort;
pub mod store;
pub mod view;

mod ffi;

uniffi::setup_scaffolding!();

pub use filter::{filter_by_category, recent_recipes, CategoryFilter, DEFAULT_RECENT_LIMIT};
pub use model::*;
pub use scale::{ingredient_line, scale_amount, scale_ingredients};
pub use search::{search, SearchScopes};
pub use seed::{import_seed, import_seed_dir, import_seed_once, SeedDocument, SeedGuard, SeedRun};
pub use sort::{sort_recipes, SortOrder};
pub use store::{InMemoryStore, JsonFileStore, RecipeRepository, StoreError};
pub use view::{derive_view_model, QueryOptions, RecipeDetail, ViewModel};
