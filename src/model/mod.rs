//! Recipe data model.
//!
//! A [`Recipe`] owns its [`Direction`]s and [`Ingredient`]s outright; they
//! live and die with it. [`Category`] is shared by name between recipes and
//! the store.

mod category;
mod recipe;
mod timestamp;

pub use category::Category;
pub use recipe::{Direction, ExpertiseLevel, Ingredient, Recipe, RecipeId, MAX_STAR_RATING};
pub use timestamp::{format_timestamp, parse_timestamp, TIMESTAMP_FORMAT};
