//! View-model derivation.
//!
//! Nothing here observes the store. The caller re-runs
//! [`derive_view_model`] whenever the snapshot or any option changes; the
//! result is deterministic for identical inputs.

use crate::filter::filter_by_category;
use crate::model::{Category, Recipe};
use crate::search::search;
use crate::sort::sort_recipes;
use log::trace;

mod model;

pub use model::{QueryOptions, RecipeDetail, ViewModel};

/// Runs category filter, then text search, then sort.
pub fn derive_view_model<'a>(
    recipes: &'a [Recipe],
    categories: &[Category],
    options: &QueryOptions,
) -> ViewModel<'a> {
    let filtered = filter_by_category(recipes, categories, &options.category);
    let searched = search(&filtered, &options.search_text, &options.scopes);
    let ordered = match options.sort {
        Some(order) => sort_recipes(&searched, order),
        None => searched,
    };

    trace!(
        "{} of {} recipe(s) shown for {:?}",
        ordered.len(),
        recipes.len(),
        options.category.label()
    );

    ViewModel {
        recipes: ordered,
        scale: options.scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::CategoryFilter;
    use crate::model::{Direction, Ingredient};
    use crate::search::SearchScopes;
    use crate::sort::SortOrder;
    use indoc::indoc;

    fn setup() -> (Vec<Recipe>, Vec<Category>) {
        let mut soup = Recipe::new("Soup", "Ann");
        soup.date_last_viewed = "2023-12-01T08:00:00+0000".to_string();
        soup.set_star_rating(Some(3));
        soup.ingredients = vec![Ingredient::new("2", "cups", "stock", "")];

        let mut cake = Recipe::new("Cake", "Bo");
        cake.is_favorited = true;
        cake.add_category(Category::new("Dessert"));
        cake.date_last_viewed = "2023-12-05T08:00:00+0000".to_string();
        cake.set_star_rating(Some(5));
        cake.current_scale = 2.0;
        cake.ingredients = vec![
            Ingredient::new("2", "cups", "flour", ""),
            Ingredient::new("a pinch", "", "salt", ""),
        ];
        cake.directions = vec![Direction::new(2, "Bake"), Direction::new(1, "Mix")];

        let mut sorbet = Recipe::new("Sorbet", "Cy");
        sorbet.add_category(Category::new("Dessert"));
        sorbet.date_last_viewed = "2023-12-03T08:00:00+0000".to_string();

        (vec![soup, cake, sorbet], vec![Category::new("Dessert")])
    }

    #[test]
    fn test_default_options_show_everything() {
        let (recipes, categories) = setup();
        let view = derive_view_model(&recipes, &categories, &QueryOptions::default());
        assert_eq!(view.titles(), vec!["Soup", "Cake", "Sorbet"]);
    }

    #[test]
    fn test_pipeline_filters_searches_then_sorts() {
        let (recipes, categories) = setup();
        let options = QueryOptions {
            category: CategoryFilter::Named("Dessert".to_string()),
            search_text: "s".to_string(),
            scopes: SearchScopes::default(),
            sort: Some(SortOrder::TitleAscending),
            scale: None,
        };
        let view = derive_view_model(&recipes, &categories, &options);
        // "Soup" matches the search but not the category
        assert_eq!(view.titles(), vec!["Sorbet"]);
    }

    #[test]
    fn test_most_recent_order_survives_without_sort() {
        let (recipes, categories) = setup();
        let options = QueryOptions {
            category: CategoryFilter::MostRecent,
            ..QueryOptions::default()
        };
        let view = derive_view_model(&recipes, &categories, &options);
        assert_eq!(view.titles(), vec!["Cake", "Sorbet", "Soup"]);
    }

    #[test]
    fn test_rating_sort_after_search() {
        let (recipes, categories) = setup();
        let options = QueryOptions {
            search_text: "o".to_string(),
            sort: Some(SortOrder::RatingDescending),
            ..QueryOptions::default()
        };
        let view = derive_view_model(&recipes, &categories, &options);
        assert_eq!(view.titles(), vec!["Soup", "Sorbet"]);
    }

    #[test]
    fn test_repeated_derivation_is_deterministic() {
        let (recipes, categories) = setup();
        let options = QueryOptions {
            category: CategoryFilter::MostRecent,
            sort: Some(SortOrder::RatingAscending),
            ..QueryOptions::default()
        };
        let first = derive_view_model(&recipes, &categories, &options);
        let second = derive_view_model(&recipes, &categories, &options);
        assert_eq!(first.recipes, second.recipes);
    }

    #[test]
    fn test_detail_uses_stored_scale() {
        let (recipes, categories) = setup();
        let view = derive_view_model(&recipes, &categories, &QueryOptions::default());
        let detail = view.detail(&recipes[1].id()).unwrap();

        assert_eq!(detail.scale, 2.0);
        assert_eq!(detail.ingredient_lines, vec!["4 cups flour", "a pinch salt"]);
        assert_eq!(detail.direction_lines, vec!["1. Mix", "2. Bake"]);
        assert_eq!(detail.categories, vec!["Dessert"]);
    }

    #[test]
    fn test_detail_scale_override() {
        let (recipes, categories) = setup();
        let options = QueryOptions {
            scale: Some(0.5),
            ..QueryOptions::default()
        };
        let view = derive_view_model(&recipes, &categories, &options);
        let detail = view.detail(&recipes[1].id()).unwrap();
        assert_eq!(detail.ingredient_lines, vec!["1 cups flour", "a pinch salt"]);
    }

    #[test]
    fn test_detail_of_hidden_recipe() {
        let (recipes, categories) = setup();
        let options = QueryOptions {
            category: CategoryFilter::Favorites,
            ..QueryOptions::default()
        };
        let view = derive_view_model(&recipes, &categories, &options);
        assert!(view.detail(&recipes[0].id()).is_none());
    }

    #[test]
    fn test_options_from_json() {
        let options = QueryOptions::from_json(indoc! {r#"
            {
              "category": "Favorites",
              "search_text": "cake",
              "scopes": {"author": true},
              "sort": "title-descending",
              "scale": 1.5
            }"#})
        .unwrap();

        assert_eq!(options.category, CategoryFilter::Favorites);
        assert_eq!(options.search_text, "cake");
        assert!(options.scopes.title);
        assert!(options.scopes.author);
        assert!(!options.scopes.notes);
        assert_eq!(options.sort, Some(SortOrder::TitleDescending));
        assert_eq!(options.scale, Some(1.5));

        assert_eq!(QueryOptions::from_json("{}").unwrap(), QueryOptions::default());
    }
}
