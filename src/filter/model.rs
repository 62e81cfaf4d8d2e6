use serde::{Deserialize, Serialize};
use std::fmt;

pub const ALL: &str = "All";
pub const MOST_RECENT: &str = "Most Recent";
pub const FAVORITES: &str = "Favorites";
pub const UNCATEGORIZED: &str = "Uncategorized";

/// The category picker's current selection.
///
/// Parsed from the picker's label text. The four reserved labels win over a
/// stored category that happens to share the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    MostRecent,
    Favorites,
    Uncategorized,
    Named(String),
}

impl CategoryFilter {
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL,
            CategoryFilter::MostRecent => MOST_RECENT,
            CategoryFilter::Favorites => FAVORITES,
            CategoryFilter::Uncategorized => UNCATEGORIZED,
            CategoryFilter::Named(name) => name.as_str(),
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(label: &str) -> Self {
        match label {
            ALL => CategoryFilter::All,
            MOST_RECENT => CategoryFilter::MostRecent,
            FAVORITES => CategoryFilter::Favorites,
            UNCATEGORIZED => CategoryFilter::Uncategorized,
            name => CategoryFilter::Named(name.to_string()),
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(label: String) -> Self {
        CategoryFilter::from(label.as_str())
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.label().to_string()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
