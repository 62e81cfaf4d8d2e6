use serde::{Deserialize, Serialize};

/// A named recipe category.
///
/// Names are unique within a store, compared case-sensitively. A category
/// carries no list of its recipes; ask the repository for
/// `recipes_in_category` instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category { name: name.into() }
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Category::new(name)
    }
}
