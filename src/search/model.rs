use serde::{Deserialize, Serialize};

/// Which recipe fields a text search looks at.
///
/// Mirrors the toggles on the search options sheet. By default only the
/// title is searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchScopes {
    pub title: bool,
    pub author: bool,
    pub notes: bool,
    /// Ingredient names and ingredient notes
    pub ingredients: bool,
    pub directions: bool,
}

impl Default for SearchScopes {
    fn default() -> Self {
        SearchScopes {
            title: true,
            author: false,
            notes: false,
            ingredients: false,
            directions: false,
        }
    }
}

impl SearchScopes {
    pub fn none() -> Self {
        SearchScopes {
            title: false,
            author: false,
            notes: false,
            ingredients: false,
            directions: false,
        }
    }

    pub fn all() -> Self {
        SearchScopes {
            title: true,
            author: true,
            notes: true,
            ingredients: true,
            directions: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.title || self.author || self.notes || self.ingredients || self.directions)
    }
}
