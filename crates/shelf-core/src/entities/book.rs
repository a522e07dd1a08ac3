use serde::{Deserialize, Serialize};

use crate::entities::Category;

/// A catalog entry.
///
/// `copies` counts the copies currently on the shelf; every open lending holds
/// exactly one copy that is not counted here. `average_rating` is derived from
/// the rated, closed lendings of the book and is never edited directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub copies: u32,
    pub average_rating: f64,
    pub categories: Vec<Category>,
}

impl Book {
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.copies > 0
    }

    #[must_use]
    pub fn has_category(&self, name: &str) -> bool {
        self.categories
            .iter()
            .any(|category| category.name.eq_ignore_ascii_case(name))
    }
}
