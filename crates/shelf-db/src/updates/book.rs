//! Book update builder.

use serde::Serialize;

/// Catalog edit for a book. Rating and categories are not edited here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copies: Option<u32>,
}

impl BookUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.copies.is_none()
    }
}

pub struct BookUpdateBuilder(BookUpdate);

impl BookUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(BookUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.0.author = Some(author.into());
        self
    }

    #[must_use]
    pub const fn copies(mut self, copies: u32) -> Self {
        self.0.copies = Some(copies);
        self
    }

    #[must_use]
    pub fn build(self) -> BookUpdate {
        self.0
    }
}

impl Default for BookUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
