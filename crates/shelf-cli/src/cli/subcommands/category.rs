use clap::Subcommand;

/// Category commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CategoryCommands {
    /// List categories.
    List,
    /// Create a category (no-op if it exists).
    Add { name: String },
    /// Tag a book with a category, creating it on demand.
    Tag { book: i64, name: String },
    /// Remove a category from a book.
    Untag { book: i64, name: String },
    /// Delete a category by ID.
    Delete { id: i64 },
}
