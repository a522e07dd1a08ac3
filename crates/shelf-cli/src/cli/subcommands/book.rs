use clap::Subcommand;

/// Book catalog commands.
#[derive(Clone, Debug, Subcommand)]
pub enum BookCommands {
    /// Add a book.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long, default_value_t = 1)]
        copies: u32,
        /// Category to tag the book with (repeatable).
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    /// List or search books.
    List {
        /// Title contains (case-insensitive).
        #[arg(long)]
        title: Option<String>,
        /// Author contains (case-insensitive).
        #[arg(long)]
        author: Option<String>,
        /// Tagged with any of these categories (repeatable).
        #[arg(long = "category")]
        categories: Vec<String>,
        /// Sort key: id, title, author.
        #[arg(long)]
        sort: Option<String>,
    },
    /// Get a book by ID.
    Get { id: i64 },
    /// Edit title, author, or copy count.
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        copies: Option<u32>,
    },
    /// Put more copies on the shelf.
    Restock {
        id: i64,
        #[arg(long)]
        copies: u32,
    },
    /// Delete a book and its loan history.
    Delete { id: i64 },
}
