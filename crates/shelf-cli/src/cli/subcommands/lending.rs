use clap::Subcommand;

/// Lending desk commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LendingCommands {
    /// Lend a copy of a book.
    Borrow {
        #[arg(long)]
        book: i64,
        #[arg(long)]
        name: String,
    },
    /// Return a borrowed book, optionally rating it 1-10.
    Return {
        #[arg(long)]
        book: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        rating: Option<i64>,
    },
    /// Show the open lending of a book for a borrower.
    Active {
        #[arg(long)]
        book: i64,
        #[arg(long)]
        name: String,
    },
    /// List lendings.
    List {
        /// Borrower name (case-insensitive).
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        book: Option<i64>,
        /// Only lendings not yet returned.
        #[arg(long)]
        active: bool,
    },
}
