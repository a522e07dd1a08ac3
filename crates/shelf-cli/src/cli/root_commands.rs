use clap::Subcommand;

use crate::cli::subcommands::{BookCommands, CategoryCommands, LendingCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Catalog: add, find, edit, and remove books.
    Book {
        #[command(subcommand)]
        action: BookCommands,
    },
    /// Categories and book tags.
    Category {
        #[command(subcommand)]
        action: CategoryCommands,
    },
    /// Borrow and return books, inspect the loan ledger.
    Lending {
        #[command(subcommand)]
        action: LendingCommands,
    },
    /// Interactive session reading commands from stdin.
    Shell,
}
