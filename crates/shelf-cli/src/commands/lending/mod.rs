mod active;
mod borrow;
mod list;
mod return_book;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LendingCommands;
use crate::context::AppContext;

/// Handle `shelf lending`.
pub async fn handle(
    action: &LendingCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        LendingCommands::Borrow { book, name } => borrow::run(*book, name, ctx, flags).await,
        LendingCommands::Return { book, name, rating } => {
            return_book::run(*book, name, *rating, ctx, flags).await
        }
        LendingCommands::Active { book, name } => active::run(*book, name, ctx, flags).await,
        LendingCommands::List { name, book, active } => {
            list::run(name.as_deref(), *book, *active, ctx, flags).await
        }
    }
}
