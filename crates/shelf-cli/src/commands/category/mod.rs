mod add;
mod delete;
mod list;
mod tag;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CategoryCommands;
use crate::context::AppContext;

/// Handle `shelf category`.
pub async fn handle(
    action: &CategoryCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CategoryCommands::List => list::run(ctx, flags).await,
        CategoryCommands::Add { name } => add::run(name, ctx, flags).await,
        CategoryCommands::Tag { book, name } => tag::run_tag(*book, name, ctx, flags).await,
        CategoryCommands::Untag { book, name } => tag::run_untag(*book, name, ctx, flags).await,
        CategoryCommands::Delete { id } => delete::run(*id, ctx, flags).await,
    }
}
