mod add;
mod delete;
mod get;
mod list;
mod restock;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::BookCommands;
use crate::context::AppContext;

/// Handle `shelf book`.
pub async fn handle(
    action: &BookCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        BookCommands::Add {
            title,
            author,
            copies,
            categories,
        } => add::run(title, author, *copies, categories, ctx, flags).await,
        BookCommands::List {
            title,
            author,
            categories,
            sort,
        } => {
            list::run(
                title.as_deref(),
                author.as_deref(),
                categories,
                sort.as_deref(),
                ctx,
                flags,
            )
            .await
        }
        BookCommands::Get { id } => get::run(*id, ctx, flags).await,
        BookCommands::Update {
            id,
            title,
            author,
            copies,
        } => update::run(*id, title.as_deref(), author.as_deref(), *copies, ctx, flags).await,
        BookCommands::Restock { id, copies } => restock::run(*id, *copies, ctx, flags).await,
        BookCommands::Delete { id } => delete::run(*id, ctx, flags).await,
    }
}
