use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
///
/// `shell` is started from `main`; inside a running shell it is refused here.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Book { action } => commands::book::handle(&action, ctx, flags).await,
        Commands::Category { action } => commands::category::handle(&action, ctx, flags).await,
        Commands::Lending { action } => commands::lending::handle(&action, ctx, flags).await,
        Commands::Shell => anyhow::bail!("the interactive shell is already running"),
    }
}
