use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    book_id: i64,
    name: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let receipt = ctx.engine.borrow(book_id, name).await?;
    output(&receipt, flags.format)
}
