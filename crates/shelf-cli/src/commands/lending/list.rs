use shelf_db::repos::lending::LendingFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    name: Option<&str>,
    book_id: Option<i64>,
    active_only: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = LendingFilter {
        borrower: name.map(String::from),
        book_id,
        active_only,
        limit: Some(effective_limit(flags.limit, ctx.config.general.default_limit)),
    };
    let lendings = ctx.engine.list(&filter).await?;
    output(&lendings, flags.format)
}
