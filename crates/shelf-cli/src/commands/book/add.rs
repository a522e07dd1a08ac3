use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    title: &str,
    author: &str,
    copies: u32,
    categories: &[String],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let book = ctx
        .service
        .create_book(title, author, copies, categories)
        .await?;
    output(&book, flags.format)
}
