use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_rating;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    book_id: i64,
    name: &str,
    rating: Option<i64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let rating = parse_rating(rating)?;
    let receipt = ctx
        .engine
        .return_book(book_id, name, rating.map(i64::from))
        .await?;
    output(&receipt, flags.format)
}
