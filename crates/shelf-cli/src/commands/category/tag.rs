use shelf_core::enums::EntityType;

use crate::cli::GlobalFlags;
use crate::commands::shared::errors::describe;
use crate::context::AppContext;
use crate::output::output;

pub async fn run_tag(
    book_id: i64,
    name: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let book = ctx
        .service
        .tag_book(book_id, name)
        .await
        .map_err(|error| describe(error, EntityType::Book, book_id))?;
    output(&book, flags.format)
}

pub async fn run_untag(
    book_id: i64,
    name: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let book = ctx
        .service
        .untag_book(book_id, name)
        .await
        .map_err(|error| describe(error, EntityType::Book, book_id))?;
    output(&book, flags.format)
}
