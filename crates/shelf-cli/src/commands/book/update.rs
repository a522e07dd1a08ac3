use shelf_core::enums::EntityType;
use shelf_db::updates::book::BookUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::commands::shared::errors::describe;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: i64,
    title: Option<&str>,
    author: Option<&str>,
    copies: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut builder = BookUpdateBuilder::new();
    if let Some(title) = title {
        builder = builder.title(title);
    }
    if let Some(author) = author {
        builder = builder.author(author);
    }
    if let Some(copies) = copies {
        builder = builder.copies(copies);
    }

    let book = ctx
        .service
        .update_book(id, builder.build())
        .await
        .map_err(|error| describe(error, EntityType::Book, id))?;
    output(&book, flags.format)
}
