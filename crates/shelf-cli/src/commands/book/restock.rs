use shelf_core::enums::EntityType;

use crate::cli::GlobalFlags;
use crate::commands::shared::errors::describe;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: i64,
    copies: u32,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let book = ctx
        .service
        .restock_book(id, copies)
        .await
        .map_err(|error| describe(error, EntityType::Book, id))?;
    output(&book, flags.format)
}
