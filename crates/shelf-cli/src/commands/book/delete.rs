use serde::Serialize;
use shelf_core::enums::EntityType;

use crate::cli::GlobalFlags;
use crate::commands::shared::errors::describe;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DeleteResponse {
    book_id: i64,
    deleted: bool,
}

pub async fn run(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.service
        .delete_book(id)
        .await
        .map_err(|error| describe(error, EntityType::Book, id))?;
    output(
        &DeleteResponse {
            book_id: id,
            deleted: true,
        },
        flags.format,
    )
}
