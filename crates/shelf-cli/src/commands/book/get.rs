use shelf_core::enums::EntityType;

use crate::cli::GlobalFlags;
use crate::commands::shared::errors::describe;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let book = ctx
        .service
        .get_book(id)
        .await
        .map_err(|error| describe(error, EntityType::Book, id))?;
    output(&book, flags.format)
}
