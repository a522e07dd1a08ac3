use serde::Serialize;
use shelf_core::enums::EntityType;

use crate::cli::GlobalFlags;
use crate::commands::shared::errors::describe;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DeleteResponse {
    category_id: i64,
    deleted: bool,
}

pub async fn run(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.service
        .delete_category(id)
        .await
        .map_err(|error| describe(error, EntityType::Category, id))?;
    output(
        &DeleteResponse {
            category_id: id,
            deleted: true,
        },
        flags.format,
    )
}
