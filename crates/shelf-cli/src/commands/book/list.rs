use shelf_core::entities::Book;
use shelf_core::enums::BookSort;
use shelf_db::repos::book::BookQuery;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    title: Option<&str>,
    author: Option<&str>,
    categories: &[String],
    sort: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
    let sort = match sort {
        Some(raw) => parse_enum::<BookSort>(raw, "sort")?,
        None => ctx.config.general.default_sort,
    };

    let books: Vec<Book> = if title.is_none() && author.is_none() && categories.is_empty() {
        ctx.service.list_books(sort, limit).await?
    } else {
        let query = BookQuery {
            title: title.map(String::from),
            author: author.map(String::from),
            categories: categories.to_vec(),
            sort,
            limit: Some(limit),
        };
        ctx.service.search_books(&query).await?
    };

    output(&books, flags.format)
}
