use shelf_core::enums::EntityType;
use shelf_db::error::DatabaseError;

/// Turn a missing-row error into `"<entity> <id> not found"`; pass others through.
pub fn describe(error: DatabaseError, entity: EntityType, id: i64) -> anyhow::Error {
    match error {
        DatabaseError::NoResult => anyhow::anyhow!("{entity} {id} not found"),
        other => anyhow::Error::from(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_result_names_the_entity() {
        let err = describe(DatabaseError::NoResult, EntityType::Book, 9);
        assert_eq!(err.to_string(), "book 9 not found");
    }

    #[test]
    fn other_errors_keep_their_message() {
        let err = describe(
            DatabaseError::InvalidState("book 9 has 1 open lending(s)".into()),
            EntityType::Book,
            9,
        );
        assert!(err.to_string().contains("open lending"));
    }
}
