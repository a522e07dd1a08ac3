use serde::de::DeserializeOwned;
use shelf_core::rating::Rating;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Check a `--rating` value before anything is sent to the engine.
pub fn parse_rating(raw: Option<i64>) -> anyhow::Result<Option<Rating>> {
    raw.map(Rating::new)
        .transpose()
        .map_err(|error| anyhow::anyhow!("invalid --rating: {error}"))
}
