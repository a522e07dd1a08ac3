use shelf_config::ShelfConfig;

/// Emit warnings for likely mistyped env var keys and a non-persistent database.
pub fn warn_unconfigured(config: &ShelfConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &ShelfConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let defaults = ShelfConfig::default();

    let mut warnings = Vec::new();

    if config.database.path == defaults.database.path
        && has_single_underscore_key(&env_keys, "SHELF_DATABASE")
    {
        warnings.push(
            "Database config appears default while SHELF_DATABASE* env vars exist. Use double underscores (example: SHELF_DATABASE__PATH)."
                .to_string(),
        );
    }

    if config.general.default_limit == defaults.general.default_limit
        && config.general.default_sort == defaults.general.default_sort
        && has_single_underscore_key(&env_keys, "SHELF_GENERAL")
    {
        warnings.push(
            "General config appears default while SHELF_GENERAL* env vars exist. Use double underscores (example: SHELF_GENERAL__DEFAULT_LIMIT)."
                .to_string(),
        );
    }

    if config.database.is_in_memory() {
        warnings.push(
            "Database path is ':memory:'; nothing will be kept after this process exits."
                .to_string(),
        );
    }

    warnings
}

fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    keys.iter()
        .any(|key| key.starts_with(prefix) && !key.starts_with(&format!("{prefix}__")))
}
