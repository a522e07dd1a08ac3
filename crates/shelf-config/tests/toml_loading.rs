//! Integration tests for TOML and environment configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var and file manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use shelf_config::{ConfigError, ShelfConfig};
use shelf_core::enums::BookSort;

fn base() -> Figment {
    Figment::from(Serialized::defaults(ShelfConfig::default()))
}

#[test]
fn loads_full_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/shelf/catalog.db"

[general]
default_limit = 50
default_sort = "title"
"#,
        )?;

        let config = ShelfConfig::from_figment(&base().merge(Toml::file("config.toml")))
            .expect("config should load");

        assert_eq!(config.database.path, "/var/lib/shelf/catalog.db");
        assert_eq!(config.general.default_limit, 50);
        assert_eq!(config.general.default_sort, BookSort::Title);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[general]\ndefault_limit = 5\n")?;

        let config = ShelfConfig::from_figment(&base().merge(Toml::file("config.toml")))
            .expect("config should load");

        assert_eq!(config.database.path, "library.db");
        assert_eq!(config.general.default_limit, 5);
        assert_eq!(config.general.default_sort, BookSort::Id);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[database]\npath = \"from-toml.db\"\n")?;
        jail.set_env("SHELF_DATABASE__PATH", "from-env.db");

        let figment = base()
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("SHELF_").split("__"));
        let config = ShelfConfig::from_figment(&figment).expect("config should load");

        assert_eq!(config.database.path, "from-env.db");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".shelf")?;
        jail.create_file(".shelf/config.toml", "[general]\ndefault_sort = \"author\"\n")?;

        let config = ShelfConfig::load().expect("config should load");
        assert_eq!(config.general.default_sort, BookSort::Author);
        Ok(())
    });
}

#[test]
fn invalid_sort_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[general]\ndefault_sort = \"rating\"\n")?;

        let result = ShelfConfig::from_figment(&base().merge(Toml::file("config.toml")));
        assert!(matches!(result, Err(ConfigError::Figment(_))));
        Ok(())
    });
}

#[test]
fn empty_database_path_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("SHELF_DATABASE__PATH", "");

        let figment = base().merge(Env::prefixed("SHELF_").split("__"));
        let result = ShelfConfig::from_figment(&figment);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        Ok(())
    });
}
