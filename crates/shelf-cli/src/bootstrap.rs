use anyhow::Context;
use shelf_config::ShelfConfig;

use crate::cli::GlobalFlags;

/// Load configuration (`.env`, config files, `SHELF_*` env) and apply the
/// `--database` override.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<ShelfConfig> {
    load_dotenv()?;

    let mut config = ShelfConfig::load().context("failed to load shelf configuration")?;
    if let Some(path) = &flags.database {
        config.database.path.clone_from(path);
        config
            .validate()
            .context("invalid --database value")?;
    }
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}
