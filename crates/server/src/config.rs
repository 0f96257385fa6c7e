use std::fs;

use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub database_url: String,
    pub seed_heroes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            database_url: "sqlite://./data/heroes.db".into(),
            seed_heroes: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    database_url: Option<String>,
    seed_heroes: Option<bool>,
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string("server.toml").ok();
    resolve_settings(file.as_deref(), |key| std::env::var(key).ok())
}

/// Layers `server.toml` contents and then environment variables over the
/// defaults. The `APP__*` variables win over their short forms.
pub(crate) fn resolve_settings(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<FileSettings>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.bind_addr {
                    settings.server_bind = v;
                }
                if let Some(v) = file_cfg.database_url {
                    settings.database_url = v;
                }
                if let Some(v) = file_cfg.seed_heroes {
                    settings.seed_heroes = v;
                }
            }
            Err(error) => warn!(%error, "ignoring unparsable server.toml"),
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = env("APP__DATABASE_URL") {
        settings.database_url = v;
    }

    if let Some(v) = env("APP__SEED_HEROES") {
        match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => settings.seed_heroes = true,
            "0" | "false" | "no" => settings.seed_heroes = false,
            other => warn!(value = other, "ignoring unrecognized APP__SEED_HEROES"),
        }
    }

    settings
}

/// Normalizes the configured url and rejects anything that is not SQLite.
/// Storage creates the parent directory when it opens the file.
pub fn prepare_database_url(raw_database_url: &str) -> anyhow::Result<String> {
    let database_url = normalize_database_url(raw_database_url);
    if !database_url.starts_with("sqlite:") {
        anyhow::bail!("unsupported database url '{database_url}'");
    }
    Ok(database_url)
}

pub(crate) fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        let path = path.replace('\\', "/");
        return format!("sqlite://{path}");
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
