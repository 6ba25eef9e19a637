//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` in the working directory, then overridden by
//! `FINCRAFT__*` environment variables (e.g. `FINCRAFT__SERVER__PORT=3000`).
//!
//! See `settings.toml.example` for the configuration.
use config::{Config, ConfigError, Environment, File};
use engine::EmptyPeriod;
use serde::Deserialize;
use server::PeriodView;

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub empty_period: EmptyPeriod,
    #[serde(default)]
    pub view: PeriodView,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("FINCRAFT").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_file_has_no_server() {
        let settings = parse("");
        assert_eq!(settings.app.level, "info");
        assert!(settings.server.is_none());
    }

    #[test]
    fn full_server_section() {
        let settings = parse(
            r#"
            [app]
            level = "debug"

            [server]
            bind = "0.0.0.0"
            port = 3000
            database = { sqlite = "fincraft.db" }
            request_timeout_secs = 5
            empty_period = "not_found"
            view = "by_category"
            "#,
        );

        assert_eq!(settings.app.level, "debug");
        let server = settings.server.unwrap();
        assert_eq!(server.bind.as_deref(), Some("0.0.0.0"));
        assert_eq!(server.port, 3000);
        assert!(matches!(server.database, Database::Sqlite(ref p) if p == "fincraft.db"));
        assert_eq!(server.request_timeout_secs, Some(5));
        assert_eq!(server.empty_period, EmptyPeriod::NotFound);
        assert_eq!(server.view, PeriodView::ByCategory);
    }

    #[test]
    fn server_defaults() {
        let settings = parse(
            r#"
            [server]
            port = 8080
            database = "memory"
            "#,
        );

        let server = settings.server.unwrap();
        assert!(server.bind.is_none());
        assert!(matches!(server.database, Database::Memory));
        assert!(server.request_timeout_secs.is_none());
        assert_eq!(server.empty_period, EmptyPeriod::Empty);
        assert_eq!(server.view, PeriodView::Flat);
    }
}
