//! Server settings and the fixed data behind the rendered pages.

use std::env;

/// Where the server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Read `TODO_HOST` and `PORT`, falling back to the defaults for anything
    /// unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_string("TODO_HOST", &defaults.host),
            port: env_u16("PORT", defaults.port),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    parse_u16_or(env::var(name).ok().as_deref(), default)
}

fn parse_u16_or(raw: Option<&str>, default: u16) -> u16 {
    raw.and_then(|v| v.trim().parse::<u16>().ok()).unwrap_or(default)
}

#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub birthday: String,
    pub hobby: String,
}

/// Display preferences shown on the config page. Nothing sorts by them yet.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub sort_by: String,
    pub sort_order: String,
    pub lang: String,
}

/// Read-only data the pages are rendered from.
#[derive(Debug, Clone)]
pub struct SiteData {
    pub user: UserProfile,
    pub display: DisplayConfig,
}

impl Default for SiteData {
    fn default() -> Self {
        Self {
            user: UserProfile {
                id: "KCG".to_string(),
                name: "京都コンピュータ学院".to_string(),
                birthday: "1963年〇月△日".to_string(),
                hobby: "プログラミング".to_string(),
            },
            display: DisplayConfig {
                sort_by: "title".to_string(),
                sort_order: "ascendant".to_string(),
                lang: "ja".to_string(),
            },
        }
    }
}
