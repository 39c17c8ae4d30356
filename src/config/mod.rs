use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Absent means the in-memory store is used.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub base_uri: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            base_uri: normalize_base_uri(
                &env::var("BASE_URI").unwrap_or_else(|_| "http://localhost:8000".to_string()),
            ),
        })
    }

    /// Absolute URL of a collection, e.g. `http://localhost:8000/chinadramas`.
    pub fn collection_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_uri, path)
    }
}

fn normalize_base_uri(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_uri: &str) -> AppConfig {
        AppConfig {
            database_url: None,
            database_max_connections: 10,
            host: "127.0.0.1".to_string(),
            port: 0,
            base_uri: normalize_base_uri(base_uri),
        }
    }

    #[test]
    fn collection_url_joins_path() {
        let c = config("http://api.test");
        assert_eq!(c.collection_url("chinadramas"), "http://api.test/chinadramas");
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let c = config("http://api.test/v1/");
        assert_eq!(c.collection_url("notes"), "http://api.test/v1/notes");
    }
}
