//! Environment-driven server configuration.

use std::env;
use std::path::PathBuf;

use anyhow::bail;
use tracing::warn;

/// Credentials guarding the admin routes.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

/// Server configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// API key for the Gemini generation and embedding endpoints.
    pub gemini_api_key: String,
    /// Host of the Chroma vector store.
    pub chroma_host: String,
    /// Port of the Chroma vector store.
    pub chroma_port: u16,
    /// Credentials for the admin routes.
    pub admin: AdminCredentials,
    /// Path of the CSV file used by bulk reloads.
    pub data_path: PathBuf,
}

impl ServerConfig {
    /// Resolve the configuration from environment variables.
    ///
    /// `GEMINI_API_KEY` is required. `ADMIN_USERNAME`/`ADMIN_PASSWORD`
    /// fall back to insecure defaults for local development, with a
    /// warning; when `WOWINFO_ENV=production` they must be set
    /// explicitly or startup fails.
    pub fn from_env() -> anyhow::Result<Self> {
        let Ok(gemini_api_key) = env::var("GEMINI_API_KEY") else {
            bail!("GEMINI_API_KEY must be set");
        };

        let chroma_host = env::var("CHROMA_HOST").unwrap_or_else(|_| "localhost".to_string());
        let chroma_port = match env::var("CHROMA_PORT") {
            Ok(port) => port.parse()?,
            Err(_) => 8000,
        };

        let production = env::var("WOWINFO_ENV").is_ok_and(|v| v == "production");
        let username = env::var("ADMIN_USERNAME").ok();
        let password = env::var("ADMIN_PASSWORD").ok();
        if production && (username.is_none() || password.is_none()) {
            bail!("ADMIN_USERNAME and ADMIN_PASSWORD must be set when WOWINFO_ENV=production");
        }
        if username.is_none() || password.is_none() {
            warn!("admin credentials not configured; falling back to insecure defaults");
        }
        let admin = AdminCredentials {
            username: username.unwrap_or_else(|| "admin".to_string()),
            password: password.unwrap_or_else(|| "password".to_string()),
        };

        Ok(Self {
            bind_addr: env::var("WOWINFO_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            gemini_api_key,
            chroma_host,
            chroma_port,
            admin,
            data_path: env::var("WOWINFO_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/wow_data.csv")),
        })
    }
}
