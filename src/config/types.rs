use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Require a bearer API key on the catalog routes
    #[serde(default)]
    pub enabled: bool,

    /// API key accepted in `Authorization: Bearer <key>` (generate with `angle-catalog generate-api-key`)
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            auth: AuthConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Root of the uploads tree; angle images go to `<uploads_dir>/Angle`
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,

    /// Largest accepted request body for uploads, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("angle-catalog.db")
}
fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}
fn default_max_upload_bytes() -> usize {
    5 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            uploads_dir: default_uploads_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Page size used when a listing request has no usable `limit`
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Also remove the database record when an angle is deleted.
    /// Off by default: deletion only removes the image file.
    #[serde(default)]
    pub purge_records_on_delete: bool,
}

fn default_page_size() -> u32 {
    10
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            purge_records_on_delete: false,
        }
    }
}
