//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub upload_path: String,
    pub static_dir: String,
    pub max_upload_bytes: usize,
    #[serde(default)]
    pub remove_after_print: bool,
    /// CORS origin allowed to call the API; any origin when unset.
    #[serde(default)]
    pub allowed_origin: Option<String>,
    pub sumatra_pdf_path: String,
}
