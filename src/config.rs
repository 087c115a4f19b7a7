use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::AppError;

/// Environment variable naming an optional TOML configuration file.
pub const CONFIG_PATH_ENV: &str = "FACIAL_ANALYSIS_CONFIG";

const ENV_PREFIX: &str = "FACIAL_ANALYSIS";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
    pub max_image_width: u32,
    pub max_image_height: u32,
    /// Upper bound on the decoder's pixel buffer allocation.
    pub max_image_alloc_bytes: u64,
    /// Origins allowed by CORS. Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub log_filter: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_body_bytes: 10 * 1024 * 1024,
            max_image_width: 8192,
            max_image_height: 8192,
            max_image_alloc_bytes: 256 * 1024 * 1024,
            allowed_origins: Vec::new(),
            log_filter: "info".to_string(),
        }
    }
}

impl Configuration {
    /// Layers defaults, the optional TOML file and `FACIAL_ANALYSIS_*` variables.
    pub fn load(path: Option<&str>) -> Result<Self, AppError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::new(path, FileFormat::Toml));
        }
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("allowed_origins"),
        );
        Self::from_builder(builder)
    }

    pub fn from_env() -> Result<Self, AppError> {
        let path = std::env::var(CONFIG_PATH_ENV).ok();
        Self::load(path.as_deref())
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, AppError> {
        let configuration = builder.build()?.try_deserialize::<Configuration>()?;
        Ok(configuration)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
