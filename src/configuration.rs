use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize, Clone, Debug)]
pub struct Configuration {
    pub application: ApplicationConfigs,
    pub qr: QrConfigs,
    pub downloader: DownloaderConfigs,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationConfigs {
    pub port: u16,
    pub host: String,
    pub max_upload_bytes: usize,
}

#[derive(Deserialize, Clone, Debug)]
pub struct QrConfigs {
    /// Quiet zone around the symbol, in modules.
    pub border: u32,
    /// Largest logo edge as a fraction of the rendered image edge.
    pub logo_ratio: f32,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DownloaderConfigs {
    pub program: String,
    pub output_dir: String,
    pub format: String,
}

impl Default for DownloaderConfigs {
    fn default() -> Self {
        Self {
            program: "yt-dlp".to_string(),
            output_dir: ".".to_string(),
            format: "best".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}

fn config_dir() -> Result<std::path::PathBuf, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(e.to_string()))?;
    Ok(base_path.join("configuration"))
}

pub fn get_config() -> Result<Configuration, config::ConfigError> {
    get_config_from(&config_dir()?)
}

/// The video fetcher runs from any directory; without configuration files it
/// uses the built-in downloader defaults.
pub fn get_downloader_config() -> Result<DownloaderConfigs, config::ConfigError> {
    get_downloader_config_from(&config_dir()?)
}

pub fn get_downloader_config_from(
    config_dir: &Path,
) -> Result<DownloaderConfigs, config::ConfigError> {
    if !config_dir.join("base.yaml").is_file() {
        return Ok(DownloaderConfigs::default());
    }
    Ok(get_config_from(config_dir)?.downloader)
}

pub fn get_config_from(config_dir: &Path) -> Result<Configuration, config::ConfigError> {
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    // base.yaml first, then the environment file, then APP_* variables on top
    let configs = config::Config::builder()
        .add_source(config::File::from(config_dir.join("base.yaml")))
        .add_source(config::File::from(
            config_dir.join(format!("{}.yaml", environment.as_str())),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    configs.try_deserialize::<Configuration>()
}
