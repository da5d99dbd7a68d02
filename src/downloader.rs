//! Thin wrapper over an external `yt-dlp` executable.

use crate::configuration::DownloaderConfigs;
use std::process::ExitStatus;
use tokio::process::Command;

#[derive(thiserror::Error, Debug)]
pub enum DownloadError {
    #[error("could not start `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

#[derive(Debug, Clone)]
pub struct VideoFetcher {
    program: String,
    output_dir: String,
    format: String,
}

impl VideoFetcher {
    pub fn new(program: String, output_dir: String, format: String) -> Self {
        Self {
            program,
            output_dir,
            format,
        }
    }

    pub fn from_config(config: &DownloaderConfigs) -> Self {
        Self::new(
            config.program.clone(),
            config.output_dir.clone(),
            config.format.clone(),
        )
    }

    /// Files land as `<output_dir>/<title>.<ext>`. The URL always follows `--`,
    /// so input starting with `-` is never read as an option.
    pub fn args(&self, url: &str) -> Vec<String> {
        let output_dir = self.output_dir.trim_end_matches('/');
        let output_dir = if output_dir.is_empty() { "." } else { output_dir };
        vec![
            "-f".to_string(),
            self.format.clone(),
            "-o".to_string(),
            format!("{output_dir}/%(title)s.%(ext)s"),
            "--".to_string(),
            url.to_string(),
        ]
    }

    #[tracing::instrument(name = "Downloading video", skip(self), fields(program = %self.program))]
    pub async fn download(&self, url: &str) -> Result<(), DownloadError> {
        let status = Command::new(&self.program)
            .args(self.args(url))
            .status()
            .await
            .map_err(|source| DownloadError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(DownloadError::Failed {
                program: self.program.clone(),
                status,
            });
        }

        tracing::info!("Download finished");
        Ok(())
    }
}
