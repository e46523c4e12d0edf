mod error;
mod portal;

use std::path::{Path, PathBuf};

use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use stencil_template::LabelKeys;

pub use self::{error::Error, portal::PortalConfig};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub portal: PortalConfig,

    #[serde(default)]
    pub labels: LabelKeys,

    #[serde(default = "stencil_cli::config::LogConfig::default")]
    pub log: stencil_cli::config::LogConfig,
}

impl Config {
    pub fn search_config_file_path() -> PathBuf {
        let paths = vec![Self::default_path()]
            .into_iter()
            .chain(stencil_base::fallback_project_config_directories().into_iter().map(
                |mut path| {
                    path.push(stencil_base::CLI_CONFIG_NAME);
                    path
                },
            ))
            .collect::<Vec<_>>();
        for path in paths {
            let Ok(exists) = path.try_exists() else {
                continue;
            };
            if exists {
                return path;
            }
        }
        Self::default_path()
    }

    #[inline]
    pub fn default_path() -> PathBuf {
        [stencil_base::PROJECT_CONFIG_DIR.to_path_buf(), PathBuf::from(stencil_base::CLI_CONFIG_NAME)]
            .into_iter()
            .collect()
    }

    /// Loads the configuration at `path`, or the defaults when no file
    /// exists there.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        if path.as_ref().try_exists().unwrap_or(false) {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.as_ref().display());
            Ok(Self::default())
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut config: Self = {
            let path =
                path.as_ref().try_resolve().map(|path| path.to_path_buf()).with_context(|_| {
                    error::ResolveFilePathSnafu { file_path: path.as_ref().to_path_buf() }
                })?;
            let data =
                std::fs::read(&path).context(error::OpenConfigSnafu { filename: path.clone() })?;
            Self::from_yaml(&data).context(error::ParseConfigSnafu { filename: path })?
        };

        config.log.file_path = match config.log.file_path.map(|path| {
            path.try_resolve()
                .map(|path| path.to_path_buf())
                .with_context(|_| error::ResolveFilePathSnafu { file_path: path.clone() })
        }) {
            Some(Ok(path)) => Some(path),
            Some(Err(err)) => return Err(err),
            None => None,
        };

        Ok(config)
    }

    fn from_yaml(data: &[u8]) -> Result<Self, serde_yaml::Error> { serde_yaml::from_slice(data) }

    /// The default configuration rendered as YAML.
    pub fn template_basic() -> Result<String, Error> {
        serde_yaml::to_string(&Self::default()).context(error::SerializeConfigSnafu)
    }
}
