//! Loading `NavigatorConfig` from the environment, files, or inline JSON.

use anyhow::{Context, anyhow};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::models::NavigatorConfig;

/// Environment variable naming a TOML or JSON config file.
pub const CONFIG_PATH_ENV: &str = "SECTIONFLOW_CONFIG_PATH";
/// Environment variable carrying an inline JSON config.
pub const CONFIG_JSON_ENV: &str = "SECTIONFLOW_CONFIG_JSON";

const DEFAULT_CANDIDATES: &[&str] = &[
    "sectionflow.toml",
    "sectionflow.json",
    "config/sectionflow.toml",
    "config/sectionflow.json",
];

/// Source that produced the navigator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// A validated configuration together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLoad {
    pub config: NavigatorConfig,
    pub source: ConfigSource,
}

impl NavigatorConfig {
    /// Resolve the stage configuration from the environment.
    ///
    /// Evaluation order:
    /// 1) `$SECTIONFLOW_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$SECTIONFLOW_CONFIG_JSON` (inline JSON),
    /// 3) the first existing default file in the working directory,
    /// 4) defaults if none of the above is present.
    ///
    /// Whatever wins must pass [`NavigatorConfig::validate`]; a config the
    /// controller would refuse to build with is a load error.
    pub fn load_from_env() -> anyhow::Result<ConfigLoad> {
        let (config, source) = Self::resolve_env()?;
        config.validate().with_context(|| {
            format!("navigator config from {source:?} rejected")
        })?;
        tracing::debug!(?source, "navigator config resolved");
        Ok(ConfigLoad { config, source })
    }

    fn resolve_env() -> anyhow::Result<(Self, ConfigSource)> {
        if let Ok(path_str) = env::var(CONFIG_PATH_ENV)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::read_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Ok(raw) = env::var(CONFIG_JSON_ENV)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_ENV}"))?;
            return Ok((parsed, ConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file(Path::new(".")) {
            let config = Self::read_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        tracing::debug!("no navigator config found, using defaults");
        Ok((Self::default(), ConfigSource::Default))
    }

    /// Read and validate an explicit config file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<ConfigLoad> {
        let config = Self::read_file(path)?;
        config.validate().with_context(|| {
            format!("navigator config {} rejected", path.display())
        })?;
        Ok(ConfigLoad {
            config,
            source: ConfigSource::File(path.to_path_buf()),
        })
    }

    fn read_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read navigator config from {}", path.display())
        })?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents).with_context(|| {
                format!("invalid navigator config {}", path.display())
            })?,
            Some("toml") | Some("tml") => {
                toml::from_str(&contents).map_err(|err| {
                    anyhow!(
                        "invalid navigator config {}: {}",
                        path.display(),
                        err
                    )
                })?
            }
            _ => {
                Self::parse_from_str(&contents, &path.display().to_string())?
            }
        };

        tracing::debug!(path = %path.display(), "read navigator config");
        Ok(config)
    }

    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> anyhow::Result<Self> {
        // Try TOML first, then JSON for convenience.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse navigator config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| anyhow!("invalid navigator config json: {err}"))
    }

    /// First default config file that exists under `root`.
    pub fn find_default_file(root: &Path) -> Option<PathBuf> {
        DEFAULT_CANDIDATES
            .iter()
            .map(|candidate| root.join(candidate))
            .find(|path| path.exists())
    }
}
