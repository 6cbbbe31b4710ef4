use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::schema::SiftConfig;

/// Loads the Sift configuration from disk once at startup.
#[derive(Debug)]
pub struct ConfigLoader {
    config: SiftConfig,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > SIFT_CONFIG env > ~/.sift/sift.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("SIFT_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sift")
            .join("sift.toml")
    }

    /// Load the config from disk, falling back to defaults.
    pub fn load(path: Option<&Path>) -> sift_core::Result<Self> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            toml::from_str::<SiftConfig>(&raw).map_err(|e| {
                sift_core::SiftError::Config(format!(
                    "failed to parse {}: {}",
                    config_path.display(),
                    e
                ))
            })?
        } else {
            warn!(?config_path, "config file not found, using defaults");
            SiftConfig::default()
        };

        let config = Self::apply_env_overrides(config);

        // Validate — log warnings, fail on errors
        match config.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
            }
            Err(e) => {
                return Err(sift_core::SiftError::Config(e));
            }
        }

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Snapshot of the loaded config.
    pub fn get(&self) -> SiftConfig {
        self.config.clone()
    }

    /// Path the config was loaded from (or would have been).
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Apply env var overrides (SIFT_LLM_MODEL, SIFT_LOG_LEVEL, ...).
    fn apply_env_overrides(mut config: SiftConfig) -> SiftConfig {
        if let Ok(v) = std::env::var("SIFT_LLM_MODEL") {
            config.llm.model = v;
        }
        if let Ok(v) = std::env::var("SIFT_LLM_BASE_URL") {
            config.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("SIFT_LOG_LEVEL") {
            config.logging.level = v;
        }
        if let Ok(v) = std::env::var("SIFT_MAX_RETRIES")
            && let Ok(n) = v.parse::<u32>()
        {
            config.agent.max_retries = n;
        }
        // API key: config file takes priority, env is the fallback.
        if config.llm.api_key.is_none()
            && let Ok(v) = std::env::var("OPENAI_API_KEY")
        {
            config.llm.api_key = Some(v);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[retrieval]\nk = 3\n\n[agent]\nmax_retries = 1\n"
        )
        .unwrap();

        let loader = ConfigLoader::load(Some(file.path())).unwrap();
        let config = loader.get();
        assert_eq!(config.retrieval.k, 3);
        assert_eq!(config.agent.max_retries, 1);
        assert_eq!(loader.path(), file.path());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(loader.get().retrieval.k, 8);
        assert_eq!(loader.get().agent.max_retries, 2);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[retrieval]\nk = 0\n").unwrap();
        assert!(ConfigLoader::load(Some(file.path())).is_err());
    }

    #[test]
    fn unparsable_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml {{").unwrap();
        let err = ConfigLoader::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, sift_core::SiftError::Config(_)));
    }
}
