use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file for pipehand.
///
/// Everything here is optional; CLI flags and environment variables take
/// precedence. Loaded from `./pipehand.toml` or the user config directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// AWS named profile used to establish the session
    pub profile: Option<String>,

    /// AWS region override; falls back to the SDK's default resolution
    pub region: Option<String>,
}

impl Config {
    /// Load configuration, trying in order:
    /// 1. The explicitly specified path
    /// 2. ./pipehand.toml
    /// 3. <user config dir>/pipehand/config.toml
    ///
    /// Returns defaults if no file is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        for candidate in Self::candidates() {
            if candidate.exists() {
                return Self::load_from_path(&candidate);
            }
        }

        Ok(Self::default())
    }

    fn candidates() -> Vec<PathBuf> {
        let mut candidates = vec![PathBuf::from("pipehand.toml")];
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("pipehand").join("config.toml"));
        }
        candidates
    }

    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.profile.is_none());
        assert!(config.region.is_none());
    }

    #[test]
    fn test_load_toml_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"
profile = "deployments"
region = "ap-southeast-2"
"#
        )
        .unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.profile, Some("deployments".to_string()));
        assert_eq!(config.region, Some("ap-southeast-2".to_string()));
    }

    #[test]
    fn test_load_partial_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "profile = \"sandbox\"\n").unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.profile, Some("sandbox".to_string()));
        assert!(config.region.is_none());
    }

    #[test]
    fn test_load_nonexistent_explicit_path_fails() {
        assert!(Config::load(Some(Path::new("nonexistent.toml"))).is_err());
    }

    #[test]
    fn test_load_malformed_config_fails() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "profile = [not toml").unwrap();

        assert!(Config::load_from_path(temp_file.path()).is_err());
    }
}
