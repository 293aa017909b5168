pub mod init;
mod schema;

pub use schema::{Config, ThemeMode};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/cogscore/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("cogscore"))
}

/// Get the default config file path (~/.config/cogscore/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/cogscore/config.yaml)
///
/// A missing file yields the built-in defaults; the tool works without any config.
///
/// # Errors
///
/// Returns an error if:
/// - The config file exists but cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let mut config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    config.sample_data = config.sample_data.map(|p| expand_home(&p));

    Ok(config)
}

/// Replace a leading `~` with the home directory.
///
/// Paths without one, and `~user` forms, are returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Save configuration as YAML, atomically replacing any existing file.
///
/// Creates parent directories as needed.
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit().context("Failed to save config")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::InputOverrides;
    use std::env;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir()
            .join(format!("cogscore-config-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_config_yields_defaults() {
        let path = temp_path("does-not-exist.yaml");
        let config = load_config(Some(path)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let path = temp_path("saved.yaml");
        let config = Config {
            defaults: Some(InputOverrides {
                age: Some(44),
                ..Default::default()
            }),
            sample_data: None,
            theme: ThemeMode::Light,
        };

        save_config(&path, &config).unwrap();
        let loaded = load_config(Some(path.clone())).unwrap();
        assert_eq!(loaded, config);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let path = temp_path("invalid.yaml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "defaults: [not, a, map").unwrap();

        let result = load_config(Some(path.clone()));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid YAML"));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_expand_home() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_home(Path::new("~/data/subset.csv")), home.join("data/subset.csv"));
        assert_eq!(expand_home(Path::new("~")), home);
        assert_eq!(expand_home(Path::new("/tmp/subset.csv")), PathBuf::from("/tmp/subset.csv"));
        assert_eq!(expand_home(Path::new("data/~/x.csv")), PathBuf::from("data/~/x.csv"));
    }

    #[test]
    fn test_sample_path_with_tilde_is_expanded_on_load() {
        let path = temp_path("tilde.yaml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "sample_data: ~/cognitive_subset.csv\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        let sample = config.sample_data.unwrap();
        assert!(sample.is_absolute());
        assert_eq!(sample, dirs::home_dir().unwrap().join("cognitive_subset.csv"));

        fs::remove_file(&path).ok();
    }
}
