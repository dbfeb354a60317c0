use crate::profile::Difficulty;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub difficulty: String,
    pub pool_size: usize,
    pub words_file: Option<String>,
    pub hints: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: "medium".to_string(),
            pool_size: crate::round::DEFAULT_POOL_SIZE,
            words_file: None,
            hints: false,
        }
    }
}

impl Config {
    /// Difficulty as an enum; unknown names fall back to medium rather
    /// than failing, so a hand-edited config cannot brick startup.
    pub fn difficulty_level(&self) -> Difficulty {
        Difficulty::from_name(&self.difficulty).unwrap_or(Difficulty::Medium)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "jumbl") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("jumbl_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
