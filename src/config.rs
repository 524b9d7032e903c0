use crate::error::{KarteError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 顧客CSVのファイル名
pub const CUSTOMER_FILE: &str = "customers.csv";
/// 来店履歴CSVのファイル名
pub const VISIT_FILE: &str = "visits.csv";
/// 写真保存フォルダ名
pub const PHOTO_DIR: &str = "photos";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// customers.csv / visits.csv / photos/ を置くフォルダ
    pub data_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| KarteError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("salon-karte").join("config.json"))
    }

    pub fn customers_path(&self) -> PathBuf {
        self.data_dir.join(CUSTOMER_FILE)
    }

    pub fn visits_path(&self) -> PathBuf {
        self.data_dir.join(VISIT_FILE)
    }

    pub fn photos_dir(&self) -> PathBuf {
        self.data_dir.join(PHOTO_DIR)
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.data_dir = dir;
        self.save()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
        }
    }
}
