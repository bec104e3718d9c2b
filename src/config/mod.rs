use crate::core::calendar::DayRules;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data_dir: String,
    pub database: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: u32,
    /// Dates that never count as working days when bridging a streak.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
    #[serde(default = "default_clear_screen")]
    pub clear_screen: bool,
    #[serde(default = "default_heatmap_weeks")]
    pub heatmap_weeks: u32,
}

fn default_timezone() -> String {
    "Europe/Oslo".to_string()
}
fn default_day_start_hour() -> u32 {
    5
}
fn default_clear_screen() -> bool {
    true
}
fn default_heatmap_weeks() -> u32 {
    8
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = Self::config_dir();
        Self {
            data_dir: data_dir.to_string_lossy().to_string(),
            database: data_dir.join("rsal.sqlite").to_string_lossy().to_string(),
            timezone: default_timezone(),
            day_start_hour: default_day_start_hour(),
            holidays: Vec::new(),
            clear_screen: default_clear_screen(),
            heatmap_weeks: default_heatmap_weeks(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.rsal`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rsal")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rsal.conf")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Relocate all data (including the internal log database) under `dir`.
    pub fn use_data_dir(&mut self, dir: &str) {
        let root = expand_tilde(dir);
        self.database = root.join("rsal.sqlite").to_string_lossy().to_string();
        self.data_dir = root.to_string_lossy().to_string();
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.day_start_hour > 23 {
            return Err(AppError::Config(format!(
                "day_start_hour must be between 0 and 23, got {}",
                self.day_start_hour
            )));
        }
        self.tz()?;
        Ok(())
    }

    pub fn tz(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| AppError::Config(format!("unknown timezone '{}': {}", self.timezone, e)))
    }

    /// Day attribution rules derived from the configuration.
    pub fn day_rules(&self) -> AppResult<DayRules> {
        self.validate()?;
        Ok(DayRules::new(
            self.tz()?,
            self.day_start_hour,
            self.holidays.iter().copied(),
        ))
    }

    pub fn data_root(&self) -> PathBuf {
        expand_tilde(&self.data_dir)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_root().join("logs")
    }

    pub fn users_file(&self) -> PathBuf {
        self.data_root().join("users.json")
    }

    pub fn attendance_dir(&self) -> PathBuf {
        self.data_root().join("attendance")
    }

    /// Initialize configuration file and data directories
    pub fn init_all(&self, is_test: bool) -> AppResult<()> {
        fs::create_dir_all(self.logs_dir())?;
        fs::create_dir_all(self.attendance_dir())?;

        if !is_test {
            fs::create_dir_all(Self::config_dir())?;
            let yaml = serde_yaml::to_string(self)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        println!("✅ Data dir:    {:?}", self.data_root());

        Ok(())
    }
}
