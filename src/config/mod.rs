use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Path of the SQLite item store.
    pub database: String,
    /// Path of the widget preferences file (the binding key space).
    #[serde(default = "default_prefs_path")]
    pub widget_prefs: String,
}

fn default_prefs_path() -> String {
    Config::prefs_file().to_string_lossy().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            widget_prefs: default_prefs_path(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform.
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("timeflow")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".timeflow")
        }
    }

    /// Return the full path of the config file.
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("timeflow.conf")
    }

    /// Return the full path of the SQLite database.
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("timeflow.sqlite")
    }

    /// Return the full path of the widget preferences file.
    pub fn prefs_file() -> PathBuf {
        Self::config_dir().join("widgets.json")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).expect("❌ Failed to read configuration file");
            serde_yaml::from_str(&content).expect("❌ Failed to parse configuration file")
        } else {
            Self::default()
        }
    }

    /// Initialize configuration, database, and preferences files.
    pub fn init_all(
        custom_db: Option<String>,
        custom_prefs: Option<String>,
        is_test: bool,
    ) -> io::Result<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let resolve = |name: String, default: PathBuf| {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else if name.is_empty() {
                default
            } else {
                dir.join(p)
            }
        };

        let db_path = match custom_db {
            Some(name) => resolve(name, Self::database_file()),
            None => Self::database_file(),
        };
        let prefs_path = match custom_prefs {
            Some(name) => resolve(name, Self::prefs_file()),
            None => Self::prefs_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            widget_prefs: prefs_path.to_string_lossy().to_string(),
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }

    /// Report missing or empty fields; returns true when the config is sound.
    pub fn check(&self) -> bool {
        let mut ok = true;
        if self.database.trim().is_empty() {
            println!("Missing field: database");
            ok = false;
        }
        if self.widget_prefs.trim().is_empty() {
            println!("Missing field: widget_prefs");
            ok = false;
        }
        ok
    }
}
