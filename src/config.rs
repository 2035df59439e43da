// Config module: reads the API URL and credentials from a small INI file.
// On first run the file does not exist yet, so it is written with
// placeholder values that the user is expected to edit by hand.

use std::path::{Path, PathBuf};

use ini::Ini;
use tracing::info;

use crate::error::ConfigError;

/// File name used when `CHALLENGE_CONFIG` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "config.ini";

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "CHALLENGE_CONFIG";

const SECTION: &str = "DEFAULT";

pub const PLACEHOLDER_URL: &str = "CHANGE TO API ENDPOINT";
pub const PLACEHOLDER_EMAIL: &str = "CHANGE TO NTNU STUDENT MAIL";
pub const PLACEHOLDER_PHONE: &str = "CHANGE TO PHONE NUMBER";

/// Settings needed for one run: where the server lives and who we are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub email: String,
    pub phone: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: PLACEHOLDER_URL.into(),
            email: PLACEHOLDER_EMAIL.into(),
            phone: PLACEHOLDER_PHONE.into(),
        }
    }
}

impl Config {
    /// Path from `CHALLENGE_CONFIG`, or `config.ini` in the working directory.
    pub fn path_from_env() -> PathBuf {
        std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Read the config at `path`, writing a placeholder file first if there
    /// is none. Keys missing from an existing file keep their placeholder.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            let config = Config::default();
            config.write(path)?;
            info!("wrote placeholder config to {}", path.display());
            return Ok(config);
        }

        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_ini(&ini))
    }

    fn from_ini(ini: &Ini) -> Self {
        let lookup = |key: &str, fallback: &str| -> String {
            ini.section(Some(SECTION))
                .and_then(|s| s.get(key))
                .or_else(|| ini.general_section().get(key))
                .unwrap_or(fallback)
                .trim()
                .to_string()
        };
        Config {
            api_url: lookup("url", PLACEHOLDER_URL),
            email: lookup("email", PLACEHOLDER_EMAIL),
            phone: lookup("phone", PLACEHOLDER_PHONE),
        }
    }

    fn write(&self, path: &Path) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        ini.with_section(Some(SECTION))
            .set("url", self.api_url.as_str())
            .set("email", self.email.as_str())
            .set("phone", self.phone.as_str());
        ini.write_to_file(path).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// True while any value still holds the text written on first run.
    pub fn is_placeholder(&self) -> bool {
        self.api_url == PLACEHOLDER_URL
            || self.email == PLACEHOLDER_EMAIL
            || self.phone == PLACEHOLDER_PHONE
    }
}
