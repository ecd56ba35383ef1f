use std::path::PathBuf;
use std::str::FromStr;

use tracing::Level;

use crate::error::{MalnadError, Result};
use crate::query::types::{DEFAULT_MAX_DISTANCE_KM, DEFAULT_MAX_PRICE, DEFAULT_PAGE_SIZE};

#[derive(Clone, Debug)]
pub struct Config {
    pub data_file: PathBuf,
    pub favorites_file: PathBuf,
    pub page_size: usize,
    pub default_max_price: u64,
    pub default_radius_km: f64,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/listings.json"),
            favorites_file: PathBuf::from("data/favorites.json"),
            page_size: DEFAULT_PAGE_SIZE,
            default_max_price: DEFAULT_MAX_PRICE,
            default_radius_km: DEFAULT_MAX_DISTANCE_KM,
            log_level: Level::INFO,
        }
    }
}

impl Config {
    /// Read `MALNAD_*` variables, loading `.env` first if present.
    /// A `.env` file that exists but cannot be parsed is an error.
    pub fn from_env() -> Result<Self> {
        load_dotenv(dotenvy::dotenv().map(|_| ()))?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            data_file: lookup("MALNAD_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            favorites_file: lookup("MALNAD_FAVORITES_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.favorites_file),
            page_size: get_config_value(&lookup, "MALNAD_PAGE_SIZE", defaults.page_size)?,
            default_max_price: get_config_value(
                &lookup,
                "MALNAD_DEFAULT_MAX_PRICE",
                defaults.default_max_price,
            )?,
            default_radius_km: get_config_value(
                &lookup,
                "MALNAD_DEFAULT_RADIUS_KM",
                defaults.default_radius_km,
            )?,
            log_level: get_config_value(&lookup, "MALNAD_LOG_LEVEL", defaults.log_level)?,
        };

        if config.page_size == 0 {
            return Err(MalnadError::invalid_argument("MALNAD_PAGE_SIZE must be at least 1"));
        }
        Ok(config)
    }
}

fn load_dotenv(outcome: std::result::Result<(), dotenvy::Error>) -> Result<()> {
    match outcome {
        Err(e) if !e.not_found() => Err(MalnadError::Config(format!("unreadable .env file: {e}"))),
        _ => Ok(()),
    }
}

fn get_config_value<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| MalnadError::invalid_argument(format!("{key} has invalid value '{raw}'"))),
    }
}
