use crate::flows::GeminiSettings;
use crate::sources::SheetQuery;
use crate::swipe::GestureThresholds;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;

/// Runtime configuration, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Sheet to read listings from; the mock catalogue is used when unset
    pub sheet: Option<SheetQuery>,
    pub cache_ttl_secs: i64,
    pub gemini: Option<GeminiSettings>,
    /// Directory for the interest store
    pub data_dir: PathBuf,
    pub thresholds: GestureThresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet: None,
            cache_ttl_secs: 300,
            gemini: None,
            data_dir: default_data_dir(),
            thresholds: GestureThresholds::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(sheet_id) = get("SHEET_ID") {
            let mut query = SheetQuery {
                sheet_id,
                api_key: get("SHEETS_API_KEY"),
                ..Default::default()
            };
            if let Some(tab) = get("SHEET_TAB") {
                query.tab = tab;
            }
            if let Some(size) = get("SHEET_PAGE_SIZE") {
                query.page_size = parse("SHEET_PAGE_SIZE", &size)?;
                if query.page_size == 0 {
                    bail!("SHEET_PAGE_SIZE must be greater than zero");
                }
            }
            config.sheet = Some(query);
        }

        if let Some(ttl) = get("SHEET_CACHE_TTL_SECS") {
            config.cache_ttl_secs = parse("SHEET_CACHE_TTL_SECS", &ttl)?;
            if config.cache_ttl_secs < 0 {
                bail!("SHEET_CACHE_TTL_SECS must not be negative");
            }
        }

        if let Some(api_key) = get("GEMINI_API_KEY") {
            let mut settings = GeminiSettings::new(api_key);
            if let Some(model) = get("GEMINI_MODEL") {
                settings.model = model;
            }
            config.gemini = Some(settings);
        }

        if let Some(dir) = get("RENTAL_SCOUT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(value) = get("SWIPE_CONFIDENCE_THRESHOLD") {
            config.thresholds.confidence = parse("SWIPE_CONFIDENCE_THRESHOLD", &value)?;
        }
        if let Some(value) = get("SWIPE_OFFSET_THRESHOLD") {
            config.thresholds.offset = parse("SWIPE_OFFSET_THRESHOLD", &value)?;
        }

        Ok(config)
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid value for {}: {:?}", key, value))
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rental-scout")
}
