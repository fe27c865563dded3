use common::constants::{APP_DIR_NAME, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL};
use common::errors::ConfigError;
use common::logger::LogLevel;
use std::env;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: street-food-explorer [--storage-dir <path>] [--model <name>] \
[--endpoint <url>] [--log-level info|warn|error|off]

Environment:
  GEMINI_API_KEY           assistant API key (without it the assistant is offline)
  GEMINI_MODEL             same as --model
  GEMINI_ENDPOINT          same as --endpoint
  STREET_FOOD_STORAGE_DIR  same as --storage-dir
  STREET_FOOD_LOG          same as --log-level";

/// Runtime settings. Flags win over environment variables, which win over
/// the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub storage_dir: PathBuf,
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub log_level: LogLevel,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::parse(env::args().skip(1), |key| env::var(key).ok())
    }

    pub fn parse<I, F>(args: I, lookup: F) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut storage_dir = lookup("STREET_FOOD_STORAGE_DIR").map(PathBuf::from);
        let mut model = lookup("GEMINI_MODEL");
        let mut endpoint = lookup("GEMINI_ENDPOINT");
        let mut log_level = lookup("STREET_FOOD_LOG");

        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let slot = match flag.as_str() {
                "--storage-dir" => {
                    storage_dir = Some(PathBuf::from(required(&flag, args.next())?));
                    continue;
                }
                "--model" => &mut model,
                "--endpoint" => &mut endpoint,
                "--log-level" => &mut log_level,
                _ => return Err(ConfigError::UnknownFlag(flag)),
            };
            *slot = Some(required(&flag, args.next())?);
        }

        let log_level = match log_level {
            Some(raw) => raw.parse::<LogLevel>().map_err(|reason| ConfigError::InvalidValue {
                flag: "--log-level".to_string(),
                reason,
            })?,
            None => LogLevel::Info,
        };

        Ok(Self {
            storage_dir: storage_dir.unwrap_or_else(default_storage_dir),
            api_key: lookup("GEMINI_API_KEY"),
            model: model.unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
            log_level,
        })
    }
}

fn required(flag: &str, value: Option<String>) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.starts_with("--"))
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
}

pub fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}
