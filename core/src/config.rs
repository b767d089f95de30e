use std::path::PathBuf;

use anyhow::{anyhow, Result};
use mockable::Env;

pub const DATA_DIR_ENV: &str = "HOBBYWEEK_DIR";
pub const TIMEZONE_ENV: &str = "HOBBYWEEK_TZ";
pub const SYSTEM_TIMEZONE_ENV: &str = "TZ";
pub const DEFAULT_TIMEZONE: &str = "UTC";

const DEFAULT_DIR_NAME: &str = ".hobbyweek";

/// Where the store lives and which timezone slots are projected in.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_dir: PathBuf,
    /// IANA name, resolved by the service; an unknown name falls back to UTC.
    pub timezone: String,
}

impl Settings {
    /// Explicit values win over the environment, which wins over defaults.
    pub fn resolve<E: Env>(
        env: &E,
        data_dir: Option<PathBuf>,
        timezone: Option<String>,
    ) -> Result<Self> {
        let data_dir = match data_dir.or_else(|| non_empty(env.string(DATA_DIR_ENV)).map(PathBuf::from)) {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(DEFAULT_DIR_NAME)
            }
        };

        let timezone = timezone
            .or_else(|| non_empty(env.string(TIMEZONE_ENV)))
            .or_else(|| non_empty(env.string(SYSTEM_TIMEZONE_ENV)))
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());

        Ok(Self { data_dir, timezone })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
