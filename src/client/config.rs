//! Runtime configuration.
//!
//! Read from the environment (a `.env` file is honoured by the binary):
//!
//! - `RESERVE_USER_FILE`: JSON file with the booking user's details (default `./json/conf.json`)
//! - `RESERVE_TEMPLATE_FILE`: order template (default `./json/post_template.json`)
//! - `RESERVE_BASE_URL`: booking platform root
//! - `RESERVE_PRESET`: `weekly-best` or `exact-block`
//! - `RESERVE_RELEASE_HOUR`: local hour the slots open (default 20)
//! - `RESERVE_GROUNDS`: comma separated ground ids, in court number order
//! - `RESERVE_PREFERRED_START`: slot index that ends the run once booked, or `none` (default 4)
//! - `RESERVE_LOG_LEVEL`: default log filter when `RUST_LOG` is unset

use std::env;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_BASE_URL;
use crate::error::{BookingError, BookingResult};
use crate::ground::{self, Ground};
use crate::policy::Preset;

const DEFAULT_PREFERRED_START: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[allow(non_snake_case)]
pub struct ReserveInfo {
    pub studentNum: String,
    pub name: String,
    pub tel: String,
    pub id: String,
}

impl ReserveInfo {
    pub fn load<P: AsRef<Path>>(path: P) -> BookingResult<ReserveInfo> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[derive(Debug, Clone)]
pub struct ReserverConfig {
    pub user_file: PathBuf,
    pub template_file: PathBuf,
    pub base_url: String,
    pub preset: Preset,
    pub release_hour: u32,
    pub grounds: Vec<Ground>,
    pub preferred_start: Option<usize>,
    pub log_level: String,
}

impl ReserverConfig {
    pub fn from_env() -> BookingResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> BookingResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let user_file = lookup("RESERVE_USER_FILE").unwrap_or_else(|| "./json/conf.json".into());
        let template_file =
            lookup("RESERVE_TEMPLATE_FILE").unwrap_or_else(|| "./json/post_template.json".into());
        let base_url = lookup("RESERVE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());

        let preset = match lookup("RESERVE_PRESET") {
            Some(name) => name.parse()?,
            None => Preset::default(),
        };

        let release_hour = match lookup("RESERVE_RELEASE_HOUR") {
            Some(hour) => hour
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|h| *h < 24)
                .ok_or_else(|| BookingError::Config(format!("RESERVE_RELEASE_HOUR must be 0-23, got {:?}", hour)))?,
            None => 20,
        };

        let grounds = match lookup("RESERVE_GROUNDS") {
            Some(ids) => {
                let ids: Vec<String> = ids
                    .split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(String::from)
                    .collect();
                if ids.is_empty() {
                    return Err(BookingError::Config("RESERVE_GROUNDS is empty".into()));
                }
                ground::catalogue(ids)
            }
            None => ground::default_catalogue(),
        };

        let preferred_start = match lookup("RESERVE_PREFERRED_START").as_deref().map(str::trim) {
            None => Some(DEFAULT_PREFERRED_START),
            Some("none") => None,
            Some(index) => Some(index.parse::<usize>().map_err(|_| {
                BookingError::Config(format!("RESERVE_PREFERRED_START must be a slot index, got {:?}", index))
            })?),
        };

        let log_level = lookup("RESERVE_LOG_LEVEL").unwrap_or_else(|| "info".into());

        Ok(ReserverConfig {
            user_file: user_file.into(),
            template_file: template_file.into(),
            base_url,
            preset,
            release_hour,
            grounds,
            preferred_start,
            log_level,
        })
    }

    pub fn reserve_info(&self) -> BookingResult<ReserveInfo> {
        ReserveInfo::load(&self.user_file)
    }
}
