use core::fmt::{Debug, Display};
use core::num::NonZeroU32;
use std::borrow::Cow;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "seats.toml";
pub const ENV_PREFIX: &str = "SEATS_";

/// How many individuals a single seat holds unless configured otherwise.
pub const DEFAULT_SEAT_CAPACITY: NonZeroU32 = match NonZeroU32::new(2) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

#[derive(Serialize)]
struct Defaults {
    seat_capacity: NonZeroU32,
}

#[derive(Deserialize, Clone)]
pub struct Config {
    pub database_url: String,
    /// Applied uniformly to every seat name found in the submitted preferences.
    pub seat_capacity: NonZeroU32,
    pub operator_password: String,
}

/// `url` with the userinfo of its authority, if any, masked.
fn redact_credentials(url: &str) -> Cow<'_, str> {
    let Some((scheme, rest)) = url.split_once("://") else {
        return Cow::Borrowed(url);
    };
    let authority = &rest[..rest.find(['/', '?', '#']).unwrap_or(rest.len())];
    match authority.rfind('@') {
        Some(at) => Cow::Owned(format!("{scheme}://***{}", &rest[at..])),
        None => Cow::Borrowed(url),
    }
}

// keep passwords out of logs
impl Debug for Config {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &redact_credentials(&self.database_url))
            .field("seat_capacity", &self.seat_capacity)
            .finish_non_exhaustive()
    }
}

#[derive(thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Extract(#[from] figment::Error),
}

impl Debug for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(self, f)
    }
}

#[must_use]
pub fn figment() -> Figment {
    Figment::from(Serialized::defaults(Defaults {
        seat_capacity: DEFAULT_SEAT_CAPACITY,
    }))
    .merge(Toml::file(CONFIG_FILE))
    .merge(Env::prefixed(ENV_PREFIX))
}

pub fn get_config() -> Result<Config, ConfigError> {
    Ok(figment().extract()?)
}
