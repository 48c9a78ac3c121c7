//! Layered configuration: built-in defaults, then a JSON file, then
//! environment variables, then explicit overrides. Later layers win.

use crate::error::ReportError;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "https://musicanalytics.apple.com";
pub const DEFAULT_JWT_EXPIRE_SEC: u64 = 1200;
/// Longest token lifetime the API accepts.
pub const MAX_JWT_EXPIRE_SEC: u64 = 1200;

const ISSUER_ID: &str = "issuer_id";
const KEY_ID: &str = "key_id";
const PRIVKEY_PATH: &str = "privkey_path";
const API_BASE_URL: &str = "api_base_url";
const JWT_EXPIRE_SEC: &str = "jwt_expire_sec";

/// Identity used to sign API tokens.
#[derive(Clone)]
pub struct Credentials {
    pub issuer_id: String,
    pub key_id: String,
    pub private_key: Vec<u8>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("issuer_id", &self.issuer_id)
            .field("key_id", &self.key_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub jwt_expire_sec: u64,
    pub credentials: Credentials,
}

impl Settings {
    /// Load settings from `path` layered with the process environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        ConfigLoader::new()
            .with_file(path)?
            .with_env(std::env::vars_os().filter_map(|(key, value)| {
                Some((key.into_string().ok()?, value.into_string().ok()?))
            }))
            .build()
    }
}

/// Raw, not yet validated configuration values.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    issuer_id: Option<String>,
    key_id: Option<String>,
    privkey_path: Option<PathBuf>,
    api_base_url: Option<String>,
    jwt_expire_sec: Option<Value>,
}

#[derive(Debug)]
pub struct ConfigLoader {
    raw: RawConfig,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Start from the built-in defaults.
    pub fn new() -> Self {
        Self {
            raw: RawConfig {
                api_base_url: Some(DEFAULT_API_BASE_URL.to_string()),
                jwt_expire_sec: Some(Value::from(DEFAULT_JWT_EXPIRE_SEC)),
                ..RawConfig::default()
            },
        }
    }

    /// Merge values from a JSON config file.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ReportError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let file: RawConfig =
            serde_json::from_str(&contents).map_err(|source| ReportError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("Loaded configuration file {}", path.display());
        self.merge(file);
        Ok(self)
    }

    /// Merge values from environment variables named after the upper-cased keys.
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let value = value.into();
            match key.as_ref() {
                "ISSUER_ID" => self.raw.issuer_id = Some(value),
                "KEY_ID" => self.raw.key_id = Some(value),
                "PRIVKEY_PATH" => self.raw.privkey_path = Some(PathBuf::from(value)),
                "API_BASE_URL" => self.raw.api_base_url = Some(value),
                "JWT_EXPIRE_SEC" => self.raw.jwt_expire_sec = Some(Value::String(value)),
                _ => continue,
            }
            debug!("Configuration item {} taken from environment", key.as_ref());
        }
        self
    }

    pub fn issuer_id(mut self, issuer_id: impl Into<String>) -> Self {
        self.raw.issuer_id = Some(issuer_id.into());
        self
    }

    pub fn key_id(mut self, key_id: impl Into<String>) -> Self {
        self.raw.key_id = Some(key_id.into());
        self
    }

    pub fn privkey_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.raw.privkey_path = Some(path.into());
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.raw.api_base_url = Some(url.into());
        self
    }

    pub fn jwt_expire_sec(mut self, seconds: u64) -> Self {
        self.raw.jwt_expire_sec = Some(Value::from(seconds));
        self
    }

    /// Validate the merged values and read the private key.
    pub fn build(self) -> Result<Settings, ReportError> {
        let RawConfig {
            issuer_id,
            key_id,
            privkey_path,
            api_base_url,
            jwt_expire_sec,
        } = self.raw;

        let issuer_id = required(ISSUER_ID, issuer_id)?;
        let key_id = required(KEY_ID, key_id)?;
        let privkey_path = privkey_path
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ReportError::MissingField(PRIVKEY_PATH))?;
        let api_base_url = required(API_BASE_URL, api_base_url)?
            .trim_end_matches('/')
            .to_string();
        let jwt_expire_sec = parse_expiry(jwt_expire_sec)?;

        let private_key = fs::read(&privkey_path).map_err(|source| ReportError::KeyRead {
            path: privkey_path.clone(),
            source,
        })?;
        debug!("Read private key from {}", privkey_path.display());

        Ok(Settings {
            api_base_url,
            jwt_expire_sec,
            credentials: Credentials {
                issuer_id,
                key_id,
                private_key,
            },
        })
    }

    fn merge(&mut self, other: RawConfig) {
        let raw = &mut self.raw;
        if other.issuer_id.is_some() {
            raw.issuer_id = other.issuer_id;
        }
        if other.key_id.is_some() {
            raw.key_id = other.key_id;
        }
        if other.privkey_path.is_some() {
            raw.privkey_path = other.privkey_path;
        }
        if other.api_base_url.is_some() {
            raw.api_base_url = other.api_base_url;
        }
        if other.jwt_expire_sec.is_some() {
            raw.jwt_expire_sec = other.jwt_expire_sec;
        }
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ReportError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ReportError::MissingField(field))
}

fn parse_expiry(value: Option<Value>) -> Result<u64, ReportError> {
    let invalid = |reason: String| ReportError::InvalidField {
        field: JWT_EXPIRE_SEC,
        reason,
    };
    let seconds = match value {
        None | Some(Value::Null) => return Err(ReportError::MissingField(JWT_EXPIRE_SEC)),
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| invalid(format!("{n} is not a whole number of seconds")))?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| invalid(format!("{s:?} is not a whole number of seconds")))?,
        Some(other) => return Err(invalid(format!("unexpected value {other}"))),
    };
    if seconds == 0 || seconds > MAX_JWT_EXPIRE_SEC {
        return Err(invalid(format!(
            "must be between 1 and {MAX_JWT_EXPIRE_SEC}, got {seconds}"
        )));
    }
    Ok(seconds)
}
