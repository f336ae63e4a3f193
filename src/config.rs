//! Configuration management for the GMH CLI
//!
//! The CLI reads a single YAML config file naming the GMH service endpoint
//! and how to authenticate against it. The file is looked up at
//! `~/.config/gmh/config.yaml`, or the path given in the `GMH_CLI_CONFIG`
//! environment variable.
//!
//! ## Environment Variable Expansion
//!
//! Config files support environment variable expansion with the following syntax:
//! - `${VAR}` - Simple substitution
//! - `${VAR:-default}` - Use default if VAR is unset or empty
//! - `${VAR-default}` - Use default if VAR is unset
//! - `${VAR:+alt}` - Use alt if VAR is set and non-empty
//! - `${VAR+alt}` - Use alt if VAR is set

use anyhow::Context;
use regex::Regex;
use std::path::Path;
use std::{env, fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{GMH_CONFIG_ENV, GMH_CONFIG_FILE};

/// Top-level configuration loaded from `config.yaml`
///
/// # Example
///
/// ```yaml
/// gmh:
///   url: https://resolver.example.org/gmh-registration/v1
///   auth:
///     type: bearer
///     tokenEnv: GMH_TOKEN
/// ```
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Connection details for the GMH service
    pub gmh: GmhConfig,
}

/// GMH service connection details
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GmhConfig {
    /// Base URL of the GMH registration API
    pub url: String,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Authentication configuration for GMH service access
///
/// Credentials are always sourced from environment variables so the config
/// file itself can be committed or shared. `none` is the state of a fresh
/// install: the `token` command works unauthenticated and yields the bearer
/// token for subsequent calls.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
#[serde(tag = "type")]
#[derive(Default)]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,
    /// HTTP Basic authentication
    Basic {
        /// Username for basic auth
        username: String,
        /// Environment variable containing the password
        password_env: String,
    },
    /// Token authentication (raw Authorization header)
    Token {
        /// Environment variable containing the token
        token_env: String,
    },
    /// Bearer token authentication (Authorization header)
    Bearer {
        /// Environment variable containing the bearer token
        token_env: String,
    },
}

/// Resolve the config file path: `GMH_CLI_CONFIG` wins over the default
/// location under the user config directory.
pub fn config_path() -> PathBuf {
    env::var(GMH_CONFIG_ENV).map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push(GMH_CONFIG_FILE);
        p
    })
}

pub fn load_config() -> anyhow::Result<Config> {
    let path = config_path();
    log::debug!("loading config from {}", path.display());
    let preprocessed_data = preprocess_config(&path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    let cfg: Config = serde_yaml::from_str(&preprocessed_data)
        .with_context(|| format!("parsing config from {}", path.display()))?;
    Ok(cfg)
}

pub fn expand_env_placeholders(input: &str) -> String {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?:(:?[-+])([^}]*))?\}").unwrap();
    re.replace_all(input, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let op = caps.get(2).map_or("", |m| m.as_str());
        let val = caps.get(3).map_or("", |m| m.as_str());
        let var = env::var(var_name).ok();

        match (var.as_deref(), op) {
            (Some(v), _) if op.is_empty() => v.to_string(), // ${VAR}
            (Some(v), ":-") if !v.is_empty() => v.to_string(), // ${VAR:-default}
            (None, ":-") => val.to_string(),
            (Some(v), "-") => {
                if v.is_empty() {
                    val.to_string()
                } else {
                    v.to_string()
                }
            } // ${VAR-default}
            (None, "-") => val.to_string(),
            (Some(v), ":+") if !v.is_empty() => val.to_string(), // ${VAR:+alt}
            (Some(_), "+") => val.to_string(),                   // ${VAR+alt}
            _ => "".to_string(),
        }
    })
    .to_string()
}

pub fn preprocess_config(path: &Path) -> anyhow::Result<String> {
    let raw_data = fs::read_to_string(path)?;
    Ok(expand_env_placeholders(&raw_data))
}
