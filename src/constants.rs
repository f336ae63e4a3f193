//! Shared constants: config discovery and the process exit-code contract.

/// Environment variable overriding the config file location
pub const GMH_CONFIG_ENV: &str = "GMH_CLI_CONFIG";

/// Config file path relative to the user config directory
pub const GMH_CONFIG_FILE: &str = "gmh/config.yaml";

// Exit codes are part of the scripting interface and must stay stable.

/// Operation (or entire batch) completed without a fatal error
pub const EXIT_OK: i32 = 0;
/// The remote call failed
pub const EXIT_REMOTE_ERROR: i32 = 1;
/// Caller/input error; no remote state was touched
pub const EXIT_USAGE: i32 = 2;
/// Batch processing was interrupted mid-run
pub const EXIT_INTERRUPTED: i32 = 3;
