use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds a value that fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files; useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds a value that fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup, with no `set_var`/`remove_var`
/// involved.
///
/// Every variable is optional; the defaults produce a working configuration
/// for a live run against the real site.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let output_dir = PathBuf::from(or_default("ASINSNAP_OUTPUT_DIR", "new_data"));
    let base_url = or_default("ASINSNAP_BASE_URL", "https://www.amazon.com");
    let workers = parse_usize("ASINSNAP_WORKERS", "0")?;
    let log_level = or_default("ASINSNAP_LOG_LEVEL", "info");

    Ok(AppConfig {
        output_dir,
        base_url,
        workers,
        log_level,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_with_empty_environment() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should parse");
        assert_eq!(cfg.output_dir, PathBuf::from("new_data"));
        assert_eq!(cfg.base_url, "https://www.amazon.com");
        assert_eq!(cfg.workers, 0);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn build_app_config_output_dir_override() {
        let mut map = HashMap::new();
        map.insert("ASINSNAP_OUTPUT_DIR", "/tmp/snapshots");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/snapshots"));
    }

    #[test]
    fn build_app_config_base_url_override() {
        let mut map = HashMap::new();
        map.insert("ASINSNAP_BASE_URL", "http://127.0.0.1:9999");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn build_app_config_workers_override() {
        let mut map = HashMap::new();
        map.insert("ASINSNAP_WORKERS", "8");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.workers, 8);
    }

    #[test]
    fn build_app_config_workers_invalid() {
        let mut map = HashMap::new();
        map.insert("ASINSNAP_WORKERS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ASINSNAP_WORKERS"),
            "expected InvalidEnvVar(ASINSNAP_WORKERS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_log_level_override() {
        let mut map = HashMap::new();
        map.insert("ASINSNAP_LOG_LEVEL", "debug");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, "debug");
    }
}
