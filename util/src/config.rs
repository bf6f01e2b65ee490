//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub storage_root: String,
    /// Explicit answers dictionary location. Empty means "search the default candidates".
    pub answers_dictionary_path: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every variable has a default, so loading never fails.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "marker=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "logs/marker.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            storage_root: env::var("STORAGE_ROOT").unwrap_or_else(|_| "data".into()),
            answers_dictionary_path: env::var("ANSWERS_DICTIONARY_PATH").unwrap_or_default(),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock
                .write()
                .expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_file(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_file = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_storage_root(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.storage_root = value.into());
    }

    pub fn set_answers_dictionary_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.answers_dictionary_path = value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults_when_env_is_unset() {
        unsafe {
            env::remove_var("LOG_LEVEL");
            env::remove_var("STORAGE_ROOT");
            env::remove_var("ANSWERS_DICTIONARY_PATH");
        }
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.log_level, "marker=info");
        assert_eq!(cfg.storage_root, "data");
        assert!(cfg.answers_dictionary_path.is_empty());
        assert!(!cfg.log_to_stdout);
    }

    #[test]
    #[serial]
    fn test_storage_settings_follow_env() {
        unsafe {
            env::set_var("STORAGE_ROOT", "/srv/kursbuch");
            env::set_var("ANSWERS_DICTIONARY_PATH", "/srv/kursbuch/answers.json");
        }
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.storage_root, "/srv/kursbuch");
        assert_eq!(cfg.answers_dictionary_path, "/srv/kursbuch/answers.json");

        unsafe {
            env::remove_var("STORAGE_ROOT");
            env::remove_var("ANSWERS_DICTIONARY_PATH");
        }
    }

    #[test]
    #[serial]
    fn test_setters_override_and_reset_restores() {
        unsafe {
            env::set_var("LOG_LEVEL", "marker=debug");
        }
        AppConfig::reset();
        AppConfig::set_log_level("marker=trace");
        assert_eq!(AppConfig::global().log_level, "marker=trace");

        AppConfig::reset();
        assert_eq!(AppConfig::global().log_level, "marker=debug");

        unsafe {
            env::remove_var("LOG_LEVEL");
        }
        AppConfig::reset();
    }
}
