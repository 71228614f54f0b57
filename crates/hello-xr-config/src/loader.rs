//! Configuration file lookup

use std::path::PathBuf;

use directories::ProjectDirs;

/// Environment variable naming a configuration file
pub const CONFIG_ENV: &str = "HELLO_XR_CONFIG";

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// `config.toml` in the platform configuration directory
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "hello-xr", "hello-xr")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Pick the configuration file to read.
///
/// Order: explicit path, `HELLO_XR_CONFIG`, the platform config dir. An
/// explicit or env-provided path is returned even if it does not exist so
/// the caller reports the error; the platform default is only used when
/// present.
pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path);
    }

    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Some(PathBuf::from(value));
        }
    }

    default_config_path().filter(|path| path.is_file())
}
