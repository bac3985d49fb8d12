pub mod backup;
pub mod change;
pub mod config;
pub mod correct;
pub mod db;
pub mod export;
pub mod ingest;
pub mod init;
pub mod list;
pub mod log;
pub mod status;

use crate::errors::{AppError, AppResult};

/// A driver comes from the command line or from `default_driver` in the
/// config file.
pub fn resolve_driver(arg: Option<&str>, cfg: &crate::config::Config) -> AppResult<String> {
    arg.map(str::to_string)
        .or_else(|| cfg.default_driver.clone())
        .ok_or_else(|| {
            AppError::Config(
                "No driver given and no default_driver configured".to_string(),
            )
        })
}
