use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::hos::limits::CycleRule;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            let path = Config::config_file();
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                println!("{}", content);
            } else {
                warning(format!("No config file at {:?}; using defaults.", path));
                println!("{}", serde_yaml::to_string(&Config::default()).unwrap());
            }
        }

        if *check {
            // The cycle string is the only field free-form enough to rot.
            CycleRule::from_code(&cfg.cycle)?;

            if cfg.retention_months == 0 {
                return Err(AppError::Config(
                    "retention_months must be at least 1".to_string(),
                ));
            }

            success("Configuration OK.");
        }
    }

    Ok(())
}
