use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::load_log;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREY, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd
        && *print
    {
        let mut pool = DbPool::new(&cfg.database)?;
        let rows = load_log(&mut pool)?;

        if rows.is_empty() {
            println!("Audit log is empty.");
            return Ok(());
        }

        for (date, operation, message) in rows {
            println!(
                "{}{}{} {}[{}]{} {}",
                GREY, date, RESET, CYAN, operation, RESET, message
            );
        }
    }

    Ok(())
}
