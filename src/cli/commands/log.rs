use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Print rows from the internal log table.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd
        && *print
    {
        let pool = DbPool::new(&cfg.database)?;
        crate::db::initialize::init_db(&pool.conn)?;

        let rows = load_log(&pool.conn)?;
        if rows.is_empty() {
            println!("Log is empty.");
            return Ok(());
        }

        for (date, operation, target, message) in rows {
            println!("{}  {:<10} {:<8} {}", date, operation, target, message);
        }
    }

    Ok(())
}
