use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Initialize configuration, database schema, and widget preferences.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.prefs.clone(), cli.test)?;

    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;

    // Empty preferences file so widget configuration starts from a known state.
    let prefs = std::path::Path::new(&cfg.widget_prefs);
    if !prefs.exists() {
        if let Some(parent) = prefs.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(prefs, "{}")?;
    }

    success("TimeFlow initialized.");
    Ok(())
}
