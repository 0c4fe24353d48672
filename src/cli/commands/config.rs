use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            let yaml = serde_yaml::to_string(cfg).map_err(|_| AppError::ConfigLoad)?;
            println!("{}", yaml);
        }

        if *check {
            if cfg.check() {
                success("Configuration is complete.");
            } else {
                return Err(AppError::Config("configuration has missing fields".into()));
            }
        }
    }

    Ok(())
}
