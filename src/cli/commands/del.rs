use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::viewmodel::ViewModel;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::widget::coordinator::Coordinator;
use std::io::{self, Write};
use std::sync::Arc;

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let (repo, bindings) = super::open_engine(cfg)?;

        let item = repo.get(*id)?.ok_or(AppError::ItemNotFound(*id))?;

        if !yes {
            let prompt = format!(
                "Delete TimeFlow #{} '{}'? This action is irreversible.",
                item.id, item.title
            );
            if !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        let coordinator = Arc::new(Coordinator::new(Arc::clone(&repo), bindings));
        let vm = ViewModel::new(repo, coordinator);
        let affected = vm.remove(&item)?;

        success(format!("TimeFlow #{} '{}' has been deleted.", item.id, item.title));

        if !affected.is_empty() {
            let ids: Vec<String> = affected.iter().map(|w| w.to_string()).collect();
            info(format!(
                "Reset {} widget instance(s): {}",
                affected.len(),
                ids.join(", ")
            ));
        }
    }

    Ok(())
}
