use crate::cli::commands::{ask_confirmation, audit, report_remote};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::store::RecordStore;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let mut store = RecordStore::from_config(cfg)?;

        let Some(officer) = store.find(id)? else {
            return Err(AppError::OfficerNotFound(id.clone()));
        };

        //
        // Confirmation prompt
        //
        let prompt = format!(
            "Delete {} ({}, {})? This action is irreversible.",
            officer.full_name, officer.unit_assigned, officer.id
        );
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        //
        // Execute deletion
        //
        store.delete(id)?;
        report_remote(&store, cfg, "del", id);
        audit(cfg, "del", id, &officer.full_name);

        success(format!("{} has been deleted.", officer.full_name));
    }

    Ok(())
}
