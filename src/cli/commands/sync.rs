use crate::cli::commands::{ask_confirmation, audit};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::RecordStore;
use crate::ui::messages::{info, success};

/// Push the local cache to the remote store (remote content is replaced).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sync { yes } = cmd {
        let mut store = RecordStore::from_config(cfg)?;

        let prompt = format!(
            "Replace ALL rows of the remote store ({}) with the local copy?",
            store.remote_name()
        );
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        // explicit action: a remote failure IS an error here
        let n = store.push_local_to_remote()?;

        audit(
            cfg,
            "sync",
            store.remote_name(),
            &format!("{n} officer(s) uploaded"),
        );
        success(format!(
            "Uploaded {n} officer(s) to the remote store ({}).",
            store.remote_name()
        ));
    }

    Ok(())
}
