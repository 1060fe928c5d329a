use crate::cli::commands::report_remote;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calendar::{calendar_link, calendar_links};
use crate::errors::{AppError, AppResult};
use crate::store::RecordStore;
use crate::ui::messages::{info, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Calendar { id, kind, all } = cmd {
        let mut store = RecordStore::from_config(cfg)?;
        let records = store.load()?;
        report_remote(&store, cfg, "load", "*");

        if *all {
            let links = calendar_links(&records);
            if links.is_empty() {
                info("No officers registered.");
            }
            for (name, kind, link) in links {
                println!("{name} [{}]\n  {link}", kind.as_str());
            }
            return Ok(());
        }

        let Some(id) = id else {
            return Err(AppError::Validation(
                "Pass an officer id, or --all for every officer".into(),
            ));
        };

        let officer = records
            .iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| AppError::OfficerNotFound(id.clone()))?;

        match calendar_link(officer, *kind) {
            Ok(link) => println!("{link}"),
            // reported, no link emitted
            Err(e @ AppError::NoDateSet { .. }) => warning(e),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
