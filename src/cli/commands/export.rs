use crate::cli::commands::{audit, filter_options, report_remote};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::query::{apply_filters, select_ids};
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportRequest, default_file_name};
use crate::store::RecordStore;
use crate::utils::date;
use crate::utils::path::expand_tilde;
use std::path::PathBuf;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        signer,
        filter,
        ids,
        force,
    } = cmd
    {
        let today = date::today();

        let file: PathBuf = match file {
            Some(f) => expand_tilde(f),
            None => std::env::current_dir()?.join(default_file_name(*format, today)),
        };

        let req = ExportRequest {
            format: *format,
            file,
            signer: signer.clone(),
            force: *force,
            today,
            window_days: cfg.upcoming_window_days,
        };

        // guard clauses first: nothing is loaded or written on bad input
        req.validate()?;
        let opts = filter_options(filter)?;

        let mut store = RecordStore::from_config(cfg)?;
        let all = store.load()?;
        report_remote(&store, cfg, "load", "*");

        let view = select_ids(&apply_filters(&all, &opts), ids);

        if ExportLogic::export(&view, &req)? {
            audit(
                cfg,
                "export",
                format.as_str(),
                &format!("{} officer(s) to {}", view.len(), req.file.display()),
            );
        }
    }

    Ok(())
}
