use crate::cli::commands::report_remote;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::priority::priority_allocation;
use crate::errors::AppResult;
use crate::store::RecordStore;
use crate::ui::messages::{header, info};
use crate::utils::colors::{color_for_staffing, paint};
use crate::utils::formatting::{bold, progress_bar};
use crate::utils::table::Table;

/// Priority staffing, always over ALL officers (filters do not apply).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Priority = cmd {
        let mut store = RecordStore::from_config(cfg)?;
        let all = store.load()?;
        report_remote(&store, cfg, "load", "*");

        let alloc = priority_allocation(&all, &cfg.priority_units);

        header("Priority Unit Allocation");

        if alloc.rows.is_empty() {
            info("No priority units configured (priority_units in the config file).");
            return Ok(());
        }

        println!(
            "Overall: {}/{} officers  {}% complete\n",
            alloc.total_assigned,
            alloc.total_required,
            bold(&alloc.completion.to_string())
        );

        let mut table = Table::new(vec!["#", "Unit", "Assigned", "Status", "Progress", "Officers"]);
        for row in &alloc.rows {
            let status = if row.complete {
                "complete".to_string()
            } else {
                format!("need {} more", row.shortage)
            };
            table.add_row(vec![
                row.priority.to_string(),
                row.unit.to_string(),
                format!("{}/{}", row.assigned, row.required),
                paint(color_for_staffing(row.complete), &status),
                progress_bar(row.progress, 10),
                row.officers.join(", "),
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
