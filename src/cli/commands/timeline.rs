use crate::cli::commands::report_remote;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dates::format_date;
use crate::core::timeline::{EventKind, build_timeline};
use crate::errors::AppResult;
use crate::store::RecordStore;
use crate::ui::messages::{header, info};
use crate::utils::colors::{color_for_band, paint};
use crate::utils::date;
use crate::utils::formatting::{describe_days, progress_bar};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Timeline { kind } = cmd {
        let mut store = RecordStore::from_config(cfg)?;
        let all = store.load()?;
        report_remote(&store, cfg, "load", "*");

        let entries = build_timeline(&all, *kind, date::today());

        header(match kind {
            EventKind::Signout => "Sign-out timeline",
            EventKind::Presentation => "Presentation timeline",
        });

        if entries.is_empty() {
            info("Nothing scheduled.");
            return Ok(());
        }

        let mut table = Table::new(vec!["Name", "Date", "When", "Status", "Progress"]);
        for e in entries {
            let color = color_for_band(e.band);
            table.add_row(vec![
                e.full_name,
                format_date(e.target),
                describe_days(e.days_until),
                paint(color, e.band.as_str()),
                progress_bar(e.progress, 20),
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
