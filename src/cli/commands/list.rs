use crate::cli::commands::{filter_options, report_remote};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dates::{format_date, format_optional_date, timeline_band};
use crate::core::query::{DashboardStats, apply_filters};
use crate::errors::AppResult;
use crate::models::OfficerRecord;
use crate::store::RecordStore;
use crate::ui::messages::{header, info};
use crate::utils::colors::{color_for_band, colorize_optional, paint};
use crate::utils::date;
use crate::utils::table::Table;
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { filter, ids } = cmd {
        let opts = filter_options(filter)?;

        let mut store = RecordStore::from_config(cfg)?;
        let all = store.load()?;
        report_remote(&store, cfg, "load", "*");

        let today = date::today();
        let view = apply_filters(&all, &opts);
        let stats = DashboardStats::compute(&view, today, cfg.upcoming_window_days);

        header("House Officers");

        if view.is_empty() {
            if all.is_empty() {
                info("No officers registered yet. Add one with `hoflow add`.");
            } else {
                info("No officers match the current filters.");
            }
        } else {
            print!("{}", render_table(&view, *ids, today));
        }

        print_stats(&stats, all.len(), cfg.upcoming_window_days);
    }
    Ok(())
}

fn render_table(view: &[OfficerRecord], with_ids: bool, today: NaiveDate) -> String {
    let mut headers = vec!["Name", "Gender", "Unit", "Signed in", "Topic", "Presentation", "Sign-out"];
    if with_ids {
        headers.insert(0, "Id");
    }
    let mut table = Table::new(headers);

    for r in view {
        let band = timeline_band(r.expected_sign_out_date, today);
        let mut row = vec![
            r.full_name.clone(),
            r.gender.to_string(),
            r.unit_assigned.to_string(),
            format_date(r.date_signed_in),
            colorize_optional(r.topic_or_default()),
            colorize_optional(&format_optional_date(r.clinical_presentation_date)),
            paint(color_for_band(band), &format_date(r.expected_sign_out_date)),
        ];
        if with_ids {
            row.insert(0, r.id.clone());
        }
        table.add_row(row);
    }

    table.render()
}

fn print_stats(stats: &DashboardStats, overall: usize, window: u32) {
    println!();
    println!(
        "Total: {} of {}   Male: {}   Female: {}",
        stats.total, overall, stats.male, stats.female
    );
    println!(
        "Upcoming presentations (next {window} days): {}   Upcoming sign-outs: {}",
        stats.upcoming_presentations, stats.upcoming_sign_outs
    );

    let dist = stats.unit_distribution();
    if !dist.is_empty() {
        let parts: Vec<String> = dist.iter().map(|(u, n)| format!("{u}: {n}")).collect();
        println!("By unit: {}", parts.join(", "));
    }
}
