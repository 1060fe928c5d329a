use crate::cli::commands::{audit, report_remote};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dates::format_date;
use crate::errors::AppResult;
use crate::models::{Gender, NewOfficer, OfficerRecord, Unit};
use crate::store::RecordStore;
use crate::ui::messages::success;
use crate::utils::date;

/// Register a new house officer.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        name,
        gender,
        unit,
        signed_in,
        topic,
        presentation,
    } = cmd
    {
        //
        // 1. Parse + validate everything before touching the store
        //
        let draft = NewOfficer {
            full_name: name.clone(),
            gender: gender.parse::<Gender>()?,
            date_signed_in: date::require_date(signed_in)?,
            unit_assigned: unit.parse::<Unit>()?,
            clinical_presentation_topic: topic.clone(),
            clinical_presentation_date: date::parse_optional_date(presentation.as_ref())?,
        };
        let record = OfficerRecord::create(draft)?;

        //
        // 2. Write through both backends
        //
        let mut store = RecordStore::from_config(cfg)?;
        store.add(record.clone())?;
        report_remote(&store, cfg, "add", &record.id);

        //
        // 3. Audit + feedback
        //
        audit(
            cfg,
            "add",
            &record.id,
            &format!("{} ({})", record.full_name, record.unit_assigned),
        );

        success(format!(
            "Added {} to {} (id {}). Expected sign-out: {}",
            record.full_name,
            record.unit_assigned,
            record.id,
            format_date(record.expected_sign_out_date)
        ));
    }

    Ok(())
}
