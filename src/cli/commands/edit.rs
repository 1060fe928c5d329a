use crate::cli::commands::{audit, report_remote};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{Gender, OfficerPatch, Unit};
use crate::store::RecordStore;
use crate::ui::messages::{success, warning};
use crate::utils::date;

/// Partial update of one officer.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        name,
        gender,
        unit,
        signed_in,
        sign_out,
        topic,
        presentation,
    } = cmd
    {
        //
        // 1. Build the patch from the given flags only
        //
        let patch = OfficerPatch {
            full_name: name.clone(),
            gender: gender.as_deref().map(str::parse::<Gender>).transpose()?,
            date_signed_in: date::parse_optional_date(signed_in.as_ref())?,
            unit_assigned: unit.as_deref().map(str::parse::<Unit>).transpose()?,
            clinical_presentation_topic: topic.as_ref().map(|t| Some(t.clone())),
            clinical_presentation_date: date::parse_clearable_date(presentation.as_ref())?,
            expected_sign_out_date: date::parse_optional_date(sign_out.as_ref())?,
        }
        .validate()?
        .recompute_sign_out();

        if patch.is_empty() {
            warning("Nothing to update: pass at least one field (see --help).");
            return Ok(());
        }

        //
        // 2. The officer must exist in the current set
        //
        let mut store = RecordStore::from_config(cfg)?;
        let Some(current) = store.find(id)? else {
            return Err(AppError::OfficerNotFound(id.clone()));
        };

        //
        // 3. Apply on both backends
        //
        store.update(id, &patch)?;
        report_remote(&store, cfg, "edit", id);

        audit(cfg, "edit", id, &audit_message(&patch));

        success(format!("Updated {} ({id}).", current.full_name));
        if let Some(d) = patch.expected_sign_out_date {
            success(format!("Expected sign-out is now {d}."));
        }
    }

    Ok(())
}

/// Changed fields as JSON; a placeholder if the patch cannot be serialized.
fn audit_message(patch: &OfficerPatch) -> String {
    serde_json::to_string(patch).unwrap_or_else(|e| {
        log::warn!("event=audit_serialize_failed op=edit error={e}");
        "<fields not serializable>".to_string()
    })
}
