use super::{gender::Gender, unit::Unit};
use crate::core::dates::calculate_sign_out_date;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// One tracked house officer.
///
/// Field names serialize in camelCase: they are the keys of the local JSON
/// blob and the column names of the remote `house_officers` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerRecord {
    pub id: String,
    pub full_name: String,
    pub gender: Gender,
    pub date_signed_in: NaiveDate,
    pub unit_assigned: Unit,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub clinical_presentation_topic: Option<String>,
    #[serde(default, deserialize_with = "blank_date_as_none")]
    pub clinical_presentation_date: Option<NaiveDate>,
    pub expected_sign_out_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Form data for a new officer, before `id` / `createdAt` are assigned.
#[derive(Debug, Clone)]
pub struct NewOfficer {
    pub full_name: String,
    pub gender: Gender,
    pub date_signed_in: NaiveDate,
    pub unit_assigned: Unit,
    pub clinical_presentation_topic: Option<String>,
    pub clinical_presentation_date: Option<NaiveDate>,
}

/// Partial update. `None` leaves a field untouched; for the optional fields
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_signed_in: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_assigned: Option<Unit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_presentation_topic: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_presentation_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_sign_out_date: Option<NaiveDate>,
}

impl OfficerRecord {
    /// Build a brand new record from validated form data.
    /// - assigns a fresh UUID and `createdAt = now`
    /// - derives `expectedSignOutDate` from `dateSignedIn`
    pub fn create(draft: NewOfficer) -> AppResult<Self> {
        let full_name = validate_name(&draft.full_name)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            full_name,
            gender: draft.gender,
            date_signed_in: draft.date_signed_in,
            unit_assigned: draft.unit_assigned,
            clinical_presentation_topic: normalize_topic(draft.clinical_presentation_topic),
            clinical_presentation_date: draft.clinical_presentation_date,
            expected_sign_out_date: calculate_sign_out_date(draft.date_signed_in),
            // millisecond precision, same as the stored text form
            created_at: Utc::now().trunc_subsecs(3),
        })
    }

    /// Merge a partial update into this record. Derived fields are NOT
    /// recomputed here: see [`OfficerPatch::recompute_sign_out`].
    pub fn apply(&mut self, patch: &OfficerPatch) {
        if let Some(name) = &patch.full_name {
            self.full_name = name.clone();
        }
        if let Some(g) = patch.gender {
            self.gender = g;
        }
        if let Some(d) = patch.date_signed_in {
            self.date_signed_in = d;
        }
        if let Some(u) = patch.unit_assigned {
            self.unit_assigned = u;
        }
        if let Some(topic) = &patch.clinical_presentation_topic {
            self.clinical_presentation_topic = topic.clone();
        }
        if let Some(date) = patch.clinical_presentation_date {
            self.clinical_presentation_date = date;
        }
        if let Some(d) = patch.expected_sign_out_date {
            self.expected_sign_out_date = d;
        }
    }

    /// Topic for display, `Not specified` when missing.
    pub fn topic_or_default(&self) -> &str {
        self.clinical_presentation_topic
            .as_deref()
            .unwrap_or("Not specified")
    }
}

impl OfficerPatch {
    pub fn is_empty(&self) -> bool {
        *self == OfficerPatch::default()
    }

    /// Same guard clauses as the add form: a name, if given, must not be blank.
    pub fn validate(mut self) -> AppResult<Self> {
        if let Some(name) = &self.full_name {
            self.full_name = Some(validate_name(name)?);
        }
        if let Some(topic) = self.clinical_presentation_topic.take() {
            self.clinical_presentation_topic = Some(normalize_topic(topic));
        }
        Ok(self)
    }

    /// A new sign-in date always re-derives the sign-out date; an explicit
    /// sign-out date only survives when the sign-in date is untouched.
    pub fn recompute_sign_out(mut self) -> Self {
        if let Some(sign_in) = self.date_signed_in {
            self.expected_sign_out_date = Some(calculate_sign_out_date(sign_in));
        }
        self
    }
}

fn validate_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(
            "Full name is required and cannot be blank".into(),
        ));
    }
    Ok(trimmed.to_string())
}

fn normalize_topic(topic: Option<String>) -> Option<String> {
    topic
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

// Older clients stored "" for unset optional fields.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

fn blank_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> NewOfficer {
        NewOfficer {
            full_name: name.into(),
            gender: Gender::Female,
            date_signed_in: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            unit_assigned: Unit::Nephrology,
            clinical_presentation_topic: Some("  ".into()),
            clinical_presentation_date: None,
        }
    }

    #[test]
    fn create_assigns_id_and_sign_out() {
        let rec = OfficerRecord::create(draft("  Jane Doe ")).unwrap();
        assert_eq!(rec.full_name, "Jane Doe");
        assert!(!rec.id.is_empty());
        assert_eq!(
            rec.expected_sign_out_date,
            NaiveDate::from_ymd_opt(2025, 3, 26).unwrap()
        );
        assert_eq!(rec.clinical_presentation_topic, None);
    }

    #[test]
    fn create_rejects_blank_name() {
        let err = OfficerRecord::create(draft("   ")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn ids_are_unique() {
        let a = OfficerRecord::create(draft("A")).unwrap();
        let b = OfficerRecord::create(draft("B")).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn legacy_blob_with_empty_strings_loads() {
        let json = r#"{
            "id": "1735689600000",
            "fullName": "John Okafor",
            "gender": "Male",
            "dateSignedIn": "2025-01-01",
            "unitAssigned": "Neurology",
            "clinicalPresentationTopic": "",
            "clinicalPresentationDate": "",
            "expectedSignOutDate": "2025-04-01",
            "createdAt": "2025-01-01T08:00:00.000Z"
        }"#;

        let rec: OfficerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.clinical_presentation_topic, None);
        assert_eq!(rec.clinical_presentation_date, None);
        assert_eq!(rec.unit_assigned, Unit::Neurology);
    }

    #[test]
    fn patch_serializes_only_touched_fields() {
        let patch = OfficerPatch {
            full_name: Some("New Name".into()),
            clinical_presentation_date: Some(None),
            ..Default::default()
        };

        let v = serde_json::to_value(&patch).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["fullName"], "New Name");
        assert!(obj["clinicalPresentationDate"].is_null());
    }

    #[test]
    fn new_sign_in_always_rederives_sign_out() {
        let new_in = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let explicit = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let derived = Some(NaiveDate::from_ymd_opt(2025, 4, 26).unwrap());

        let only_sign_in = OfficerPatch {
            date_signed_in: Some(new_in),
            ..Default::default()
        }
        .recompute_sign_out();
        assert_eq!(only_sign_in.expected_sign_out_date, derived);

        // a stale explicit date never wins over a new sign-in date
        let both = OfficerPatch {
            date_signed_in: Some(new_in),
            expected_sign_out_date: Some(explicit),
            ..Default::default()
        }
        .recompute_sign_out();
        assert_eq!(both.expected_sign_out_date, derived);

        // sign-out alone is kept as given
        let only_sign_out = OfficerPatch {
            expected_sign_out_date: Some(explicit),
            ..Default::default()
        }
        .recompute_sign_out();
        assert_eq!(only_sign_out.expected_sign_out_date, Some(explicit));
    }

    #[test]
    fn apply_can_clear_optional_fields() {
        let mut rec = OfficerRecord::create(NewOfficer {
            clinical_presentation_topic: Some("Sepsis".into()),
            clinical_presentation_date: NaiveDate::from_ymd_opt(2025, 2, 10),
            ..draft("Ada")
        })
        .unwrap();

        rec.apply(&OfficerPatch {
            clinical_presentation_topic: Some(None),
            clinical_presentation_date: Some(None),
            ..Default::default()
        });

        assert_eq!(rec.clinical_presentation_topic, None);
        assert_eq!(rec.clinical_presentation_date, None);
        assert_eq!(rec.topic_or_default(), "Not specified");
    }
}
