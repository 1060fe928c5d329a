//! SQL for the `house_officers` table (SQLite remote backend).

use crate::errors::AppError;
use crate::models::{Gender, OfficerPatch, OfficerRecord, Unit};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::types::{ToSql, Type};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_COLUMNS: &str = "id, fullName, gender, dateSignedIn, unitAssigned, \
     clinicalPresentationTopic, clinicalPresentationDate, expectedSignOutDate, createdAt";

/// Full table, newest `createdAt` first.
pub fn select_all_officers(conn: &Connection) -> Result<Vec<OfficerRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SELECT_COLUMNS} FROM house_officers ORDER BY createdAt DESC"
    ))?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn select_officer(conn: &Connection, id: &str) -> Result<Option<OfficerRecord>> {
    conn.query_row(
        &format!("SELECT {SELECT_COLUMNS} FROM house_officers WHERE id = ?1"),
        [id],
        map_row,
    )
    .optional()
}

/// Insert one row and return it as stored.
pub fn insert_officer(conn: &Connection, rec: &OfficerRecord) -> Result<OfficerRecord> {
    conn.execute(
        "INSERT INTO house_officers (id, fullName, gender, dateSignedIn, unitAssigned,
             clinicalPresentationTopic, clinicalPresentationDate, expectedSignOutDate, createdAt)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            rec.id,
            rec.full_name,
            rec.gender.as_str(),
            date_str(rec.date_signed_in),
            rec.unit_assigned.label(),
            rec.clinical_presentation_topic,
            rec.clinical_presentation_date.map(date_str),
            date_str(rec.expected_sign_out_date),
            timestamp_str(&rec.created_at),
        ],
    )?;

    select_officer(conn, &rec.id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}

/// Update only the columns present in `patch`. Returns the number of rows touched.
pub fn update_officer(conn: &Connection, id: &str, patch: &OfficerPatch) -> Result<usize> {
    let mut sets: Vec<&'static str> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(name) = &patch.full_name {
        sets.push("fullName");
        values.push(Box::new(name.clone()));
    }
    if let Some(g) = patch.gender {
        sets.push("gender");
        values.push(Box::new(g.as_str()));
    }
    if let Some(d) = patch.date_signed_in {
        sets.push("dateSignedIn");
        values.push(Box::new(date_str(d)));
    }
    if let Some(u) = patch.unit_assigned {
        sets.push("unitAssigned");
        values.push(Box::new(u.label()));
    }
    if let Some(topic) = &patch.clinical_presentation_topic {
        sets.push("clinicalPresentationTopic");
        values.push(Box::new(topic.clone()));
    }
    if let Some(date) = patch.clinical_presentation_date {
        sets.push("clinicalPresentationDate");
        values.push(Box::new(date.map(date_str)));
    }
    if let Some(d) = patch.expected_sign_out_date {
        sets.push("expectedSignOutDate");
        values.push(Box::new(date_str(d)));
    }

    if sets.is_empty() {
        return Ok(0);
    }

    let assignments: Vec<String> = sets
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{col} = ?{}", i + 1))
        .collect();

    let sql = format!(
        "UPDATE house_officers SET {} WHERE id = ?{}",
        assignments.join(", "),
        sets.len() + 1
    );

    values.push(Box::new(id.to_string()));
    let refs: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();

    conn.execute(&sql, refs.as_slice())
}

pub fn delete_officer(conn: &Connection, id: &str) -> Result<usize> {
    conn.execute("DELETE FROM house_officers WHERE id = ?1", [id])
}

/// Delete every row, then bulk-insert `records`, in one transaction.
pub fn replace_all_officers(conn: &mut Connection, records: &[OfficerRecord]) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM house_officers", [])?;
    for rec in records {
        insert_officer(&tx, rec)?;
    }
    tx.commit()
}

pub fn map_row(row: &Row) -> Result<OfficerRecord> {
    let gender_str: String = row.get("gender")?;
    let gender = Gender::from_db_str(&gender_str)
        .ok_or_else(|| conversion_error(AppError::InvalidGender(gender_str.clone())))?;

    let unit_str: String = row.get("unitAssigned")?;
    let unit = Unit::from_db_str(&unit_str)
        .ok_or_else(|| conversion_error(AppError::InvalidUnit(unit_str.clone())))?;

    let topic: Option<String> = row.get("clinicalPresentationTopic")?;
    let presentation: Option<String> = row.get("clinicalPresentationDate")?;
    let presentation = match presentation.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(parse_date_col(s)?),
    };

    let created_raw: String = row.get("createdAt")?;
    let created_at = DateTime::parse_from_rfc3339(&created_raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(AppError::InvalidDate(created_raw.clone())))?;

    Ok(OfficerRecord {
        id: row.get("id")?,
        full_name: row.get("fullName")?,
        gender,
        date_signed_in: parse_date_col(&row.get::<_, String>("dateSignedIn")?)?,
        unit_assigned: unit,
        clinical_presentation_topic: topic.filter(|t| !t.trim().is_empty()),
        clinical_presentation_date: presentation,
        expected_sign_out_date: parse_date_col(&row.get::<_, String>("expectedSignOutDate")?)?,
        created_at,
    })
}

fn parse_date_col(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| conversion_error(AppError::InvalidDate(s.to_string())))
}

fn conversion_error(e: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e))
}

fn date_str(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// RFC 3339 with millisecond precision and `Z`, so text order == time order.
fn timestamp_str(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}
