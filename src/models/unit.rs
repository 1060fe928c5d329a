use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Clinical units a house officer can be posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "Cardiology 1")]
    Cardiology1,
    #[serde(rename = "Cardiology 2")]
    Cardiology2,
    Nephrology,
    Neurology,
    Endocrinology,
    Pulmonology,
    Gastroenterology,
    #[serde(rename = "Infectious Disease/Dermatology")]
    InfectiousDiseaseDermatology,
    Rheumatology,
}

impl Unit {
    /// Every unit, in the order the department lists them.
    pub const ALL: [Unit; 9] = [
        Unit::Cardiology1,
        Unit::Cardiology2,
        Unit::Nephrology,
        Unit::Neurology,
        Unit::Endocrinology,
        Unit::Pulmonology,
        Unit::Gastroenterology,
        Unit::InfectiousDiseaseDermatology,
        Unit::Rheumatology,
    ];

    /// Display label; also the value stored in the database and the JSON blob.
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Cardiology1 => "Cardiology 1",
            Unit::Cardiology2 => "Cardiology 2",
            Unit::Nephrology => "Nephrology",
            Unit::Neurology => "Neurology",
            Unit::Endocrinology => "Endocrinology",
            Unit::Pulmonology => "Pulmonology",
            Unit::Gastroenterology => "Gastroenterology",
            Unit::InfectiousDiseaseDermatology => "Infectious Disease/Dermatology",
            Unit::Rheumatology => "Rheumatology",
        }
    }

    /// Convert DB string → enum (exact label match)
    pub fn from_db_str(s: &str) -> Option<Self> {
        Unit::ALL.into_iter().find(|u| u.label() == s)
    }

    /// Helper for CLI input: case-insensitive, tolerant to `-`/`_` instead of
    /// spaces and to the short form `id-derm`.
    pub fn from_code(code: &str) -> Option<Self> {
        let norm = code.trim().to_lowercase().replace(['-', '_'], " ");

        if norm == "id derm" || norm == "infectious disease" || norm == "dermatology" {
            return Some(Unit::InfectiousDiseaseDermatology);
        }

        Unit::ALL.into_iter().find(|u| {
            let label = u.label().to_lowercase();
            label == norm || label.replace(' ', "") == norm.replace(' ', "")
        })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::from_code(s).ok_or_else(|| AppError::InvalidUnit(s.to_string()))
    }
}
