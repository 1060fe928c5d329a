//! Staffing of the priority units against their required headcount.
//!
//! Always computed over the FULL record set: it reflects global staffing,
//! whatever filter the view has.

use crate::models::{OfficerRecord, Unit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityUnit {
    pub unit: Unit,
    pub required: u32,
    pub priority: u32,
}

pub fn default_priority_units() -> Vec<PriorityUnit> {
    [
        (Unit::Nephrology, 3, 1),
        (Unit::Neurology, 2, 2),
        (Unit::Endocrinology, 2, 3),
        (Unit::Gastroenterology, 2, 4),
    ]
    .into_iter()
    .map(|(unit, required, priority)| PriorityUnit {
        unit,
        required,
        priority,
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityRow {
    pub unit: Unit,
    pub priority: u32,
    pub required: u32,
    pub assigned: u32,
    pub shortage: u32,
    pub complete: bool,
    /// assigned / required, capped at 100
    pub progress: f64,
    pub officers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityAllocation {
    pub rows: Vec<PriorityRow>,
    pub total_required: u32,
    pub total_assigned: u32,
    /// Rounded, NOT capped: over-staffing shows above 100.
    pub completion: u32,
}

pub fn priority_allocation(all: &[OfficerRecord], table: &[PriorityUnit]) -> PriorityAllocation {
    let mut sorted: Vec<&PriorityUnit> = table.iter().collect();
    sorted.sort_by_key(|p| p.priority);

    let rows: Vec<PriorityRow> = sorted
        .into_iter()
        .map(|p| {
            let officers: Vec<String> = all
                .iter()
                .filter(|r| r.unit_assigned == p.unit)
                .map(|r| r.full_name.clone())
                .collect();
            let assigned = officers.len() as u32;

            let progress = if p.required == 0 {
                100.0
            } else {
                (f64::from(assigned) / f64::from(p.required) * 100.0).min(100.0)
            };

            PriorityRow {
                unit: p.unit,
                priority: p.priority,
                required: p.required,
                assigned,
                shortage: p.required.saturating_sub(assigned),
                complete: assigned >= p.required,
                progress,
                officers,
            }
        })
        .collect();

    let total_required: u32 = rows.iter().map(|r| r.required).sum();
    let total_assigned: u32 = rows.iter().map(|r| r.assigned).sum();

    let completion = if total_required == 0 {
        0
    } else {
        (f64::from(total_assigned) / f64::from(total_required) * 100.0).round() as u32
    };

    PriorityAllocation {
        rows,
        total_required,
        total_assigned,
        completion,
    }
}
