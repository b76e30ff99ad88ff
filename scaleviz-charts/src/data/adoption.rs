//! Technology adoption records (days to roughly 50M users)

use super::milestones::PROJECTION_YEAR;
use super::{non_empty, read_rows, DEFAULT_IMPACT};
use scaleviz_common::Result;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
struct AdoptionRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Event")]
    event: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Days_to_Adoption")]
    days_to_adoption: u32,
    #[serde(rename = "Impact", default)]
    impact: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Adoption {
    pub year: i32,
    pub event: String,
    pub category: String,
    pub days: u32,
    pub impact: String,
}

impl Adoption {
    pub fn is_speculative(&self) -> bool {
        self.impact.contains("Speculative") || self.year >= PROJECTION_YEAR
    }
}

impl From<AdoptionRow> for Adoption {
    fn from(row: AdoptionRow) -> Self {
        Self {
            year: row.year,
            event: row.event,
            category: row.category,
            days: row.days_to_adoption,
            impact: non_empty(row.impact).unwrap_or_else(|| DEFAULT_IMPACT.to_string()),
        }
    }
}

pub fn parse_adoptions<R: std::io::Read>(reader: R) -> Result<Vec<Adoption>> {
    let rows: Vec<AdoptionRow> = read_rows(reader)?;
    Ok(rows.into_iter().map(Adoption::from).collect())
}

/// Load the adoption dataset
pub fn load_adoptions(path: &Path) -> Result<Vec<Adoption>> {
    let file = std::fs::File::open(path)?;
    let adoptions = parse_adoptions(file)?;
    info!("Loaded {} records", adoptions.len());
    Ok(adoptions)
}
