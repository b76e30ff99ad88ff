//! AI milestone records
//!
//! One row per milestone with a free-form compute estimate. The estimate is
//! resolved through the magnitude normalizer; rows it cannot resolve are
//! placed at a year-bucketed proxy so every milestone still appears on the
//! timeline.

use super::{non_empty, read_rows, DEFAULT_IMPACT};
use scaleviz_common::magnitude::{self, NOT_AVAILABLE};
use scaleviz_common::Result;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Primary category for rows with no category
pub const OTHER_CATEGORY: &str = "Other";

/// Year where the proxy era ends and measured training compute begins
pub const MEASURED_ERA_START: i32 = 2010;

/// Year from which points are drawn as projections
pub const PROJECTION_YEAR: i32 = 2026;

/// Upper year bound (exclusive) and placement value of each proxy bucket
const PROXY_BUCKETS: [(i32, f64); 5] = [
    (1945, 1e2),
    (1960, 1e4),
    (1980, 1e6),
    (2000, 1e8),
    (2010, 1e10),
];

/// Placement for unresolvable rows from 2010 on
const LATE_PROXY: f64 = 1e12;

#[derive(Debug, Clone, Deserialize)]
struct MilestoneRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Event")]
    event: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Compute_FLOPs", default)]
    compute_flops: String,
    #[serde(rename = "Parameters", default)]
    parameters: Option<String>,
    #[serde(rename = "Impact", default)]
    impact: Option<String>,
}

/// One milestone on the AI compute timeline
#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    pub year: i32,
    pub event: String,
    /// Full category text, possibly `;`-separated
    pub category: String,
    /// First listed category, used for color and legend grouping
    pub primary_category: String,
    /// Compute estimate as written in the dataset
    pub compute_raw: String,
    /// Normalized compute, `None` when unresolvable
    pub compute: Option<f64>,
    pub parameters: String,
    pub impact: String,
}

impl Milestone {
    fn from_row(row: MilestoneRow) -> Self {
        let compute = magnitude::normalize(&row.compute_flops);
        Self {
            year: row.year,
            primary_category: primary_category(&row.category),
            category: row.category,
            compute,
            compute_raw: row.compute_flops,
            parameters: non_empty(row.parameters).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            impact: non_empty(row.impact).unwrap_or_else(|| DEFAULT_IMPACT.to_string()),
            event: row.event,
        }
    }

    /// Vertical position on the timeline: the normalized compute, or the
    /// year-bucket proxy when the estimate could not be resolved
    pub fn placement(&self) -> f64 {
        self.compute.unwrap_or_else(|| proxy_compute_for_year(self.year))
    }

    /// Whether the placement is a year-bucket proxy
    pub fn is_proxy_placed(&self) -> bool {
        self.compute.is_none()
    }

    /// Speculative impact tier or a projection year
    pub fn is_speculative(&self) -> bool {
        self.impact.contains("Speculative") || self.year >= PROJECTION_YEAR
    }

    /// AI winter periods
    pub fn is_winter(&self) -> bool {
        self.category.contains("Winter")
    }
}

/// First `;`-separated category, trimmed
pub fn primary_category(category: &str) -> String {
    match category.split(';').next().map(str::trim) {
        Some(first) if !first.is_empty() => first.to_string(),
        _ => OTHER_CATEGORY.to_string(),
    }
}

/// Placement value for a milestone whose compute is unknown
pub fn proxy_compute_for_year(year: i32) -> f64 {
    PROXY_BUCKETS
        .iter()
        .find(|(before, _)| year < *before)
        .map(|(_, value)| *value)
        .unwrap_or(LATE_PROXY)
}

/// Parse milestone CSV text
pub fn parse_milestones<R: std::io::Read>(reader: R) -> Result<Vec<Milestone>> {
    let rows: Vec<MilestoneRow> = read_rows(reader)?;
    let milestones: Vec<Milestone> = rows.into_iter().map(Milestone::from_row).collect();

    let unresolved = milestones.iter().filter(|m| m.is_proxy_placed()).count();
    debug!(
        "{} of {} milestones have no resolvable compute and use year proxies",
        unresolved,
        milestones.len()
    );
    Ok(milestones)
}

/// Load the milestone dataset
pub fn load_milestones(path: &Path) -> Result<Vec<Milestone>> {
    let file = std::fs::File::open(path)?;
    let milestones = parse_milestones(file)?;
    info!("Parsed {} records", milestones.len());
    Ok(milestones)
}
