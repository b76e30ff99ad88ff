//! Chart datasets
//!
//! The AI milestone and adoption datasets are CSV files in the data
//! directory; the energetic-scaling tables are compiled in.

pub mod adoption;
pub mod energetic;
pub mod milestones;

pub use adoption::{load_adoptions, Adoption};
pub use milestones::{load_milestones, Milestone};

/// AI milestone dataset file name
pub const MILESTONES_FILE: &str = "ai_milestones.csv";

/// Technology adoption dataset file name
pub const ADOPTION_FILE: &str = "tech_adoption.csv";

/// Impact tier assumed when a row leaves it empty
pub const DEFAULT_IMPACT: &str = "Medium";

/// Read a CSV file into typed rows
pub(crate) fn read_rows<T, R>(reader: R) -> scaleviz_common::Result<Vec<T>>
where
    T: serde::de::DeserializeOwned,
    R: std::io::Read,
{
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for row in csv_reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Treat blank optional cells as absent
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
