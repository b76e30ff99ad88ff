//! # ScaleViz Charts
//!
//! Datasets, annotation tables and the three chart builders:
//! - AI compute timeline (training FLOPs for AI milestones)
//! - Technology adoption timeline (days to ~50M users)
//! - Energetic scaling (neural vs. compute efficiency)

pub mod charts;
pub mod data;
pub mod labels;

pub use charts::{build, generate, ChartFigures, ChartKind, Variant};
