//! # ScaleViz Common Library
//!
//! Shared code for the ScaleViz chart tools including:
//! - Compute-magnitude string normalization
//! - Trend fitting and reference curves
//! - Chart style tables (category colors, impact sizes, marker shapes)
//! - Plotly figure model and HTML/JSON export
//! - Configuration loading
//! - Human-readable duration formatting

pub mod config;
pub mod error;
pub mod figure;
pub mod magnitude;
pub mod readable;
pub mod style;
pub mod trend;

pub use error::{Error, Result};
pub use magnitude::normalize;
pub use style::{ChartStyle, MarkerShape};
