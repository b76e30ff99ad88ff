//! Chart builders
//!
//! Every chart is built twice: an interactive variant written as a
//! standalone HTML page and a static-export variant written as an SVG image
//! plus its bare Plotly JSON. The two differ only in annotation density and
//! canvas size.

pub mod adoption;
pub mod ai_compute;
pub mod energetic;

use crate::data::{load_adoptions, load_milestones, ADOPTION_FILE, MILESTONES_FILE};
use scaleviz_common::config::{ChartPaths, TomlConfig};
use scaleviz_common::figure::{self, Figure};
use scaleviz_common::Result;
use std::path::PathBuf;
use tracing::info;

/// Which annotations and canvas size a figure is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Hover-first page with arrow labels for key points
    Interactive,
    /// Static layout with the full label placement table
    Export,
}

/// Chart selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ChartKind {
    AiCompute,
    Adoption,
    Energetic,
}

impl ChartKind {
    /// All charts in build order
    pub const ALL: [ChartKind; 3] = [ChartKind::AiCompute, ChartKind::Adoption, ChartKind::Energetic];

    /// Command-line name
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::AiCompute => "ai-compute",
            ChartKind::Adoption => "adoption",
            ChartKind::Energetic => "energetic",
        }
    }

    /// Base name shared by the chart's artifacts
    pub fn artifact_stem(&self) -> &'static str {
        match self {
            ChartKind::AiCompute => "ai_compute_timeline",
            ChartKind::Adoption => "adoption_timeline",
            ChartKind::Energetic => "energetic_scaling",
        }
    }

    /// Interactive page file name
    pub fn html_file(&self) -> String {
        format!("{}_interactive.html", self.artifact_stem())
    }

    /// Export figure file name
    pub fn json_file(&self) -> String {
        format!("{}.json", self.artifact_stem())
    }

    /// Static image file name
    pub fn svg_file(&self) -> String {
        format!("{}.svg", self.artifact_stem())
    }

    fn page_title(&self) -> &'static str {
        match self {
            ChartKind::AiCompute => "History of Compute & Intelligence",
            ChartKind::Adoption => "Time to Mass Adoption",
            ChartKind::Energetic => "Energetic Scaling",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ChartKind {
    type Err = scaleviz_common::Error;

    fn from_str(s: &str) -> Result<Self> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| scaleviz_common::Error::InvalidInput(format!("Unknown chart: {}", s)))
    }
}

/// Both variants of one chart
#[derive(Debug, Clone)]
pub struct ChartFigures {
    pub interactive: Figure,
    pub export: Figure,
}

/// Load a chart's data and build both figures
pub fn build(kind: ChartKind, paths: &ChartPaths, config: &TomlConfig) -> Result<ChartFigures> {
    let figures = match kind {
        ChartKind::AiCompute => {
            let milestones = load_milestones(&paths.dataset(MILESTONES_FILE))?;
            let style = ai_compute::style(config);
            ChartFigures {
                interactive: ai_compute::build(&milestones, &style, Variant::Interactive),
                export: ai_compute::build(&milestones, &style, Variant::Export),
            }
        }
        ChartKind::Adoption => {
            let adoptions = load_adoptions(&paths.dataset(ADOPTION_FILE))?;
            let style = adoption::style(config);
            ChartFigures {
                interactive: adoption::build(&adoptions, &style, Variant::Interactive),
                export: adoption::build(&adoptions, &style, Variant::Export),
            }
        }
        ChartKind::Energetic => {
            let styles = energetic::styles(config);
            info!("Using embedded energetic scaling tables");
            ChartFigures {
                interactive: energetic::build(&styles, Variant::Interactive),
                export: energetic::build(&styles, Variant::Export),
            }
        }
    };
    Ok(figures)
}

/// Build one chart and write its artifacts; returns the written paths
pub fn generate(kind: ChartKind, paths: &ChartPaths, config: &TomlConfig) -> Result<Vec<PathBuf>> {
    paths.ensure_output_dir()?;
    let figures = build(kind, paths, config)?;

    let html_path = paths.artifact(&kind.html_file());
    figure::write_html(&figures.interactive, &html_path, kind.page_title())?;

    let json_path = paths.artifact(&kind.json_file());
    figure::write_json(&figures.export, &json_path)?;

    let svg_path = paths.artifact(&kind.svg_file());
    figure::write_svg(&figures.export, &svg_path)?;

    Ok(vec![html_path, json_path, svg_path])
}

/// Axis position of a value on a log axis
pub(crate) fn log_axis(value: f64) -> f64 {
    value.log10()
}

/// Truncate to a number of characters, not bytes
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_names_round_trip() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.name().parse::<ChartKind>().unwrap(), kind);
        }
        assert!("pie".parse::<ChartKind>().is_err());
    }

    #[test]
    fn test_artifact_names() {
        assert_eq!(ChartKind::AiCompute.html_file(), "ai_compute_timeline_interactive.html");
        assert_eq!(ChartKind::Adoption.json_file(), "adoption_timeline.json");
        assert_eq!(ChartKind::Energetic.html_file(), "energetic_scaling_interactive.html");
        assert_eq!(ChartKind::AiCompute.svg_file(), "ai_compute_timeline.svg");
    }

    #[test]
    fn test_clap_value_names_match() {
        use clap::ValueEnum;
        for kind in ChartKind::ALL {
            let value = kind.to_possible_value().unwrap();
            assert_eq!(value.get_name(), kind.name());
        }
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        assert_eq!(truncate_chars("Ünïcödé", 2), "Ün");
    }
}
