//! Chart style tables
//!
//! Category colors, impact-tier marker sizes and marker shapes. Each chart
//! builds a [`ChartStyle`] from its defaults (optionally overridden from the
//! TOML config) and passes it into the builder explicitly.

use serde::{Deserialize, Serialize};

/// One category → color entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryColor {
    pub name: String,
    pub color: String,
}

/// Ordered category colors
///
/// Entry order is the legend order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPalette {
    #[serde(default)]
    pub categories: Vec<CategoryColor>,
    /// Color for categories not in the table
    pub fallback: String,
}

impl CategoryPalette {
    /// Build from `(name, color)` pairs
    pub fn new(entries: &[(&str, &str)], fallback: &str) -> Self {
        Self {
            categories: entries
                .iter()
                .map(|(name, color)| CategoryColor {
                    name: (*name).to_string(),
                    color: (*color).to_string(),
                })
                .collect(),
            fallback: fallback.to_string(),
        }
    }

    /// Color for a category, exact match
    pub fn color_for(&self, category: &str) -> &str {
        self.categories
            .iter()
            .find(|entry| entry.name == category)
            .map(|entry| entry.color.as_str())
            .unwrap_or(&self.fallback)
    }

    /// Whether the category has its own entry
    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|entry| entry.name == category)
    }
}

/// One impact tier → marker size entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactSize {
    pub tier: String,
    pub size: f64,
}

/// Impact tier marker sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactScale {
    #[serde(default)]
    pub tiers: Vec<ImpactSize>,
    /// Size for tiers not in the table
    pub default_size: f64,
}

impl ImpactScale {
    /// Build from `(tier, size)` pairs
    pub fn new(entries: &[(&str, f64)], default_size: f64) -> Self {
        Self {
            tiers: entries
                .iter()
                .map(|(tier, size)| ImpactSize {
                    tier: (*tier).to_string(),
                    size: *size,
                })
                .collect(),
            default_size,
        }
    }

    /// Marker size for an impact tier, exact match
    pub fn size_for(&self, tier: &str) -> f64 {
        self.tiers
            .iter()
            .find(|entry| entry.tier == tier)
            .map(|entry| entry.size)
            .unwrap_or(self.default_size)
    }
}

/// Marker shapes used across charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerShape {
    Circle,
    /// Speculative or projected points
    Diamond,
    /// AI winters
    TriangleDown,
    /// Highlighted outliers
    Star,
    Square,
}

impl MarkerShape {
    /// Plotly marker symbol name
    pub fn plotly_symbol(&self) -> &'static str {
        match self {
            MarkerShape::Circle => "circle",
            MarkerShape::Diamond => "diamond",
            MarkerShape::TriangleDown => "triangle-down",
            MarkerShape::Star => "star",
            MarkerShape::Square => "square",
        }
    }
}

impl Default for MarkerShape {
    fn default() -> Self {
        MarkerShape::Circle
    }
}

impl std::fmt::Display for MarkerShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.plotly_symbol())
    }
}

/// Style tables handed to a chart builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub palette: CategoryPalette,
    pub impact_sizes: ImpactScale,
}

impl ChartStyle {
    pub fn new(palette: CategoryPalette, impact_sizes: ImpactScale) -> Self {
        Self {
            palette,
            impact_sizes,
        }
    }

    /// Replace whichever tables the override provides
    pub fn with_override(mut self, style_override: Option<&StyleOverride>) -> Self {
        if let Some(style_override) = style_override {
            if let Some(palette) = &style_override.palette {
                self.palette = palette.clone();
            }
            if let Some(impact_sizes) = &style_override.impact_sizes {
                self.impact_sizes = impact_sizes.clone();
            }
        }
        self
    }
}

/// Partial style from the TOML config
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleOverride {
    #[serde(default)]
    pub palette: Option<CategoryPalette>,
    #[serde(default)]
    pub impact_sizes: Option<ImpactScale>,
}
