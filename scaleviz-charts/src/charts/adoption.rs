//! Time to Mass Adoption
//!
//! Days for a technology to reach roughly 50M users, on a log axis with
//! human-readable ticks. The canvas stays sparse: detail lives in hover text,
//! and only the interactive page carries anchor labels and a caption.

use super::{log_axis, Variant};
use crate::data::Adoption;
use crate::labels;
use scaleviz_common::config::TomlConfig;
use scaleviz_common::figure::{
    Annotation, Axis, Dash, Figure, Font, Layout, Legend, Line, Margin, Marker, Mode, OneOrMany,
    Shape, Title, Trace,
};
use scaleviz_common::readable::days_to_readable;
use scaleviz_common::style::{CategoryPalette, ImpactScale};
use scaleviz_common::trend::{linspace, ExponentialTrend};
use scaleviz_common::{ChartStyle, MarkerShape};
use tracing::warn;

/// Config key for style overrides
pub const STYLE_NAME: &str = "adoption";

pub const TREND_TRACE_NAME: &str = "Trend (visual guide)";

const CATEGORY_COLORS: &[(&str, &str)] = &[
    ("Hardware", "#3498DB"),
    ("Software/Compiler", "#E67E22"),
    ("Internet/Web", "#27AE60"),
    ("Mobile", "#9B59B6"),
    ("Social/Apps", "#FF69B4"),
    ("Cloud/Infrastructure", "#8B4513"),
    ("AI/Agentic", "#E74C3C"),
];

const IMPACT_SIZES: &[(&str, f64)] = &[
    ("Transformative", 18.0),
    ("Speculative Transformative", 16.0),
    ("High", 12.0),
    ("Medium", 9.0),
];

const ERAS: [(f64, f64, &str); 4] = [
    (1955.0, 1990.0, "rgba(200,200,200,0.15)"),
    (1990.0, 2005.0, "rgba(100,150,220,0.12)"),
    (2005.0, 2015.0, "rgba(180,150,220,0.12)"),
    (2015.0, 2030.0, "rgba(255,150,150,0.15)"),
];

/// Trend anchors: FORTRAN at ten years, agentic assistants at two weeks
const TREND_START: (f64, f64) = (1957.0, 3650.0);
const TREND_END: (f64, f64) = (2026.0, 14.0);

const TICK_DAYS: [f64; 6] = [14.0, 30.0, 90.0, 365.0, 1095.0, 3650.0];
const TICK_LABELS: [&str; 6] = ["2 wk", "1 mo", "3 mo", "1 yr", "3 yr", "10 yr"];

const CAPTION: &str = "Adoption times compressed from ~10 years (1957) to ~60 days (ChatGPT). \
Trend line is visual guide, not causal model. \
Sources: Statista, Asymco, Epoch AI.";

pub fn default_style() -> ChartStyle {
    ChartStyle::new(
        CategoryPalette::new(CATEGORY_COLORS, "#7F8C8D"),
        ImpactScale::new(IMPACT_SIZES, 10.0),
    )
}

pub fn style(config: &TomlConfig) -> ChartStyle {
    default_style().with_override(config.style_override(STYLE_NAME))
}

pub fn marker_shape(adoption: &Adoption) -> MarkerShape {
    if adoption.is_speculative() {
        MarkerShape::Diamond
    } else {
        MarkerShape::Circle
    }
}

pub fn hover_text(adoption: &Adoption) -> String {
    format!(
        "<b>{}</b><br>Year: {}<br>Time to 50M: <b>{}</b><br>Category: {}<br>Impact: {}",
        adoption.event,
        adoption.year,
        days_to_readable(adoption.days),
        adoption.category,
        adoption.impact
    )
}

/// Build the adoption figure
pub fn build(adoptions: &[Adoption], style: &ChartStyle, variant: Variant) -> Figure {
    let mut sorted: Vec<&Adoption> = adoptions.iter().collect();
    sorted.sort_by_key(|a| a.year);

    let mut figure = Figure::new(layout(variant));

    for (start, end, fill) in ERAS {
        figure.add_shape(Shape::vertical_band(start, end, fill));
    }

    let (x, y) = coordinates(&sorted);
    figure.add_trace(
        Trace::scatter(x, y, Mode::Lines)
            .line(Line::new("rgba(100,100,100,0.25)", 1.5))
            .decoration(),
    );

    match ExponentialTrend::through(TREND_START.0, TREND_START.1, TREND_END.0, TREND_END.1) {
        Some(trend) => {
            let years = linspace(1957.0, 2030.0, 100);
            figure.add_trace(
                Trace::scatter(years.clone(), trend.sample(&years), Mode::Lines)
                    .line(Line::new("rgba(230,126,34,0.4)", 1.5).dash(Dash::Dash))
                    .name(TREND_TRACE_NAME)
                    .hover_template("Exponential fit<br>Year: %{x:.0f}<br>Days: %{y:.0f}<extra></extra>"),
            );
        }
        None => warn!("Adoption trend anchors are degenerate; trend line omitted"),
    }

    for category in categories_in_order(&sorted) {
        let members: Vec<&Adoption> = sorted
            .iter()
            .copied()
            .filter(|a| a.category == category)
            .collect();
        figure.add_trace(category_trace(&category, &members, style));
    }

    if variant == Variant::Interactive {
        for adoption in &sorted {
            if let Some(label) = labels::adoption_anchor(&adoption.event) {
                let ax = if adoption.year > 2000 { 0.0 } else { 20.0 };
                figure.add_annotation(
                    Annotation::text(label, adoption.year as f64, log_axis(adoption.days as f64))
                        .arrow(ax, -30.0, "rgba(100,100,100,0.5)")
                        .font(Font::colored(10.0, "#333"))
                        .boxed("rgba(255,255,255,0.85)", 3.0),
                );
            }
        }

        figure.add_annotation(
            Annotation::paper(CAPTION, 0.5, -0.12)
                .font(Font::colored(9.0, "#666"))
                .align("center"),
        );
    }

    figure
}

fn layout(variant: Variant) -> Layout {
    let (width, height) = match variant {
        Variant::Interactive => (1000, 600),
        Variant::Export => (900, 550),
    };
    let mut layout = Layout::standard(
        Title::centered(
            "<b>Time to Mass Adoption</b><br><sup>Days to ~50M Users (1957–2026)</sup>",
            18.0,
        ),
        width,
        height,
    );
    layout.xaxis = Some(
        Axis::titled("Year")
            .linear_range(1953.0, 2030.0)
            .linear_ticks(1960.0, 10.0)
            .grid("rgba(128,128,128,0.15)"),
    );
    layout.yaxis = Some(
        Axis::titled("Days to ~50M Users")
            .log_range(10.0, 10000.0)
            .grid("rgba(128,128,128,0.2)")
            .labeled_ticks(&TICK_DAYS, &TICK_LABELS),
    );
    layout.legend = Some(
        Legend::anchored(0.5, "center", 1.02, "bottom")
            .horizontal()
            .font(Font::sized(9.0)),
    );
    layout.margin = Some(Margin {
        t: Some(100.0),
        b: Some(80.0),
        l: Some(60.0),
        r: Some(40.0),
    });
    layout
}

fn coordinates(adoptions: &[&Adoption]) -> (Vec<f64>, Vec<f64>) {
    adoptions
        .iter()
        .map(|a| (a.year as f64, a.days as f64))
        .unzip()
}

/// Distinct categories in first-appearance order
fn categories_in_order(sorted: &[&Adoption]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for adoption in sorted {
        if !categories.contains(&adoption.category) {
            categories.push(adoption.category.clone());
        }
    }
    categories
}

fn category_trace(category: &str, members: &[&Adoption], style: &ChartStyle) -> Trace {
    let (x, y) = coordinates(members);
    let sizes = members
        .iter()
        .map(|a| style.impact_sizes.size_for(&a.impact))
        .collect();
    let symbols = members
        .iter()
        .map(|a| marker_shape(a).plotly_symbol().to_string())
        .collect();

    Trace::scatter(x, y, Mode::Markers)
        .marker(
            Marker::new(OneOrMany::Many(sizes), style.palette.color_for(category))
                .symbol(OneOrMany::Many(symbols))
                .outline(1.5, "white"),
        )
        .name(category)
        .hover_text(members.iter().map(|a| hover_text(a)).collect())
}
