//! History of Compute & Intelligence
//!
//! Semi-log timeline of training compute for AI milestones, 1900 onward.
//! Milestones with no usable compute estimate sit at a year-bucket proxy;
//! the connecting line is dashed through that proxy era and solid after it.

use super::{log_axis, truncate_chars, Variant};
use crate::data::milestones::{Milestone, MEASURED_ERA_START};
use crate::labels;
use scaleviz_common::config::TomlConfig;
use scaleviz_common::figure::{
    Annotation, Axis, Dash, Figure, Font, Layout, Legend, Line, Margin, Marker, Mode, OneOrMany,
    Shape, Title, Trace,
};
use scaleviz_common::style::{CategoryPalette, ImpactScale};
use scaleviz_common::trend::{linspace, DoublingTrend};
use scaleviz_common::{ChartStyle, MarkerShape};

/// Config key for style overrides
pub const STYLE_NAME: &str = "ai_compute";

pub const MOORE_TRACE_NAME: &str = "Moore's Law trajectory";

const HOVER_EVENT_CHARS: usize = 60;

const CATEGORY_COLORS: &[(&str, &str)] = &[
    ("Hardware", "#E67E22"),
    ("Theoretical Foundation", "#7F8C8D"),
    ("AI Milestone", "#16A085"),
    ("Model Release", "#8E44AD"),
    ("Model/Architecture", "#9B59B6"),
    ("Dataset", "#27AE60"),
    ("Robotics", "#E74C3C"),
    ("AI Winter", "#BDC3C7"),
    ("Infrastructure", "#8B4513"),
    ("Generative", "#FF69B4"),
    ("Reasoning/Agentic", "#1D8348"),
    ("Quantum/Future Speculative", "#9B59B6"),
    ("Speculative", "#9B59B6"),
    ("Other", "#3498DB"),
];

const IMPACT_SIZES: &[(&str, f64)] = &[
    ("Transformative", 22.0),
    ("Speculative Transformative", 18.0),
    ("High", 14.0),
    ("Speculative High", 12.0),
    ("Medium", 10.0),
    ("Low", 8.0),
];

/// Shaded eras: start, end, fill, label
const ERAS: [(f64, f64, &str, &str); 6] = [
    (1900.0, 1940.0, "rgba(200,200,200,0.2)", "Mechanical & Theoretical"),
    (1940.0, 1960.0, "rgba(100,150,220,0.2)", "Electronic Dawn"),
    (1960.0, 2000.0, "rgba(100,200,100,0.2)", "Moore's Law Scaling"),
    (2000.0, 2012.0, "rgba(255,200,100,0.2)", "Parallel & Early Deep"),
    (2012.0, 2022.0, "rgba(180,150,220,0.2)", "Deep Learning Big Bang"),
    (2022.0, 2027.0, "rgba(255,150,150,0.2)", "Reasoning & Agentic Era"),
];

const NOTE: &str = "Log scale: exponential growth appears as straight lines.<br>\
Pre-2010 values are rough proxies (ops/sec, not directly comparable).<br>\
Speculative 2026+ points marked with diamonds.<br>\
Sources: Epoch AI, Our World in Data. Estimates as of Jan 2026.";

/// Built-in style
pub fn default_style() -> ChartStyle {
    ChartStyle::new(
        CategoryPalette::new(CATEGORY_COLORS, "#3498DB"),
        ImpactScale::new(IMPACT_SIZES, 10.0),
    )
}

/// Built-in style with any configured override applied
pub fn style(config: &TomlConfig) -> ChartStyle {
    default_style().with_override(config.style_override(STYLE_NAME))
}

/// Marker shape: projections as diamonds, AI winters as downward triangles
pub fn marker_shape(milestone: &Milestone) -> MarkerShape {
    if milestone.is_speculative() {
        MarkerShape::Diamond
    } else if milestone.is_winter() {
        MarkerShape::TriangleDown
    } else {
        MarkerShape::Circle
    }
}

/// Hover label for one milestone
pub fn hover_text(milestone: &Milestone) -> String {
    format!(
        "<b>{}...</b><br>Year: {}<br>Category: {}<br>Compute: {}<br>Parameters: {}<br>Impact: {}",
        truncate_chars(&milestone.event, HOVER_EVENT_CHARS),
        milestone.year,
        milestone.category,
        milestone.compute_raw,
        milestone.parameters,
        milestone.impact
    )
}

/// Build the timeline figure
pub fn build(milestones: &[Milestone], style: &ChartStyle, variant: Variant) -> Figure {
    let mut sorted: Vec<&Milestone> = milestones.iter().collect();
    sorted.sort_by_key(|m| m.year);

    let mut figure = Figure::new(layout());

    for (start, end, fill, label) in ERAS {
        figure.add_shape(Shape::vertical_band(start, end, fill));
        figure.add_annotation(
            Annotation::text(label, (start + end) / 2.0, 1.0)
                .on_axes("x", "paper")
                .anchor("center", "bottom")
                .font(Font::colored(10.0, "gray")),
        );
    }

    add_connecting_lines(&mut figure, &sorted);

    for (category, members) in group_by_primary_category(&sorted) {
        figure.add_trace(category_trace(&category, &members, style));
    }

    let moore = DoublingTrend::moores_law();
    let moore_years = linspace(1965.0, 2005.0, 100);
    figure.add_trace(
        Trace::scatter(moore_years.clone(), moore.sample(&moore_years), Mode::Lines)
            .line(Line::new("#E67E22", 2.0).dash(Dash::Dash))
            .name(MOORE_TRACE_NAME)
            .skip_hover(),
    );

    match variant {
        Variant::Interactive => add_key_event_labels(&mut figure, &sorted),
        Variant::Export => add_placed_labels(&mut figure, &sorted),
    }

    figure.add_annotation(
        Annotation::text(
            "<b>2023–25 Frontier Cluster</b><br>(10²⁴–10²⁶ FLOPs)",
            2022.5,
            log_axis(3e25),
        )
        .font(Font::colored(10.0, "#444"))
        .boxed("rgba(255,255,255,0.85)", 4.0)
        .anchor("right", "middle"),
    );

    figure.add_annotation(
        Annotation::paper(NOTE, 0.01, 0.01)
            .font(Font::colored(9.0, "#666"))
            .boxed("rgba(255,255,255,0.9)", 5.0)
            .anchor("left", "bottom")
            .align("left"),
    );

    figure
}

fn layout() -> Layout {
    let mut layout = Layout::standard(
        Title::centered(
            "<b>History of Compute & Intelligence</b><br>\
             <sup>Training FLOPs for Key AI Milestones (1900–2026)</sup>",
            20.0,
        ),
        1400,
        800,
    );
    layout.xaxis = Some(
        Axis::titled("Year")
            .linear_range(1898.0, 2028.0)
            .linear_ticks(1900.0, 10.0)
            .minor_ticks(1900.0, 5.0)
            .grid("rgba(128,128,128,0.2)"),
    );
    layout.yaxis = Some(
        Axis::titled("Total Training Compute (FLOPs, log₁₀)")
            .log_range(1e1, 1e29)
            .grid("rgba(128,128,128,0.3)")
            .tick_format(".0e"),
    );
    layout.legend = Some(
        Legend::anchored(1.02, "left", 0.99, "top")
            .titled("Category")
            .background("rgba(255,255,255,0.9)"),
    );
    layout.margin = Some(Margin {
        r: Some(200.0),
        t: Some(100.0),
        b: Some(80.0),
        ..Margin::default()
    });
    layout
}

fn add_connecting_lines(figure: &mut Figure, sorted: &[&Milestone]) {
    let (proxy_era, measured_era): (Vec<&Milestone>, Vec<&Milestone>) =
        sorted.iter().copied().partition(|m| m.year < MEASURED_ERA_START);

    if !proxy_era.is_empty() {
        let (x, y) = coordinates(&proxy_era);
        figure.add_trace(
            Trace::scatter(x, y, Mode::Lines)
                .line(Line::new("rgba(50,50,50,0.25)", 1.0).dash(Dash::Dash))
                .name("Pre-2010 (proxy)")
                .decoration(),
        );
    }

    if !measured_era.is_empty() {
        let (x, y) = coordinates(&measured_era);
        figure.add_trace(
            Trace::scatter(x, y, Mode::Lines)
                .line(Line::new("rgba(50,50,50,0.4)", 1.5))
                .name("Post-2010 (actual)")
                .decoration(),
        );
    }
}

fn coordinates(milestones: &[&Milestone]) -> (Vec<f64>, Vec<f64>) {
    milestones
        .iter()
        .map(|m| (m.year as f64, m.placement()))
        .unzip()
}

/// Group by primary category, keeping first-appearance order
fn group_by_primary_category<'a>(sorted: &[&'a Milestone]) -> Vec<(String, Vec<&'a Milestone>)> {
    let mut groups: Vec<(String, Vec<&'a Milestone>)> = Vec::new();
    for milestone in sorted {
        match groups
            .iter_mut()
            .find(|(category, _)| *category == milestone.primary_category)
        {
            Some((_, members)) => members.push(*milestone),
            None => groups.push((milestone.primary_category.clone(), vec![*milestone])),
        }
    }
    groups
}

fn category_trace(category: &str, members: &[&Milestone], style: &ChartStyle) -> Trace {
    let (x, y) = coordinates(members);
    let sizes = members
        .iter()
        .map(|m| style.impact_sizes.size_for(&m.impact))
        .collect();
    let symbols = members
        .iter()
        .map(|m| marker_shape(m).plotly_symbol().to_string())
        .collect();

    Trace::scatter(x, y, Mode::Markers)
        .marker(
            Marker::new(OneOrMany::Many(sizes), style.palette.color_for(category))
                .symbol(OneOrMany::collapse(symbols))
                .outline(1.0, "white"),
        )
        .name(category)
        .hover_text(members.iter().map(|m| hover_text(m)).collect())
}

fn add_key_event_labels(figure: &mut Figure, sorted: &[&Milestone]) {
    for milestone in sorted {
        if let Some(label) = labels::key_event_label(milestone.year, &milestone.event) {
            figure.add_annotation(
                Annotation::text(label, milestone.year as f64, log_axis(milestone.placement()))
                    .arrow(30.0, -40.0, "gray")
                    .font(Font::colored(9.0, "#333"))
                    .boxed("rgba(255,255,255,0.8)", 2.0),
            );
        }
    }
}

fn add_placed_labels(figure: &mut Figure, sorted: &[&Milestone]) {
    for milestone in sorted {
        let Some(label) = labels::short_label(&milestone.event) else {
            continue;
        };
        let Some(placement) = labels::placement_for(label) else {
            continue;
        };

        let year = milestone.year as f64;
        let value = milestone.placement();
        let font_size = if milestone.impact.contains("Transformative") {
            9.0
        } else {
            8.0
        };
        let xanchor = if placement.is_leftward() { "right" } else { "left" };

        figure.add_annotation(
            Annotation::text(label, year, log_axis(value))
                .arrow_from_axis(
                    year + placement.year_offset,
                    log_axis(value * placement.value_multiplier),
                    "rgba(128,128,128,0.4)",
                )
                .font(Font::sized(font_size))
                .anchor(xanchor, "middle")
                // Plotly rotates clockwise
                .rotated(-placement.rotation),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::milestones::parse_milestones;

    const SAMPLE: &str = "\
Year,Event,Category,Compute_FLOPs,Parameters,Impact
2020,GPT-3,Model Release; Generative,3.14E+23,175B,Transformative
1945,ENIAC completed,Hardware,Proxy ~5e3 ops/sec,,High
1974,First AI Winter,AI Winter,N/A,,
2023,Gemini 1.0 / Llama 2,Model Release,~few e24,,High
2026,Agentic AI at scale,Reasoning/Agentic,Speculative,,Speculative Transformative
";

    fn sample() -> Vec<Milestone> {
        parse_milestones(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_marker_policy() {
        let milestones = sample();
        let shape = |event: &str| {
            marker_shape(milestones.iter().find(|m| m.event.starts_with(event)).unwrap())
        };
        assert_eq!(shape("GPT-3"), MarkerShape::Circle);
        assert_eq!(shape("First AI Winter"), MarkerShape::TriangleDown);
        assert_eq!(shape("Agentic"), MarkerShape::Diamond);
    }

    #[test]
    fn test_hover_text_truncates_event() {
        let mut milestone = sample().remove(0);
        milestone.event = "x".repeat(100);
        let text = hover_text(&milestone);
        assert!(text.starts_with(&format!("<b>{}...</b>", "x".repeat(60))));
        assert!(text.contains("Compute: 3.14E+23"));
        assert!(text.contains("Parameters: 175B"));
        assert!(text.contains("Impact: Transformative"));
    }

    #[test]
    fn test_category_traces_in_first_appearance_order() {
        let figure = build(&sample(), &default_style(), Variant::Interactive);
        let names: Vec<&str> = figure
            .data
            .iter()
            .filter(|t| t.mode == Mode::Markers)
            .filter_map(|t| t.name.as_deref())
            .collect();
        assert_eq!(
            names,
            vec!["Hardware", "AI Winter", "Model Release", "Reasoning/Agentic"]
        );

        let model_release = figure.traces_named("Model Release").next().unwrap();
        assert_eq!(model_release.x, vec![2020.0, 2023.0]);
        assert_eq!(model_release.y, vec![3.14e23, 3e24]);
    }

    #[test]
    fn test_connecting_lines_split_at_2010() {
        let figure = build(&sample(), &default_style(), Variant::Interactive);
        let proxy = figure.traces_named("Pre-2010 (proxy)").next().unwrap();
        assert_eq!(proxy.x, vec![1945.0, 1974.0]);
        assert_eq!(proxy.y, vec![5e3, 1e6]);
        assert_eq!(proxy.line.as_ref().unwrap().dash, Some(Dash::Dash));

        let measured = figure.traces_named("Post-2010 (actual)").next().unwrap();
        assert_eq!(measured.x, vec![2020.0, 2023.0, 2026.0]);
        assert_eq!(measured.showlegend, Some(false));
    }

    #[test]
    fn test_moore_reference_line() {
        let figure = build(&sample(), &default_style(), Variant::Export);
        let moore = figure.traces_named(MOORE_TRACE_NAME).next().unwrap();
        assert_eq!(moore.x.len(), 100);
        assert_eq!(moore.x[0], 1965.0);
        assert_eq!(moore.y[0], 1e6);
        let last = *moore.y.last().unwrap();
        assert!((last / 1.048576e12 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_interactive_labels_key_events_only() {
        let figure = build(&sample(), &default_style(), Variant::Interactive);
        let arrows: Vec<&Annotation> = figure
            .layout
            .annotations
            .iter()
            .filter(|a| a.showarrow)
            .collect();
        let texts: Vec<&str> = arrows.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, vec!["ENIAC", "GPT-3"]);
        assert_eq!(arrows[0].ax, Some(30.0));
        assert_eq!(arrows[0].ay, Some(-40.0));
        assert!(arrows[0].axref.is_none());
    }

    #[test]
    fn test_export_labels_use_placement_table() {
        let figure = build(&sample(), &default_style(), Variant::Export);
        let labelled: Vec<&Annotation> = figure
            .layout
            .annotations
            .iter()
            .filter(|a| a.showarrow)
            .collect();
        let texts: Vec<&str> = labelled.iter().map(|a| a.text.as_str()).collect();
        // Gemini/Llama2 is suppressed
        assert_eq!(texts, vec!["ENIAC", "AI Winter I", "GPT-3", "Agentic AI"]);

        let gpt3 = labelled[2];
        assert_eq!(gpt3.axref.as_deref(), Some("x"));
        assert!((gpt3.ax.unwrap() - 2020.8).abs() < 1e-9);
        assert_eq!(gpt3.textangle, Some(-35.0));
        assert_eq!(gpt3.font.as_ref().unwrap().size, Some(9.0));
        assert_eq!(labelled[0].font.as_ref().unwrap().size, Some(8.0));
    }

    #[test]
    fn test_layout_axes_and_bands() {
        let figure = build(&sample(), &default_style(), Variant::Interactive);
        let [low, high] = figure.layout.yaxis.as_ref().unwrap().range.unwrap();
        assert!((low - 1.0).abs() < 1e-9 && (high - 29.0).abs() < 1e-9);
        assert_eq!(figure.layout.xaxis.as_ref().unwrap().range, Some([1898.0, 2028.0]));
        assert_eq!(figure.layout.shapes.len(), ERAS.len());
        assert_eq!(figure.layout.width, Some(1400));
    }

    #[test]
    fn test_style_override_changes_colors() {
        let mut style = default_style();
        style.palette = CategoryPalette::new(&[("Hardware", "#000000")], "#FFFFFF");
        let figure = build(&sample(), &style, Variant::Interactive);
        let hardware = figure.traces_named("Hardware").next().unwrap();
        assert_eq!(hardware.marker.as_ref().unwrap().color, "#000000");
        let other = figure.traces_named("AI Winter").next().unwrap();
        assert_eq!(other.marker.as_ref().unwrap().color, "#FFFFFF");
    }
}
