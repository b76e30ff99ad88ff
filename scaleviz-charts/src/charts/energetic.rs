//! Energetic Scaling
//!
//! Two panels side by side. Left: neurons per kilogram against body mass on
//! log-log axes, one trace per clade with fitted power-law trends. Right:
//! compute per dollar by year on a log axis with a semi-log "Kurzweil" fit,
//! frontier training runs overlaid as diamonds (FLOPs scaled by 1e-12 to
//! share the axis).

use super::{log_axis, Variant};
use crate::data::energetic::{organisms_in, Organism, AI_MODELS, BIO_GROUPS, HARDWARE, ORGANISMS};
use crate::labels::{self, BIOLOGY_LABELS, TECHNOLOGY_LABELS};
use scaleviz_common::config::TomlConfig;
use scaleviz_common::figure::{
    Annotation, Axis, Dash, Figure, Font, Layout, Legend, Line, Margin, Marker, Mode, OneOrMany,
    Shape, Title, Trace,
};
use scaleviz_common::readable::{scientific, significant};
use scaleviz_common::style::{CategoryPalette, ImpactScale};
use scaleviz_common::trend::{linspace, logspace, LinearFit, PowerLaw};
use scaleviz_common::{ChartStyle, MarkerShape};
use tracing::warn;

/// Config keys for style overrides
pub const BIOLOGY_STYLE_NAME: &str = "energetic_biology";
pub const TECHNOLOGY_STYLE_NAME: &str = "energetic_technology";

/// Factor mapping training FLOPs onto the cps/$ axis
pub const AI_FLOPS_SCALE: f64 = 1e-12;

pub const HARDWARE_TRACE_NAME: &str = "Hardware (cps/$)";
pub const AI_TRACE_NAME: &str = "AI Models (FLOPs)";
pub const REFERENCE_TRACE_NAME: &str = "Reference slope -0.3";

const HUMAN: &str = "Human";
const HUMAN_SIZE_FACTOR: f64 = 1.5;

const BIO_COLORS: &[(&str, &str)] = &[
    ("Reptiles", "#7F8C8D"),
    ("Birds", "#27AE60"),
    ("Mammals", "#3498DB"),
    ("Primates", "#9B59B6"),
];

const TECH_COLORS: &[(&str, &str)] = &[("Hardware", "#E67E22"), ("AI", "#E74C3C")];

const IMPACT_SIZES: &[(&str, f64)] = &[
    ("Transformative", 22.0),
    ("High", 14.0),
    ("Medium", 10.0),
    ("Low", 7.0),
];

/// Neuron-density reference: 5e9·m^-0.3
const REFERENCE_SLOPE: PowerLaw = PowerLaw {
    coefficient: 5e9,
    exponent: -0.3,
};

/// Subplot domains on the shared paper
const LEFT_DOMAIN: [f64; 2] = [0.0, 0.44];
const RIGHT_DOMAIN: [f64; 2] = [0.56, 1.0];

const FOOTNOTE: &str = "Log-log plots reveal power laws. Biology: Neurons/kg shows clade differences; \
humans outlier (EQ~7). Tech: cps/$ mirrors Kurzweil's ~75 quadrillion-fold increase (1939–2024).<br>\
Sources: Herculano-Houzel (neuronal), Kleiber (metabolic 0.75), Kaplan/Charnov (LHT), Kurzweil. Jan 2026.";

/// Styles for the two panels
#[derive(Debug, Clone, PartialEq)]
pub struct EnergeticStyles {
    pub biology: ChartStyle,
    pub technology: ChartStyle,
}

impl Default for EnergeticStyles {
    fn default() -> Self {
        Self {
            biology: ChartStyle::new(
                CategoryPalette::new(BIO_COLORS, "#333333"),
                ImpactScale::new(IMPACT_SIZES, 10.0),
            ),
            technology: ChartStyle::new(
                CategoryPalette::new(TECH_COLORS, "#E67E22"),
                ImpactScale::new(IMPACT_SIZES, 10.0),
            ),
        }
    }
}

pub fn styles(config: &TomlConfig) -> EnergeticStyles {
    let defaults = EnergeticStyles::default();
    EnergeticStyles {
        biology: defaults
            .biology
            .with_override(config.style_override(BIOLOGY_STYLE_NAME)),
        technology: defaults
            .technology
            .with_override(config.style_override(TECHNOLOGY_STYLE_NAME)),
    }
}

/// Log-log fit of neuron density against body mass for one group
pub fn group_trend(group: &str) -> Option<LinearFit> {
    let (masses, densities): (Vec<f64>, Vec<f64>) = organisms_in(group)
        .map(|o| (o.body_mass_kg, o.neurons_per_kg))
        .unzip();
    LinearFit::log_log(&masses, &densities)
}

/// Semi-log fit of compute per dollar against year
pub fn hardware_trend() -> Option<LinearFit> {
    let (years, cps): (Vec<f64>, Vec<f64>) = HARDWARE
        .iter()
        .map(|p| (p.year as f64, p.cps_per_dollar))
        .unzip();
    LinearFit::semi_log(&years, &cps)
}

pub fn build(styles: &EnergeticStyles, variant: Variant) -> Figure {
    let mut figure = Figure::new(layout());

    add_biology_panel(&mut figure, &styles.biology);
    add_technology_panel(&mut figure, &styles.technology);

    if variant == Variant::Export {
        add_entity_labels(&mut figure);
    }

    figure.add_annotation(
        Annotation::paper(FOOTNOTE, 0.5, -0.18)
            .font(Font::colored(10.0, "#666"))
            .align("center"),
    );

    figure
}

fn layout() -> Layout {
    let mut layout = Layout::standard(
        Title::centered(
            "<b>Energetic Scaling</b><br>\
             <sup>Neural Efficiency (Biology) vs. Compute Efficiency (Technology)</sup>",
            20.0,
        ),
        1500,
        700,
    );
    layout.xaxis = Some(
        Axis::titled("Body Mass (kg)")
            .log_range(1e-3, 1e4)
            .grid("rgba(128,128,128,0.2)")
            .placed(LEFT_DOMAIN, "y"),
    );
    layout.yaxis = Some(
        Axis::titled("Neurons per kg Body Mass")
            .log_range(1e5, 1e11)
            .grid("rgba(128,128,128,0.2)")
            .placed([0.0, 1.0], "x"),
    );
    layout.xaxis2 = Some(
        Axis::titled("Year")
            .linear_range(1935.0, 2030.0)
            .grid("rgba(128,128,128,0.2)")
            .placed(RIGHT_DOMAIN, "y2"),
    );
    layout.yaxis2 = Some(
        Axis::titled("Compute per Dollar (cps/$)")
            .log_range(1e-7, 1e13)
            .grid("rgba(128,128,128,0.2)")
            .placed([0.0, 1.0], "x2"),
    );
    layout.legend = Some(
        Legend::anchored(0.5, "center", -0.2, "bottom")
            .horizontal()
            .background("rgba(255,255,255,0.9)"),
    );
    layout.margin = Some(Margin {
        t: Some(120.0),
        b: Some(150.0),
        ..Margin::default()
    });

    layout.annotations.push(subplot_title(
        "<b>Biological Allometry</b><br><sup>Neural Efficiency vs. Body Size</sup>",
        LEFT_DOMAIN,
    ));
    layout.annotations.push(subplot_title(
        "<b>Tech Scaling (Kurzweil-inspired)</b><br><sup>Compute Efficiency vs. Time</sup>",
        RIGHT_DOMAIN,
    ));
    layout
}

fn subplot_title(text: &str, domain: [f64; 2]) -> Annotation {
    Annotation::paper(text, (domain[0] + domain[1]) / 2.0, 1.0)
        .anchor("center", "bottom")
        .font(Font::sized(16.0))
}

fn organism_hover(o: &Organism) -> String {
    format!(
        "<b>{}</b><br>Body Mass: {} kg<br>Total Neurons: {}<br>Neurons/kg: {}<br>Group: {}<br>Impact: {}<br><i>{}</i>",
        o.entity,
        significant(o.body_mass_kg, 4),
        scientific(o.neurons),
        scientific(o.neurons_per_kg),
        o.group,
        o.impact,
        o.notes
    )
}

fn add_biology_panel(figure: &mut Figure, style: &ChartStyle) {
    for group in BIO_GROUPS {
        let members: Vec<&Organism> = organisms_in(group).collect();
        if members.is_empty() {
            continue;
        }

        let sizes = members
            .iter()
            .map(|o| {
                let size = style.impact_sizes.size_for(o.impact);
                if o.entity == HUMAN {
                    size * HUMAN_SIZE_FACTOR
                } else {
                    size
                }
            })
            .collect();
        let symbols = members
            .iter()
            .map(|o| {
                let shape = if o.entity == HUMAN {
                    MarkerShape::Star
                } else {
                    MarkerShape::Circle
                };
                shape.plotly_symbol().to_string()
            })
            .collect();

        figure.add_trace(
            Trace::scatter(
                members.iter().map(|o| o.body_mass_kg).collect(),
                members.iter().map(|o| o.neurons_per_kg).collect(),
                Mode::Markers,
            )
            .marker(
                Marker::new(OneOrMany::Many(sizes), style.palette.color_for(group))
                    .symbol(OneOrMany::collapse(symbols))
                    .outline(1.0, "white"),
            )
            .name(group)
            .hover_text(members.iter().map(|o| organism_hover(o)).collect())
            .legend_group("bio", Some("Biology")),
        );
    }

    for (group, exponent_range) in [("Mammals", (-2.0, 4.0)), ("Primates", (-1.0, 2.0))] {
        match group_trend(group) {
            Some(fit) => {
                let masses = logspace(exponent_range.0, exponent_range.1, 50);
                figure.add_trace(
                    Trace::scatter(masses.clone(), fit.sample(&masses), Mode::Lines)
                        .line(Line::new(style.palette.color_for(group), 2.0).dash(Dash::Dash))
                        .name(format!("{} trend (slope={:.2})", group, fit.slope))
                        .skip_hover()
                        .legend_group("bio", None),
                );
            }
            None => warn!("Not enough {} data for a trend line", group),
        }
    }

    let masses = logspace(-3.0, 4.0, 100);
    figure.add_trace(
        Trace::scatter(masses.clone(), REFERENCE_SLOPE.sample(&masses), Mode::Lines)
            .line(Line::new("rgba(128,128,128,0.4)", 1.5).dash(Dash::Dot))
            .name(REFERENCE_TRACE_NAME)
            .skip_hover()
            .legend_group("bio", None),
    );

    figure.add_shape(Shape::horizontal_band(
        log_axis(1e9),
        log_axis(1e11),
        "rgba(231,76,60,0.1)",
    ));
    figure.add_annotation(
        Annotation::text("Endotherm<br>advantage zone", log_axis(1e-3), log_axis(3e10))
            .anchor("left", "bottom")
            .font(Font::colored(8.0, "rgba(231,76,60,0.6)")),
    );
}

fn add_technology_panel(figure: &mut Figure, style: &ChartStyle) {
    let hardware_color = style.palette.color_for("Hardware").to_string();
    let ai_color = style.palette.color_for("AI").to_string();

    figure.add_trace(
        Trace::scatter(
            HARDWARE.iter().map(|p| p.year as f64).collect(),
            HARDWARE.iter().map(|p| p.cps_per_dollar).collect(),
            Mode::Markers,
        )
        .marker(
            Marker::new(
                OneOrMany::Many(
                    HARDWARE
                        .iter()
                        .map(|p| style.impact_sizes.size_for(p.impact))
                        .collect(),
                ),
                hardware_color.as_str(),
            )
            .outline(1.0, "white"),
        )
        .name(HARDWARE_TRACE_NAME)
        .hover_text(
            HARDWARE
                .iter()
                .map(|p| {
                    format!(
                        "<b>{}</b><br>Year: {}<br>Compute/$ (cps): {}<br>Impact: {}<br><i>{}</i>",
                        p.entity,
                        p.year,
                        scientific(p.cps_per_dollar),
                        p.impact,
                        p.notes
                    )
                })
                .collect(),
        )
        .legend_group("tech", Some("Technology"))
        .axes("x2", "y2"),
    );

    match hardware_trend() {
        Some(fit) => {
            let years = linspace(1935.0, 2030.0, 50);
            figure.add_trace(
                Trace::scatter(years.clone(), fit.sample(&years), Mode::Lines)
                    .line(Line::new(hardware_color.as_str(), 2.0).dash(Dash::Dash))
                    .name(format!("Kurzweil trend (~{:.1}x/yr)", fit.growth_factor()))
                    .skip_hover()
                    .legend_group("tech", None)
                    .axes("x2", "y2"),
            );
        }
        None => warn!("Not enough hardware data for a trend line"),
    }

    figure.add_trace(
        Trace::scatter(
            AI_MODELS.iter().map(|m| m.year as f64).collect(),
            AI_MODELS.iter().map(|m| m.flops * AI_FLOPS_SCALE).collect(),
            Mode::Markers,
        )
        .marker(
            Marker::new(
                OneOrMany::Many(
                    AI_MODELS
                        .iter()
                        .map(|m| style.impact_sizes.size_for(m.impact))
                        .collect(),
                ),
                ai_color.as_str(),
            )
            .symbol(OneOrMany::One(MarkerShape::Diamond.plotly_symbol().to_string()))
            .outline(1.0, "white"),
        )
        .name(AI_TRACE_NAME)
        .hover_text(
            AI_MODELS
                .iter()
                .map(|m| {
                    format!(
                        "<b>{}</b><br>Year: {}<br>Training FLOPs: {}<br>Impact: {}<br><i>{}</i>",
                        m.entity,
                        m.year,
                        scientific(m.flops),
                        m.impact,
                        m.notes
                    )
                })
                .collect(),
        )
        .legend_group("tech", None)
        .axes("x2", "y2"),
    );

    figure.add_shape(Shape::vertical_band_on(
        2012.0,
        2030.0,
        "rgba(231,76,60,0.1)",
        "x2",
        "y2",
    ));
    figure.add_annotation(
        Annotation::text("AI Scaling<br>Explosion", 2015.0, log_axis(1e-5))
            .on_axes("x2", "y2")
            .anchor("left", "bottom")
            .font(Font::colored(9.0, "rgba(231,76,60,0.6)")),
    );
}

/// Static-layout labels for notable entities on both panels
fn add_entity_labels(figure: &mut Figure) {
    for organism in ORGANISMS {
        if let Some((mass_factor, value_factor, text)) =
            labels::entity_label(BIOLOGY_LABELS, organism.entity)
        {
            let size = if organism.entity == HUMAN { 9.0 } else { 8.0 };
            figure.add_annotation(
                Annotation::text(
                    text,
                    log_axis(organism.body_mass_kg),
                    log_axis(organism.neurons_per_kg),
                )
                .arrow_from_axis(
                    log_axis(organism.body_mass_kg * mass_factor),
                    log_axis(organism.neurons_per_kg * value_factor),
                    "rgba(128,128,128,0.5)",
                )
                .anchor("left", "bottom")
                .font(Font::sized(size)),
            );
        }
    }

    for processor in HARDWARE {
        if let Some((year_offset, value_factor, text)) =
            labels::entity_label(TECHNOLOGY_LABELS, processor.entity)
        {
            let size = if processor.entity.contains("B200") { 9.0 } else { 8.0 };
            figure.add_annotation(
                Annotation::text(text, processor.year as f64, log_axis(processor.cps_per_dollar))
                    .on_axes("x2", "y2")
                    .arrow_from_axis(
                        processor.year as f64 + year_offset,
                        log_axis(processor.cps_per_dollar * value_factor),
                        "rgba(128,128,128,0.5)",
                    )
                    .anchor("left", "bottom")
                    .font(Font::sized(size)),
            );
        }
    }

    for model in AI_MODELS
        .iter()
        .filter(|m| m.entity.contains("GPT-3") || m.entity.contains("Grok"))
    {
        let label = model.entity.split_whitespace().next().unwrap_or(model.entity);
        let scaled = model.flops * AI_FLOPS_SCALE;
        figure.add_annotation(
            Annotation::text(label, model.year as f64, log_axis(scaled))
                .on_axes("x2", "y2")
                .arrow_from_axis(
                    model.year as f64 + 1.0,
                    log_axis(scaled * 2.0),
                    "rgba(231,76,60,0.4)",
                )
                .font(Font::colored(8.0, "#E74C3C")),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace<'a>(figure: &'a Figure, name: &str) -> &'a Trace {
        figure
            .data
            .iter()
            .find(|t| t.name.as_deref() == Some(name))
            .unwrap_or_else(|| panic!("missing trace {}", name))
    }

    #[test]
    fn test_group_traces_on_left_panel() {
        let figure = build(&EnergeticStyles::default(), Variant::Interactive);
        for group in BIO_GROUPS {
            let t = trace(&figure, group);
            assert!(t.xaxis.is_none());
            assert_eq!(t.legendgroup.as_deref(), Some("bio"));
        }
        let primates = trace(&figure, "Primates");
        let marker = primates.marker.as_ref().unwrap();
        assert_eq!(
            marker.symbol,
            Some(OneOrMany::Many(vec![
                "circle".to_string(),
                "circle".to_string(),
                "circle".to_string(),
                "star".to_string(),
            ]))
        );
        // Human: Transformative size enlarged
        assert_eq!(marker.size, OneOrMany::Many(vec![14.0, 14.0, 14.0, 33.0]));
    }

    #[test]
    fn test_mammal_trend_slope_in_name() {
        let fit = group_trend("Mammals").unwrap();
        assert!(fit.slope < 0.0);
        let figure = build(&EnergeticStyles::default(), Variant::Interactive);
        let name = format!("Mammals trend (slope={:.2})", fit.slope);
        let t = trace(&figure, &name);
        assert_eq!(t.x.len(), 50);
        assert!((t.x[0] - 0.01).abs() < 1e-12);
        assert!(figure
            .data
            .iter()
            .any(|t| t.name.as_deref().map_or(false, |n| n.starts_with("Primates trend"))));
    }

    #[test]
    fn test_kurzweil_growth_factor() {
        let fit = hardware_trend().unwrap();
        // 6.5e-6 in 1939 to 2e12 in 2026 is ~17.5 orders of magnitude
        assert!(fit.growth_factor() > 1.3 && fit.growth_factor() < 1.8);
        assert!(fit.r > 0.95);
    }

    #[test]
    fn test_ai_models_scaled_onto_right_panel() {
        let figure = build(&EnergeticStyles::default(), Variant::Interactive);
        let ai = trace(&figure, AI_TRACE_NAME);
        assert_eq!(ai.xaxis.as_deref(), Some("x2"));
        assert_eq!(ai.yaxis.as_deref(), Some("y2"));
        assert!((ai.y[2] - 3.14e11).abs() / 3.14e11 < 1e-12);
        assert!(ai.text.as_ref().unwrap()[2].contains("Training FLOPs: 3.14e+23"));

        let band = figure
            .layout
            .shapes
            .iter()
            .find(|s| s.xref == "x2")
            .unwrap();
        assert_eq!((band.x0, band.x1), (2012.0, 2030.0));
        assert_eq!(band.yref, "y2 domain");
    }

    #[test]
    fn test_hover_formats() {
        let goldcrest = ORGANISMS.iter().find(|o| o.entity == "Goldcrest").unwrap();
        let text = organism_hover(goldcrest);
        assert!(text.contains("Body Mass: 0.0045 kg"));
        assert!(text.contains("Neurons/kg: 3.64e+10"));
    }

    #[test]
    fn test_entity_labels_only_in_export() {
        let interactive = build(&EnergeticStyles::default(), Variant::Interactive);
        assert!(!interactive.layout.annotations.iter().any(|a| a.showarrow));

        let export = build(&EnergeticStyles::default(), Variant::Export);
        let labels: Vec<&str> = export
            .layout
            .annotations
            .iter()
            .filter(|a| a.showarrow)
            .map(|a| a.text.as_str())
            .collect();
        assert_eq!(labels.len(), BIOLOGY_LABELS.len() + TECHNOLOGY_LABELS.len() + 2);
        assert!(labels.contains(&"GPT-3"));
        assert!(labels.contains(&"Grok-4"));
        assert!(labels.contains(&"Corvid"));
    }

    #[test]
    fn test_subplot_layout() {
        let figure = build(&EnergeticStyles::default(), Variant::Interactive);
        let layout = &figure.layout;
        assert_eq!(layout.xaxis.as_ref().unwrap().domain, Some(LEFT_DOMAIN));
        assert_eq!(layout.xaxis2.as_ref().unwrap().anchor.as_deref(), Some("y2"));
        assert_eq!(layout.yaxis2.as_ref().unwrap().anchor.as_deref(), Some("x2"));
        assert_eq!(layout.width, Some(1500));
    }
}
