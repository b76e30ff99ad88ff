//! Static SVG rendering of a figure with plotters
//!
//! Draws the subset of the figure model the charts use: up to two subplot
//! panels, linear or log axes, line and marker traces, rectangle shapes and
//! text annotations with straight arrows. Everything is drawn in axis units
//! (log10 on a log axis), the same units the figure model already stores for
//! ranges, shapes and annotations. Text rotation is not reproduced.

use super::{Annotation, Axis, AxisType, Dash, Figure, Mode, OneOrMany, Shape, Trace};
use crate::readable::significant;
use crate::{Error, Result};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::info;

type DrawResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;
type PanelChart<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const FONT: &str = "sans-serif";
const DEFAULT_SIZE: (u32, u32) = (1000, 600);
const DEFAULT_LINE: RGBAColor = RGBAColor(128, 128, 128, 1.0);

/// One subplot: its axis pair and the reference names bound to it
struct Panel<'a> {
    x_axis: &'a Axis,
    y_axis: &'a Axis,
    xref: &'static str,
    yref: &'static str,
}

/// Render the figure as an SVG document
pub fn render_svg(figure: &Figure) -> Result<String> {
    let size = (
        figure.layout.width.unwrap_or(DEFAULT_SIZE.0),
        figure.layout.height.unwrap_or(DEFAULT_SIZE.1),
    );

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw_figure(&root, figure).map_err(|e| Error::Render(e.to_string()))?;
        root.present().map_err(|e| Error::Render(e.to_string()))?;
    }
    Ok(svg)
}

/// Write the figure as a static SVG image
pub fn write_svg(figure: &Figure, path: &Path) -> Result<()> {
    let svg = render_svg(figure)?;
    std::fs::write(path, svg)?;
    info!("Saved: {}", path.display());
    Ok(())
}

fn draw_figure(root: &DrawingArea<SVGBackend<'_>, Shift>, figure: &Figure) -> DrawResult<()> {
    let layout = &figure.layout;
    root.fill(&WHITE)?;

    let plot_root = match &layout.title {
        Some(title) => {
            let size = title.font.as_ref().and_then(|f| f.size).unwrap_or(20.0);
            root.titled(&plain_text(&title.text), (FONT, size))?
        }
        None => root.clone(),
    };

    let default_axis = Axis::default();
    let first = Panel {
        x_axis: layout.xaxis.as_ref().unwrap_or(&default_axis),
        y_axis: layout.yaxis.as_ref().unwrap_or(&default_axis),
        xref: "x",
        yref: "y",
    };

    match (&layout.xaxis2, &layout.yaxis2) {
        (Some(x_axis), Some(y_axis)) => {
            let second = Panel {
                x_axis,
                y_axis,
                xref: "x2",
                yref: "y2",
            };
            let split = first_panel_width(&plot_root, first.x_axis, second.x_axis);
            let (left, right) = plot_root.split_horizontally(split);
            draw_panel(root, &left, &first, figure)?;
            draw_panel(root, &right, &second, figure)?;
        }
        _ => draw_panel(root, &plot_root, &first, figure)?,
    }

    // Annotations placed purely in paper coordinates
    let (width, height) = root.dim_in_pixel();
    for annotation in figure
        .layout
        .annotations
        .iter()
        .filter(|a| is_paper(&a.xref) && is_paper(&a.yref))
    {
        let anchor = (
            (annotation.x * width as f64) as i32,
            ((1.0 - annotation.y) * height as f64) as i32,
        );
        draw_annotation(root, annotation, anchor, (0, 0))?;
    }

    Ok(())
}

/// Pixel width of the left panel, from the left x axis domain
fn first_panel_width(area: &DrawingArea<SVGBackend<'_>, Shift>, left: &Axis, right: &Axis) -> i32 {
    let width = area.dim_in_pixel().0 as f64;
    let left_end = left.domain.map(|d| d[1]).unwrap_or(0.5);
    let right_start = right.domain.map(|d| d[0]).unwrap_or(0.5);
    (width * (left_end + right_start) / 2.0) as i32
}

fn draw_panel(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    panel: &Panel<'_>,
    figure: &Figure,
) -> DrawResult<()> {
    let traces: Vec<&Trace> = figure
        .data
        .iter()
        .filter(|t| t.xaxis.as_deref().unwrap_or("x") == panel.xref)
        .collect();

    let x_range = axis_range(panel.x_axis, traces.iter().flat_map(|t| t.x.iter().copied()));
    let y_range = axis_range(panel.y_axis, traces.iter().flat_map(|t| t.y.iter().copied()));

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    let x_log = is_log(panel.x_axis);
    let y_log = is_log(panel.y_axis);
    let x_labels = |v: &f64| tick_label(x_log, *v);
    let y_labels = |v: &f64| tick_label(y_log, *v);
    chart
        .configure_mesh()
        .x_desc(axis_title(panel.x_axis))
        .y_desc(axis_title(panel.y_axis))
        .x_label_formatter(&x_labels)
        .y_label_formatter(&y_labels)
        .light_line_style(WHITE)
        .bold_line_style(RGBColor(230, 230, 230))
        .draw()?;

    for shape in figure.layout.shapes.iter().filter(|s| on_panel(&s.xref, &s.yref, panel)) {
        let ((x0, x1), (y0, y1)) = shape_extent(shape, x_range, y_range);
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x0, y0), (x1, y1)],
            parse_color(&shape.fillcolor).filled(),
        )))?;
    }

    let mut labeled = false;
    for trace in &traces {
        labeled |= draw_trace(&mut chart, trace, panel)?;
    }

    if labeled {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .border_style(RGBColor(200, 200, 200))
            .label_font((FONT, 11))
            .draw()?;
    }

    for annotation in figure
        .layout
        .annotations
        .iter()
        .filter(|a| !(is_paper(&a.xref) && is_paper(&a.yref)))
        .filter(|a| on_panel(a.xref.as_deref().unwrap_or("x"), a.yref.as_deref().unwrap_or("y"), panel))
    {
        let (width, height) = root.dim_in_pixel();
        let point = chart.backend_coord(&(annotation.x, annotation.y));
        let anchor = (
            if is_paper(&annotation.xref) {
                (annotation.x * width as f64) as i32
            } else {
                point.0
            },
            if is_paper(&annotation.yref) {
                ((1.0 - annotation.y) * height as f64) as i32
            } else {
                point.1
            },
        );

        let offset = match (annotation.showarrow, annotation.ax, annotation.ay) {
            (true, Some(ax), Some(ay)) if annotation.axref.is_some() => {
                let tail = chart.backend_coord(&(ax, ay));
                (tail.0 - anchor.0, tail.1 - anchor.1)
            }
            (true, Some(ax), Some(ay)) => (ax as i32, ay as i32),
            _ => (0, 0),
        };
        draw_annotation(root, annotation, anchor, offset)?;
    }

    Ok(())
}

/// Draw one trace; returns whether it added a legend entry
fn draw_trace(chart: &mut PanelChart<'_, '_>, trace: &Trace, panel: &Panel<'_>) -> DrawResult<bool> {
    let x_log = is_log(panel.x_axis);
    let y_log = is_log(panel.y_axis);
    let points: Vec<(usize, (f64, f64))> = trace
        .x
        .iter()
        .zip(&trace.y)
        .enumerate()
        .filter_map(|(i, (x, y))| Some((i, (axis_value(x_log, *x)?, axis_value(y_log, *y)?))))
        .collect();

    let color = trace
        .marker
        .as_ref()
        .map(|m| parse_color(&m.color))
        .or_else(|| trace.line.as_ref().and_then(|l| l.color.as_deref()).map(parse_color))
        .unwrap_or(DEFAULT_LINE);
    let mut legend_drawn = false;

    if matches!(trace.mode, Mode::Lines | Mode::LinesAndMarkers) {
        let line_color = trace
            .line
            .as_ref()
            .and_then(|l| l.color.as_deref())
            .map(parse_color)
            .unwrap_or(color);
        let width = trace.line.as_ref().map(|l| l.width).unwrap_or(2.0).max(1.0) as u32;
        let style = line_color.stroke_width(width);
        let path = points.iter().map(|(_, p)| *p);

        let series = match trace.line.as_ref().and_then(|l| l.dash) {
            Some(Dash::Dash) | Some(Dash::Dot) => {
                chart.draw_series(DashedLineSeries::new(path, 6, 4, style))?
            }
            _ => chart.draw_series(LineSeries::new(path, style))?,
        };
        if let Some(name) = legend_name(trace) {
            series
                .label(name)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], style));
            legend_drawn = true;
        }
    }

    if let (Mode::Markers | Mode::LinesAndMarkers, Some(marker)) = (trace.mode, &trace.marker) {
        let opacity = marker.opacity.unwrap_or(1.0);
        let fill = RGBAColor(color.0, color.1, color.2, color.3 * opacity);
        let series = chart.draw_series(points.iter().map(|(i, p)| {
            let radius = pick(&marker.size, *i).copied().unwrap_or(8.0) / 2.0;
            let symbol = marker
                .symbol
                .as_ref()
                .and_then(|s| pick(s, *i))
                .map(String::as_str)
                .unwrap_or("circle");
            EmptyElement::at(*p) + Polygon::new(marker_outline(symbol, radius), fill.filled())
        }))?;
        if !legend_drawn {
            if let Some(name) = legend_name(trace) {
                series
                    .label(name)
                    .legend(move |(x, y)| Circle::new((x + 8, y), 4, fill.filled()));
                legend_drawn = true;
            }
        }
    }

    Ok(legend_drawn)
}

fn draw_annotation(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    annotation: &Annotation,
    anchor: (i32, i32),
    offset: (i32, i32),
) -> DrawResult<()> {
    let font = annotation.font.as_ref();
    let size = font.and_then(|f| f.size).unwrap_or(10.0);
    let color = font
        .and_then(|f| f.color.as_deref())
        .map(parse_color)
        .unwrap_or(RGBAColor(51, 51, 51, 1.0));
    let hpos = match annotation.xanchor.as_deref() {
        Some("left") => HPos::Left,
        Some("right") => HPos::Right,
        _ => HPos::Center,
    };
    let style = (FONT, size).into_font().color(&color).pos(Pos::new(hpos, VPos::Center));

    if annotation.showarrow && offset != (0, 0) {
        let arrow = annotation
            .arrowcolor
            .as_deref()
            .map(parse_color)
            .unwrap_or(DEFAULT_LINE);
        root.draw(&PathElement::new(
            vec![anchor, (anchor.0 + offset.0, anchor.1 + offset.1)],
            arrow.stroke_width(1),
        ))?;
    }

    let lines: Vec<String> = annotation
        .text
        .split("<br>")
        .map(plain_text)
        .filter(|line| !line.is_empty())
        .collect();
    let line_height = (size * 1.25) as i32;
    let first_y = anchor.1 + offset.1 - line_height * (lines.len() as i32 - 1) / 2;
    for (i, line) in lines.into_iter().enumerate() {
        root.draw(&Text::new(
            line,
            (anchor.0 + offset.0, first_y + line_height * i as i32),
            style.clone(),
        ))?;
    }
    Ok(())
}

fn legend_name(trace: &Trace) -> Option<String> {
    if trace.showlegend == Some(false) {
        return None;
    }
    trace.name.as_deref().map(plain_text)
}

fn pick<T>(values: &OneOrMany<T>, index: usize) -> Option<&T> {
    match values {
        OneOrMany::One(value) => Some(value),
        OneOrMany::Many(values) => values.get(index),
    }
}

/// Marker polygon in pixel offsets around the point
fn marker_outline(symbol: &str, radius: f64) -> Vec<(i32, i32)> {
    let r = radius.max(1.5);
    let polar = |angles_and_radii: &[(f64, f64)]| -> Vec<(i32, i32)> {
        angles_and_radii
            .iter()
            .map(|(deg, len)| {
                let rad = deg.to_radians();
                ((len * rad.cos()).round() as i32, (-len * rad.sin()).round() as i32)
            })
            .collect()
    };

    match symbol {
        "diamond" => polar(&[(90.0, r * 1.3), (0.0, r), (270.0, r * 1.3), (180.0, r)]),
        "triangle-down" => polar(&[(270.0, r * 1.2), (30.0, r * 1.2), (150.0, r * 1.2)]),
        "square" => polar(&[(45.0, r * 1.4), (135.0, r * 1.4), (225.0, r * 1.4), (315.0, r * 1.4)]),
        "star" => {
            let points: Vec<(f64, f64)> = (0..10)
                .map(|i| {
                    let len = if i % 2 == 0 { r * 1.3 } else { r * 0.55 };
                    (90.0 + 36.0 * i as f64, len)
                })
                .collect();
            polar(&points)
        }
        _ => {
            let points: Vec<(f64, f64)> = (0..16).map(|i| (22.5 * i as f64, r)).collect();
            polar(&points)
        }
    }
}

fn is_log(axis: &Axis) -> bool {
    axis.axis_type == Some(AxisType::Log)
}

fn is_paper(reference: &Option<String>) -> bool {
    reference.as_deref() == Some("paper")
}

/// Whether a shape or annotation reference pair belongs to a panel
fn on_panel(xref: &str, yref: &str, panel: &Panel<'_>) -> bool {
    let axis = |reference: &str| reference.trim_end_matches(" domain").to_string();
    let x_ok = xref == "paper" || axis(xref) == panel.xref;
    let y_ok = yref == "paper" || axis(yref) == panel.yref;
    x_ok && y_ok && !(xref == "paper" && yref == "paper")
}

/// Data value to axis units; `None` when it cannot be drawn
fn axis_value(log: bool, value: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    if log {
        (value > 0.0).then(|| value.log10())
    } else {
        Some(value)
    }
}

/// Axis range in axis units, from the layout or the data
fn axis_range(axis: &Axis, values: impl Iterator<Item = f64>) -> (f64, f64) {
    if let Some([low, high]) = axis.range {
        if low < high {
            return (low, high);
        }
    }

    let log = is_log(axis);
    let (low, high) = values
        .filter_map(|v| axis_value(log, v))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !low.is_finite() || !high.is_finite() {
        return (0.0, 1.0);
    }
    let pad = if high > low { (high - low) * 0.05 } else { 0.5 };
    (low - pad, high + pad)
}

fn shape_extent(shape: &Shape, x_range: (f64, f64), y_range: (f64, f64)) -> ((f64, f64), (f64, f64)) {
    let lerp = |range: (f64, f64), t: f64| range.0 + (range.1 - range.0) * t;
    let x = if shape.xref.ends_with("domain") {
        (lerp(x_range, shape.x0), lerp(x_range, shape.x1))
    } else {
        (shape.x0, shape.x1)
    };
    let y = if shape.yref.ends_with("domain") {
        (lerp(y_range, shape.y0), lerp(y_range, shape.y1))
    } else {
        (shape.y0, shape.y1)
    };
    (x, y)
}

fn axis_title(axis: &Axis) -> String {
    axis.title.as_ref().map(|t| plain_text(&t.text)).unwrap_or_default()
}

fn tick_label(log: bool, value: f64) -> String {
    if log {
        significant(10f64.powf(value), 3)
    } else {
        significant(value, 6)
    }
}

/// Strip the inline HTML tags Plotly accepts in text
fn plain_text(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.replace("<br>", " ").chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => plain.push(c),
            _ => {}
        }
    }
    plain.trim().to_string()
}

/// Parse `#RRGGBB`, `rgb(...)`, `rgba(...)` or a basic color name
fn parse_color(text: &str) -> RGBAColor {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix('#') {
        if hex.len() == 6 {
            if let Ok(value) = u32::from_str_radix(hex, 16) {
                return RGBAColor((value >> 16) as u8, (value >> 8) as u8, value as u8, 1.0);
            }
        }
        if hex.len() == 3 {
            let digits: Vec<u8> = hex
                .chars()
                .filter_map(|c| c.to_digit(16).map(|d| (d * 17) as u8))
                .collect();
            if let [r, g, b] = digits[..] {
                return RGBAColor(r, g, b, 1.0);
            }
        }
    }

    if let Some(body) = text
        .strip_prefix("rgba(")
        .or_else(|| text.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<f64> = body.split(',').filter_map(|p| p.trim().parse().ok()).collect();
        match parts[..] {
            [r, g, b] => return RGBAColor(r as u8, g as u8, b as u8, 1.0),
            [r, g, b, a] => return RGBAColor(r as u8, g as u8, b as u8, a.clamp(0.0, 1.0)),
            _ => {}
        }
    }

    match text.to_ascii_lowercase().as_str() {
        "white" => RGBAColor(255, 255, 255, 1.0),
        "black" => RGBAColor(0, 0, 0, 1.0),
        "red" => RGBAColor(255, 0, 0, 1.0),
        "green" => RGBAColor(0, 128, 0, 1.0),
        "blue" => RGBAColor(0, 0, 255, 1.0),
        "orange" => RGBAColor(255, 165, 0, 1.0),
        "purple" => RGBAColor(128, 0, 128, 1.0),
        "darkgray" | "darkgrey" => RGBAColor(169, 169, 169, 1.0),
        "lightgray" | "lightgrey" => RGBAColor(211, 211, 211, 1.0),
        _ => DEFAULT_LINE,
    }
}
