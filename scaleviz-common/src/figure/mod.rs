//! Plotly figure model
//!
//! A typed subset of the Plotly figure schema: scatter traces, a layout with
//! up to two subplot axis pairs, rectangle shapes and annotations. The model
//! serializes with serde into the JSON that `Plotly.newPlot` consumes, so a
//! figure can be written as a standalone HTML page, as bare figure JSON, or
//! rendered to a static SVG image.
//!
//! Plotly positions on a log axis (axis `range`, annotation `x`/`y`, shape
//! coordinates) are expressed in log10 units. Trace data is always given in
//! data units.

mod html;
mod svg;

pub use html::{render_html, write_html, write_json, PLOTLY_CDN_URL};
pub use svg::{render_svg, write_svg};

use serde::Serialize;

/// A complete figure: traces plus layout
#[derive(Debug, Clone, Default, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(layout: Layout) -> Self {
        Self {
            data: Vec::new(),
            layout,
        }
    }

    pub fn add_trace(&mut self, trace: Trace) {
        self.data.push(trace);
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.layout.shapes.push(shape);
    }

    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.layout.annotations.push(annotation);
    }

    /// Serialize to Plotly JSON
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Traces with a given name
    pub fn traces_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Trace> + 'a {
        self.data
            .iter()
            .filter(move |trace| trace.name.as_deref() == Some(name))
    }
}

/// Scalar or per-point attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T: Clone + PartialEq> OneOrMany<T> {
    /// Collapse a per-point list to a scalar when every entry is equal
    pub fn collapse(values: Vec<T>) -> Self {
        match values.first() {
            Some(first) if values.iter().all(|v| v == first) => OneOrMany::One(first.clone()),
            _ => OneOrMany::Many(values),
        }
    }
}

/// Scatter drawing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "lines+markers")]
    LinesAndMarkers,
}

/// Line dash style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dash {
    Solid,
    Dash,
    Dot,
}

/// Scatter trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgrouptitle: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

impl Trace {
    /// Scatter trace from paired coordinates
    pub fn scatter(x: Vec<f64>, y: Vec<f64>, mode: Mode) -> Self {
        Self {
            trace_type: "scatter",
            x,
            y,
            mode,
            name: None,
            marker: None,
            line: None,
            text: None,
            hoverinfo: None,
            hovertemplate: None,
            showlegend: None,
            legendgroup: None,
            legendgrouptitle: None,
            xaxis: None,
            yaxis: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn line(mut self, line: Line) -> Self {
        self.line = Some(line);
        self
    }

    /// Hover text shown instead of the coordinates
    pub fn hover_text(mut self, text: Vec<String>) -> Self {
        self.text = Some(text);
        self.hoverinfo = Some("text".to_string());
        self
    }

    pub fn hover_template(mut self, template: impl Into<String>) -> Self {
        self.hovertemplate = Some(template.into());
        self
    }

    /// No hover label and no legend entry
    pub fn decoration(mut self) -> Self {
        self.hoverinfo = Some("skip".to_string());
        self.showlegend = Some(false);
        self
    }

    /// No hover label, legend entry kept
    pub fn skip_hover(mut self) -> Self {
        self.hoverinfo = Some("skip".to_string());
        self
    }

    pub fn legend_group(mut self, group: impl Into<String>, title: Option<&str>) -> Self {
        self.legendgroup = Some(group.into());
        self.legendgrouptitle = title.map(Title::new);
        self
    }

    /// Bind to a subplot axis pair such as `("x2", "y2")`
    pub fn axes(mut self, xaxis: &str, yaxis: &str) -> Self {
        self.xaxis = Some(xaxis.to_string());
        self.yaxis = Some(yaxis.to_string());
        self
    }
}

/// Marker styling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub size: OneOrMany<f64>,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<OneOrMany<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
}

impl Marker {
    pub fn new(size: OneOrMany<f64>, color: impl Into<String>) -> Self {
        Self {
            size,
            color: color.into(),
            symbol: None,
            opacity: None,
            line: None,
        }
    }

    pub fn symbol(mut self, symbol: OneOrMany<String>) -> Self {
        self.symbol = Some(symbol);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Marker outline
    pub fn outline(mut self, width: f64, color: impl Into<String>) -> Self {
        self.line = Some(Line::new(color, width));
        self
    }
}

/// Line styling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<Dash>,
}

impl Line {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: Some(color.into()),
            width,
            dash: None,
        }
    }

    /// Invisible outline (used for shapes)
    pub fn none() -> Self {
        Self {
            color: None,
            width: 0.0,
            dash: None,
        }
    }

    pub fn dash(mut self, dash: Dash) -> Self {
        self.dash = Some(dash);
        self
    }
}

/// Text styling
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Font {
    pub fn sized(size: f64) -> Self {
        Self {
            size: Some(size),
            color: None,
        }
    }

    pub fn colored(size: f64, color: impl Into<String>) -> Self {
        Self {
            size: Some(size),
            color: Some(color.into()),
        }
    }
}

/// Title block for figures, axes, legends and legend groups
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x: None,
            font: None,
        }
    }

    /// Horizontally centered title with a font size
    pub fn centered(text: impl Into<String>, size: f64) -> Self {
        Self {
            text: text.into(),
            x: Some(0.5),
            font: Some(Font::sized(size)),
        }
    }
}

/// Axis scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Linear,
    Log,
}

/// Minor tick configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinorTicks {
    pub tickmode: String,
    pub tick0: f64,
    pub dtick: f64,
}

/// Cartesian axis
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<AxisType>,
    /// In axis units: log10 of the data bounds on a log axis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickmode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick0: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtick: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticktext: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickformat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor: Option<MinorTicks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

impl Axis {
    pub fn titled(text: &str) -> Self {
        Self {
            title: Some(Title::new(text)),
            ..Self::default()
        }
    }

    /// Linear axis over `[low, high]`
    pub fn linear_range(mut self, low: f64, high: f64) -> Self {
        self.range = Some([low, high]);
        self
    }

    /// Log axis; bounds given in data units
    pub fn log(mut self) -> Self {
        self.axis_type = Some(AxisType::Log);
        self
    }

    /// Log axis over `[low, high]` data units
    pub fn log_range(mut self, low: f64, high: f64) -> Self {
        self.axis_type = Some(AxisType::Log);
        self.range = Some([low.log10(), high.log10()]);
        self
    }

    /// Evenly spaced ticks starting at `tick0`
    pub fn linear_ticks(mut self, tick0: f64, dtick: f64) -> Self {
        self.tickmode = Some("linear".to_string());
        self.tick0 = Some(tick0);
        self.dtick = Some(dtick);
        self
    }

    pub fn minor_ticks(mut self, tick0: f64, dtick: f64) -> Self {
        self.minor = Some(MinorTicks {
            tickmode: "linear".to_string(),
            tick0,
            dtick,
        });
        self
    }

    /// Explicit tick positions (data units) and labels
    pub fn labeled_ticks(mut self, values: &[f64], labels: &[&str]) -> Self {
        self.tickvals = Some(values.to_vec());
        self.ticktext = Some(labels.iter().map(|l| (*l).to_string()).collect());
        self
    }

    pub fn tick_format(mut self, format: &str) -> Self {
        self.tickformat = Some(format.to_string());
        self
    }

    pub fn grid(mut self, color: &str) -> Self {
        self.gridcolor = Some(color.to_string());
        self
    }

    /// Subplot placement
    pub fn placed(mut self, domain: [f64; 2], anchor: &str) -> Self {
        self.domain = Some(domain);
        self.anchor = Some(anchor.to_string());
        self
    }
}

/// Legend placement and styling
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl Legend {
    /// Legend anchored at `(x, y)` in paper coordinates
    pub fn anchored(x: f64, xanchor: &str, y: f64, yanchor: &str) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            xanchor: Some(xanchor.to_string()),
            yanchor: Some(yanchor.to_string()),
            ..Self::default()
        }
    }

    pub fn horizontal(mut self) -> Self {
        self.orientation = Some("h".to_string());
        self
    }

    pub fn titled(mut self, text: &str) -> Self {
        self.title = Some(Title::new(text));
        self
    }

    pub fn background(mut self, color: &str) -> Self {
        self.bgcolor = Some(color.to_string());
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }
}

/// Figure margins in pixels
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Margin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub l: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
}

/// Figure layout
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis2: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis2: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovermode: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Layout {
    /// Layout with the white-paper, light-plot look shared by every chart
    pub fn standard(title: Title, width: u32, height: u32) -> Self {
        Self {
            title: Some(title),
            plot_bgcolor: Some("#FAFAFA".to_string()),
            paper_bgcolor: Some("white".to_string()),
            width: Some(width),
            height: Some(height),
            hovermode: Some("closest".to_string()),
            ..Self::default()
        }
    }
}

/// Layout shape (only rectangles are used)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub shape_type: &'static str,
    pub xref: String,
    pub yref: String,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub fillcolor: String,
    pub line: Line,
    pub layer: &'static str,
}

impl Shape {
    /// Full-height band between two x positions, drawn below the data
    pub fn vertical_band(x0: f64, x1: f64, fillcolor: &str) -> Self {
        Self::vertical_band_on(x0, x1, fillcolor, "x", "y")
    }

    /// Vertical band on a specific subplot axis pair
    pub fn vertical_band_on(x0: f64, x1: f64, fillcolor: &str, xaxis: &str, yaxis: &str) -> Self {
        Self {
            shape_type: "rect",
            xref: xaxis.to_string(),
            yref: format!("{} domain", yaxis),
            x0,
            x1,
            y0: 0.0,
            y1: 1.0,
            fillcolor: fillcolor.to_string(),
            line: Line::none(),
            layer: "below",
        }
    }

    /// Full-width band between two y positions (axis units)
    pub fn horizontal_band(y0: f64, y1: f64, fillcolor: &str) -> Self {
        Self {
            shape_type: "rect",
            xref: "x domain".to_string(),
            yref: "y".to_string(),
            x0: 0.0,
            x1: 1.0,
            y0,
            y1,
            fillcolor: fillcolor.to_string(),
            line: Line::none(),
            layer: "below",
        }
    }
}

/// Text annotation, optionally with an arrow to a point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yref: Option<String>,
    pub showarrow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrowhead: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrowsize: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrowwidth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrowcolor: Option<String>,
    /// Text position relative to the point (pixels unless `axref` is set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ayref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borderpad: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yanchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
    /// Clockwise rotation in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textangle: Option<f64>,
}

impl Annotation {
    /// Plain text at `(x, y)` in axis units, no arrow
    pub fn text(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            xref: None,
            yref: None,
            showarrow: false,
            arrowhead: None,
            arrowsize: None,
            arrowwidth: None,
            arrowcolor: None,
            ax: None,
            ay: None,
            axref: None,
            ayref: None,
            font: None,
            bgcolor: None,
            borderpad: None,
            xanchor: None,
            yanchor: None,
            align: None,
            textangle: None,
        }
    }

    /// Text placed in paper coordinates (0..1 across the figure)
    pub fn paper(text: impl Into<String>, x: f64, y: f64) -> Self {
        let mut annotation = Self::text(text, x, y);
        annotation.xref = Some("paper".to_string());
        annotation.yref = Some("paper".to_string());
        annotation
    }

    /// Headless arrow from a pixel offset `(ax, ay)` to the point
    pub fn arrow(mut self, ax: f64, ay: f64, color: &str) -> Self {
        self.showarrow = true;
        self.arrowhead = Some(0);
        self.arrowsize = Some(0.5);
        self.arrowwidth = Some(1.0);
        self.arrowcolor = Some(color.to_string());
        self.ax = Some(ax);
        self.ay = Some(ay);
        self
    }

    /// Arrow whose tail `(ax, ay)` is given in axis units
    pub fn arrow_from_axis(mut self, ax: f64, ay: f64, color: &str) -> Self {
        self = self.arrow(ax, ay, color);
        self.axref = Some(self.xref.clone().unwrap_or_else(|| "x".to_string()));
        self.ayref = Some(self.yref.clone().unwrap_or_else(|| "y".to_string()));
        self
    }

    /// Bind to a subplot axis pair
    pub fn on_axes(mut self, xaxis: &str, yaxis: &str) -> Self {
        self.xref = Some(xaxis.to_string());
        self.yref = Some(yaxis.to_string());
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn boxed(mut self, bgcolor: &str, borderpad: f64) -> Self {
        self.bgcolor = Some(bgcolor.to_string());
        self.borderpad = Some(borderpad);
        self
    }

    pub fn anchor(mut self, xanchor: &str, yanchor: &str) -> Self {
        self.xanchor = Some(xanchor.to_string());
        self.yanchor = Some(yanchor.to_string());
        self
    }

    pub fn align(mut self, align: &str) -> Self {
        self.align = Some(align.to_string());
        self
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.textangle = Some(degrees);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_trace_serializes_plotly_shape() {
        let trace = Trace::scatter(vec![2020.0], vec![3.14e23], Mode::Markers)
            .name("Model Release")
            .marker(
                Marker::new(OneOrMany::Many(vec![22.0]), "#8E44AD")
                    .symbol(OneOrMany::One("circle".to_string()))
                    .outline(1.0, "white"),
            )
            .hover_text(vec!["GPT-3".to_string()]);

        let value: Value = serde_json::to_value(&trace).unwrap();
        assert_eq!(value["type"], "scatter");
        assert_eq!(value["mode"], "markers");
        assert_eq!(value["name"], "Model Release");
        assert_eq!(value["marker"]["size"], json!([22.0]));
        assert_eq!(value["marker"]["symbol"], "circle");
        assert_eq!(value["marker"]["line"]["color"], "white");
        assert_eq!(value["hoverinfo"], "text");
        assert!(value.get("line").is_none());
        assert!(value.get("xaxis").is_none());
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(serde_json::to_value(Mode::LinesAndMarkers).unwrap(), "lines+markers");
        assert_eq!(serde_json::to_value(Dash::Dash).unwrap(), "dash");
        assert_eq!(serde_json::to_value(AxisType::Log).unwrap(), "log");
    }

    #[test]
    fn test_log_range_in_axis_units() {
        let axis = Axis::titled("Days").log_range(10.0, 10000.0);
        let value = serde_json::to_value(&axis).unwrap();
        assert_eq!(value["type"], "log");
        assert_eq!(value["range"], json!([1.0, 4.0]));
    }

    #[test]
    fn test_collapse_uniform_values() {
        assert_eq!(
            OneOrMany::collapse(vec!["circle".to_string(), "circle".to_string()]),
            OneOrMany::One("circle".to_string())
        );
        assert_eq!(
            OneOrMany::collapse(vec![1.0, 2.0]),
            OneOrMany::Many(vec![1.0, 2.0])
        );
    }

    #[test]
    fn test_empty_layout_lists_omitted() {
        let figure = Figure::new(Layout::standard(Title::centered("t", 20.0), 800, 600));
        let value: Value = serde_json::from_str(&figure.to_json().unwrap()).unwrap();
        assert!(value["layout"].get("shapes").is_none());
        assert!(value["layout"].get("annotations").is_none());
        assert_eq!(value["data"], json!([]));
        assert_eq!(value["layout"]["hovermode"], "closest");
    }

    #[test]
    fn test_band_and_arrow_annotation() {
        let mut figure = Figure::default();
        figure.add_shape(Shape::vertical_band(1900.0, 1940.0, "rgba(200,200,200,0.2)"));
        figure.add_annotation(
            Annotation::text("ENIAC", 1945.0, 4.0).arrow_from_axis(1947.0, 4.5, "gray"),
        );
        let value: Value = serde_json::to_value(&figure).unwrap();
        assert_eq!(value["layout"]["shapes"][0]["yref"], "y domain");
        assert_eq!(value["layout"]["shapes"][0]["layer"], "below");
        assert_eq!(value["layout"]["annotations"][0]["axref"], "x");
        assert_eq!(value["layout"]["annotations"][0]["ayref"], "y");
        assert_eq!(value["layout"]["annotations"][0]["showarrow"], true);
    }
}
