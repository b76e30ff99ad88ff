//! Figure export: standalone HTML page and bare figure JSON

use super::Figure;
use crate::Result;
use std::path::Path;
use tracing::info;

/// plotly.js build loaded by generated pages
pub const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Render a standalone HTML page that draws the figure with plotly.js
pub fn render_html(figure: &Figure, page_title: &str) -> Result<String> {
    // `</` inside the inline script would end the element early
    let json = figure.to_json()?.replace("</", "<\\/");

    Ok(format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <script src=\"{cdn}\"></script>\n\
         </head>\n\
         <body>\n\
         <div id=\"chart\"></div>\n\
         <script>\n\
         const figure = {json};\n\
         Plotly.newPlot(\"chart\", figure.data, figure.layout, {{\"responsive\": true}});\n\
         </script>\n\
         </body>\n\
         </html>\n",
        title = escape_html(page_title),
        cdn = PLOTLY_CDN_URL,
        json = json,
    ))
}

/// Write the figure as an interactive HTML page
pub fn write_html(figure: &Figure, path: &Path, page_title: &str) -> Result<()> {
    let html = render_html(figure, page_title)?;
    std::fs::write(path, html)?;
    info!("Saved: {}", path.display());
    Ok(())
}

/// Write the figure as pretty-printed Plotly JSON
pub fn write_json(figure: &Figure, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(figure)?;
    std::fs::write(path, json)?;
    info!("Saved: {}", path.display());
    Ok(())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
