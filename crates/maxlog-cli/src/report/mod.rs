//! Report artifact rendering.
//!
//! Consumes only the PR event stream and the summary rows; the core hands
//! those over and this layer never reaches back into the scan.

pub mod chart;
pub mod html;

/// Escape text for embedding in SVG/HTML content.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
