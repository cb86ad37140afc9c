//! Standalone HTML report: embedded PR-evolution chart plus the latest-PRs
//! table.

use std::fmt::{self, Write as _};

use maxlog_core::model::Exercise;
use maxlog_core::summary::{self, SummaryRow};
use maxlog_core::tracker::PrEvent;

use super::{chart, escape};

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2rem; color: #333; }\n\
h1 { margin-bottom: 0.25rem; }\n\
section { margin-top: 2rem; }\n\
table { border-collapse: collapse; }\n\
th, td { border: 1px solid darkslategray; padding: 0.4rem 0.8rem; text-align: left; }\n\
th { background: lightskyblue; }\n\
td { background: lightcyan; }\n";

fn write_table(
    html: &mut String,
    rows: &[SummaryRow],
    main_lifts: &[Exercise; 3],
) -> fmt::Result {
    writeln!(html, "<table>")?;

    writeln!(html, "<tr>")?;
    for header in summary::table_headers(main_lifts) {
        writeln!(html, "<th>{}</th>", escape(&header))?;
    }
    writeln!(html, "</tr>")?;

    for row in rows {
        writeln!(html, "<tr>")?;
        for cell in row.cells() {
            writeln!(html, "<td>{}</td>", escape(&cell))?;
        }
        writeln!(html, "</tr>")?;
    }

    writeln!(html, "</table>")
}

/// Render the full report page.
///
/// # Errors
///
/// Formatting errors only; writing into a `String` does not fail in
/// practice.
pub fn render_page(
    events: &[PrEvent],
    rows: &[SummaryRow],
    users: &[String],
    main_lifts: &[Exercise; 3],
    unit: &str,
) -> Result<String, fmt::Error> {
    let mut html = String::new();

    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"en\">")?;
    writeln!(html, "<head>")?;
    writeln!(html, "<meta charset=\"utf-8\">")?;
    writeln!(html, "<title>Powerlifting PRs</title>")?;
    writeln!(html, "<style>\n{STYLE}</style>")?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;
    writeln!(html, "<h1>Powerlifting PRs</h1>")?;

    writeln!(html, "<section>")?;
    writeln!(html, "<h2>PR Evolution</h2>")?;
    html.push_str(&chart::render_chart(events, users, main_lifts, unit)?);
    writeln!(html, "</section>")?;

    writeln!(html, "<section>")?;
    writeln!(html, "<h2>Latest PRs</h2>")?;
    write_table(&mut html, rows, main_lifts)?;
    writeln!(html, "</section>")?;

    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;
    Ok(html)
}
