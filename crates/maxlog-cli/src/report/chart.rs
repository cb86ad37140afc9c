//! SVG facet grid of PR evolution.
//!
//! One facet per (user, main lift): rows are users, columns the three main
//! lifts, one line-with-markers series per rep bracket. All facets share
//! the same date and weight scales so progressions are comparable across
//! users and lifts. Column titles sit above the first row, user labels to
//! the right of the last column, date ticks (rotated) under the last row
//! only.

#![allow(clippy::suboptimal_flops)] // plain arithmetic keeps the layout math readable

use std::fmt::{self, Write as _};

use chrono::NaiveDateTime;

use maxlog_core::model::{Exercise, RepBracket};
use maxlog_core::tracker::PrEvent;

use super::escape;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

const FACET_W: f64 = 240.0;
const FACET_H: f64 = 160.0;
const GAP: f64 = 18.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_TOP: f64 = 56.0;
const MARGIN_RIGHT: f64 = 110.0;
const MARGIN_BOTTOM: f64 = 72.0;

const X_TICKS: usize = 4;
const Y_TICKS: usize = 4;

const FRAME_COLOR: &str = "#2f4f4f";
const GRID_COLOR: &str = "#e6e6e6";
const TEXT_COLOR: &str = "#333333";

const fn bracket_color(bracket: RepBracket) -> &'static str {
    match bracket {
        RepBracket::One => "#e45756",
        RepBracket::Five => "#4c78a8",
    }
}

fn bracket_label(bracket: RepBracket) -> String {
    format!("{} rep{}", bracket.reps(), if bracket == RepBracket::One { "" } else { "s" })
}

// ---------------------------------------------------------------------------
// Scales
// ---------------------------------------------------------------------------

/// Shared linear scales across every facet.
#[derive(Debug, Clone, Copy)]
struct Scales {
    t0: i64,
    t1: i64,
    w_max: f64,
}

impl Scales {
    fn from_events(events: &[PrEvent]) -> Self {
        let mut t0 = i64::MAX;
        let mut t1 = i64::MIN;
        let mut w_max = 0u32;
        for event in events {
            let t = event.date.and_utc().timestamp();
            t0 = t0.min(t);
            t1 = t1.max(t);
            w_max = w_max.max(event.weight);
        }

        // Degenerate domains (single PR, or all on one day) get a one-day pad
        // so positions stay finite.
        if t1 - t0 < 86_400 {
            t0 -= 43_200;
            t1 += 43_200;
        }

        Self {
            t0,
            t1,
            w_max: (f64::from(w_max) * 1.08).max(1.0),
        }
    }

    /// Horizontal position inside a facet.
    #[allow(clippy::cast_precision_loss)] // second-resolution timestamps fit the f64 mantissa
    fn x(self, date: NaiveDateTime) -> f64 {
        let t = date.and_utc().timestamp();
        (t - self.t0) as f64 / (self.t1 - self.t0) as f64 * FACET_W
    }

    /// Vertical position inside a facet (SVG y grows downward).
    fn y(self, weight: u32) -> f64 {
        FACET_H - f64::from(weight) / self.w_max * FACET_H
    }

    /// Evenly spaced date ticks across the shared domain.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)] // tick counts are tiny
    fn x_ticks(self) -> Vec<(f64, String)> {
        (0..X_TICKS)
            .map(|i| {
                let frac = i as f64 / (X_TICKS - 1) as f64;
                let t = self.t0 + ((self.t1 - self.t0) as f64 * frac) as i64;
                let label = chrono::DateTime::from_timestamp(t, 0)
                    .map_or_else(String::new, |d| d.format("%Y-%m-%d").to_string());
                (frac * FACET_W, label)
            })
            .collect()
    }

    /// Evenly spaced weight ticks from zero to the padded maximum.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)] // tick values are small and non-negative
    fn y_ticks(self) -> Vec<(f64, String)> {
        (0..Y_TICKS)
            .map(|i| {
                let frac = i as f64 / (Y_TICKS - 1) as f64;
                let weight = (self.w_max * frac).round() as u32;
                (FACET_H - frac * FACET_H, weight.to_string())
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[allow(clippy::cast_precision_loss)] // facet grids are a handful of rows/columns
const fn facet_origin(row: usize, col: usize) -> (f64, f64) {
    (
        MARGIN_LEFT + col as f64 * (FACET_W + GAP),
        MARGIN_TOP + row as f64 * (FACET_H + GAP),
    )
}

#[allow(clippy::cast_precision_loss)]
const fn canvas_size(rows: usize, cols: usize) -> (f64, f64) {
    (
        MARGIN_LEFT + cols as f64 * FACET_W + (cols.saturating_sub(1)) as f64 * GAP + MARGIN_RIGHT,
        MARGIN_TOP + rows as f64 * FACET_H + (rows.saturating_sub(1)) as f64 * GAP + MARGIN_BOTTOM,
    )
}

fn write_series(
    svg: &mut String,
    events: &[PrEvent],
    user: &str,
    exercise: &Exercise,
    bracket: RepBracket,
    scales: Scales,
) -> fmt::Result {
    let points: Vec<(f64, f64)> = events
        .iter()
        .filter(|e| e.user == user && &e.exercise == exercise && e.bracket == bracket)
        .map(|e| (scales.x(e.date), scales.y(e.weight)))
        .collect();

    if points.is_empty() {
        return Ok(());
    }

    let color = bracket_color(bracket);
    if points.len() > 1 {
        write!(svg, r#"<polyline fill="none" stroke="{color}" stroke-width="1.5" points=""#)?;
        for (x, y) in &points {
            write!(svg, "{x:.1},{y:.1} ")?;
        }
        writeln!(svg, r#""/>"#)?;
    }
    for (x, y) in &points {
        writeln!(svg, r#"<circle cx="{x:.1}" cy="{y:.1}" r="3" fill="{color}"/>"#)?;
    }
    Ok(())
}

/// Shared, immutable inputs for every facet.
struct Grid<'a> {
    events: &'a [PrEvent],
    scales: Scales,
    rows: usize,
}

fn write_facet(
    svg: &mut String,
    grid: &Grid<'_>,
    user: &str,
    exercise: &Exercise,
    row: usize,
    col: usize,
) -> fmt::Result {
    let scales = grid.scales;
    let (ox, oy) = facet_origin(row, col);
    writeln!(svg, r#"<g transform="translate({ox:.1},{oy:.1})">"#)?;

    // Gridlines under the data.
    for (y, _) in scales.y_ticks() {
        writeln!(
            svg,
            r#"<line x1="0" y1="{y:.1}" x2="{FACET_W}" y2="{y:.1}" stroke="{GRID_COLOR}"/>"#
        )?;
    }

    for bracket in RepBracket::ALL {
        write_series(svg, grid.events, user, exercise, bracket, scales)?;
    }

    writeln!(
        svg,
        r#"<rect x="0" y="0" width="{FACET_W}" height="{FACET_H}" fill="none" stroke="{FRAME_COLOR}"/>"#
    )?;

    // Column titles above the first row.
    if row == 0 {
        let cx = FACET_W / 2.0;
        writeln!(
            svg,
            r#"<text x="{cx:.1}" y="-10" text-anchor="middle" font-weight="bold" fill="{TEXT_COLOR}">{}</text>"#,
            escape(exercise.as_str())
        )?;
    }

    // Shared y axis: tick labels only on the first column.
    if col == 0 {
        for (y, label) in scales.y_ticks() {
            writeln!(
                svg,
                r#"<text x="-8" y="{:.1}" text-anchor="end" font-size="10" fill="{TEXT_COLOR}">{label}</text>"#,
                y + 3.0
            )?;
        }
    }

    // Shared x axis: rotated date ticks only under the last row.
    if row + 1 == grid.rows {
        for (x, label) in scales.x_ticks() {
            let ty = FACET_H + 12.0;
            writeln!(
                svg,
                r#"<text x="{x:.1}" y="{ty:.1}" font-size="10" fill="{TEXT_COLOR}" text-anchor="end" transform="rotate(-45 {x:.1} {ty:.1})">{label}</text>"#
            )?;
        }
    }

    writeln!(svg, "</g>")
}

#[allow(clippy::cast_precision_loss)] // two legend entries
fn write_legend(svg: &mut String, x: f64) -> fmt::Result {
    writeln!(svg, r#"<g transform="translate({x:.1},14)">"#)?;
    writeln!(svg, r#"<text x="0" y="4" font-size="11" font-weight="bold" fill="{TEXT_COLOR}">reps</text>"#)?;
    for (i, bracket) in RepBracket::ALL.iter().enumerate() {
        let y = 18.0 + 16.0 * i as f64;
        let color = bracket_color(*bracket);
        writeln!(svg, r#"<line x1="0" y1="{y:.1}" x2="18" y2="{y:.1}" stroke="{color}" stroke-width="1.5"/>"#)?;
        writeln!(svg, r#"<circle cx="9" cy="{y:.1}" r="3" fill="{color}"/>"#)?;
        writeln!(
            svg,
            r#"<text x="24" y="{:.1}" font-size="11" fill="{TEXT_COLOR}">{}</text>"#,
            y + 4.0,
            bracket_label(*bracket)
        )?;
    }
    writeln!(svg, "</g>")
}

/// Render the full facet grid.
///
/// Users with no PR events still get a row of empty facets, mirroring the
/// all-zero summary rows.
///
/// # Errors
///
/// Formatting errors only; writing into a `String` does not fail in
/// practice.
pub fn render_chart(
    events: &[PrEvent],
    users: &[String],
    main_lifts: &[Exercise; 3],
    unit: &str,
) -> Result<String, fmt::Error> {
    let mut svg = String::new();

    if events.is_empty() || users.is_empty() {
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="480" height="120" font-family="sans-serif">"#
        )?;
        writeln!(
            svg,
            r#"<text x="24" y="64" fill="{TEXT_COLOR}">No PR events recorded.</text>"#
        )?;
        writeln!(svg, "</svg>")?;
        return Ok(svg);
    }

    let scales = Scales::from_events(events);
    let rows = users.len();
    let cols = main_lifts.len();
    let (width, height) = canvas_size(rows, cols);

    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}" font-family="sans-serif" font-size="12">"#
    )?;

    let grid = Grid {
        events,
        scales,
        rows,
    };
    for (row, user) in users.iter().enumerate() {
        for (col, exercise) in main_lifts.iter().enumerate() {
            write_facet(&mut svg, &grid, user, exercise, row, col)?;
        }

        // User label to the right of the last column.
        let (ox, oy) = facet_origin(row, cols - 1);
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-weight="bold" fill="{TEXT_COLOR}">{}</text>"#,
            ox + FACET_W + 10.0,
            oy + FACET_H / 2.0,
            escape(user)
        )?;
    }

    // Axis titles.
    writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" fill="{TEXT_COLOR}">Date</text>"#,
        width / 2.0,
        height - 8.0
    )?;
    writeln!(
        svg,
        r#"<text x="14" y="{:.1}" text-anchor="middle" fill="{TEXT_COLOR}" transform="rotate(-90 14 {:.1})">Weight ({})</text>"#,
        height / 2.0,
        height / 2.0,
        escape(unit)
    )?;

    write_legend(&mut svg, width - MARGIN_RIGHT + 14.0)?;
    writeln!(svg, "</svg>")?;
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(user: &str, exercise: Exercise, day: u32, weight: u32, bracket: RepBracket) -> PrEvent {
        PrEvent {
            user: user.to_owned(),
            date: NaiveDate::from_ymd_opt(2023, 1, day)
                .expect("valid date")
                .and_hms_opt(9, 0, 0)
                .expect("valid time"),
            exercise,
            weight,
            bracket,
        }
    }

    #[test]
    fn empty_stream_renders_placeholder() {
        let svg = render_chart(&[], &[], &Exercise::MAIN_LIFTS, "kg").expect("render");
        assert!(svg.contains("No PR events recorded."));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn grid_has_one_facet_per_user_and_lift() {
        let events = [
            event("alice", Exercise::Squat, 1, 100, RepBracket::Five),
            event("bob", Exercise::Deadlift, 2, 140, RepBracket::One),
        ];
        let users = ["alice".to_owned(), "bob".to_owned()];

        let svg = render_chart(&events, &users, &Exercise::MAIN_LIFTS, "kg").expect("render");
        // 2 users x 3 lifts facets.
        assert_eq!(svg.matches("<rect").count(), 6);
        assert!(svg.contains("alice"));
        assert!(svg.contains("bob"));
        assert!(svg.contains("Bench Press"));
        assert!(svg.contains("Weight (kg)"));
    }

    #[test]
    fn series_are_colored_by_bracket() {
        let events = [
            event("alice", Exercise::Squat, 1, 100, RepBracket::Five),
            event("alice", Exercise::Squat, 8, 110, RepBracket::Five),
            event("alice", Exercise::Squat, 15, 120, RepBracket::One),
        ];
        let users = ["alice".to_owned()];

        let svg = render_chart(&events, &users, &Exercise::MAIN_LIFTS, "kg").expect("render");
        assert!(svg.contains(bracket_color(RepBracket::Five)));
        assert!(svg.contains(bracket_color(RepBracket::One)));
        // Two five-rep points make a polyline; the lone single does not.
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert_eq!(svg.matches("<circle").count(), 3 + 2); // data points + legend swatches
    }

    #[test]
    fn single_day_domain_stays_finite() {
        let events = [event("alice", Exercise::Squat, 1, 100, RepBracket::Five)];
        let users = ["alice".to_owned()];

        let svg = render_chart(&events, &users, &Exercise::MAIN_LIFTS, "kg").expect("render");
        assert!(!svg.contains("NaN"));
        assert!(!svg.contains("inf"));
    }

    #[test]
    fn user_names_are_escaped() {
        let events = [event("a<b>", Exercise::Squat, 1, 100, RepBracket::Five)];
        let users = ["a<b>".to_owned()];

        let svg = render_chart(&events, &users, &Exercise::MAIN_LIFTS, "kg").expect("render");
        assert!(svg.contains("a&lt;b&gt;"));
        assert!(!svg.contains("<b>"));
    }
}
