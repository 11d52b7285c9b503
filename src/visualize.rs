use std::fmt::Write as _;

use crate::payoff::PayoffCurve;
use crate::select::CandidatePair;

const SVG_WIDTH: f64 = 800.0;
const SVG_HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 40.0;
const GRID_TICKS: usize = 5;

const ASCII_WIDTH: usize = 60;
const ASCII_HEIGHT: usize = 15;

/// Text around one payoff chart.
#[derive(Debug, Clone)]
pub struct ChartLabels {
    pub title: String,
    pub subtitle: String,
    pub legend: String,
    pub y_label: String,
}

impl ChartLabels {
    /// Labels for the `number`-th (1-based) selected pair.
    pub fn for_pair(pair: &CandidatePair, number: usize) -> Self {
        let (k1, k2) = (pair.lower.strike(), pair.upper.strike());
        Self {
            title: format!(
                "{} - Vencimiento: {}",
                pair.underlying(),
                pair.lower.expiration()
            ),
            subtitle: format!("Bull Spread #{number}: {k1:.1} - {k2:.1}"),
            legend: format!("Bull Spread {k1:.1} - {k2:.1}"),
            y_label: "Ganancia/Pérdida Total".to_string(),
        }
    }
}

// ── SVG ──────────────────────────────────────────────────────────────

/// Line chart of the curve with a dashed zero line, grid and legend.
pub fn render_svg(curve: &PayoffCurve, labels: &ChartLabels) -> String {
    let (x_min, x_max) = bounds(curve.points.iter().map(|p| p.0));
    let (y_min, y_max) = padded(bounds(curve.points.iter().map(|p| p.1).chain([0.0])));

    let plot_w = SVG_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = SVG_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let sx = |x: f64| MARGIN_LEFT + (x - x_min) / (x_max - x_min) * plot_w;
    let sy = |y: f64| MARGIN_TOP + (y_max - y) / (y_max - y_min) * plot_h;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{SVG_WIDTH}" height="{SVG_HEIGHT}" viewBox="0 0 {SVG_WIDTH} {SVG_HEIGHT}" font-family="sans-serif" font-size="12">"#
    );
    let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"  <text x="{:.1}" y="22" text-anchor="middle" font-size="14">{}</text>"#,
        SVG_WIDTH / 2.0,
        escape_xml(&labels.title)
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{:.1}" y="40" text-anchor="middle" font-size="14">{}</text>"#,
        SVG_WIDTH / 2.0,
        escape_xml(&labels.subtitle)
    );

    // Grid and tick labels
    for i in 0..=GRID_TICKS {
        let t = i as f64 / GRID_TICKS as f64;
        let x = x_min + t * (x_max - x_min);
        let y = y_min + t * (y_max - y_min);
        let _ = writeln!(
            svg,
            r##"  <line x1="{px:.1}" y1="{MARGIN_TOP}" x2="{px:.1}" y2="{bottom:.1}" stroke="#ddd"/>"##,
            px = sx(x),
            bottom = MARGIN_TOP + plot_h,
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle">{x:.1}</text>"#,
            sx(x),
            MARGIN_TOP + plot_h + 16.0,
        );
        let _ = writeln!(
            svg,
            r##"  <line x1="{MARGIN_LEFT}" y1="{py:.1}" x2="{right:.1}" y2="{py:.1}" stroke="#ddd"/>"##,
            py = sy(y),
            right = MARGIN_LEFT + plot_w,
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="end">{y:.0}</text>"#,
            MARGIN_LEFT - 6.0,
            sy(y) + 4.0,
        );
    }

    let _ = writeln!(
        svg,
        r#"  <text transform="translate(16 {:.1}) rotate(-90)" text-anchor="middle">{}</text>"#,
        MARGIN_TOP + plot_h / 2.0,
        escape_xml(&labels.y_label)
    );

    // Zero reference
    let _ = writeln!(
        svg,
        r#"  <line x1="{MARGIN_LEFT}" y1="{zero:.1}" x2="{right:.1}" y2="{zero:.1}" stroke="black" stroke-dasharray="6 4"/>"#,
        zero = sy(0.0),
        right = MARGIN_LEFT + plot_w,
    );

    let polyline: Vec<String> = curve
        .points
        .iter()
        .map(|&(x, y)| format!("{:.2},{:.2}", sx(x), sy(y)))
        .collect();
    let _ = writeln!(
        svg,
        r##"  <polyline fill="none" stroke="#1f77b4" stroke-width="2" points="{}"/>"##,
        polyline.join(" ")
    );

    // Legend
    let lx = MARGIN_LEFT + 12.0;
    let ly = MARGIN_TOP + 14.0;
    let _ = writeln!(
        svg,
        r##"  <line x1="{lx:.1}" y1="{ly:.1}" x2="{:.1}" y2="{ly:.1}" stroke="#1f77b4" stroke-width="2"/>"##,
        lx + 24.0
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{:.1}" y="{:.1}">{}</text>"#,
        lx + 30.0,
        ly + 4.0,
        escape_xml(&labels.legend)
    );

    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ── ASCII ────────────────────────────────────────────────────────────

/// Terminal rendering: `*` for the curve, `-` for the zero line.
pub fn render_ascii(curve: &PayoffCurve, labels: &ChartLabels) -> String {
    let (x_min, x_max) = bounds(curve.points.iter().map(|p| p.0));
    let (y_min, y_max) = bounds(curve.points.iter().map(|p| p.1).chain([0.0]));
    let (y_min, y_max) = if y_max > y_min {
        (y_min, y_max)
    } else {
        (y_min - 1.0, y_max + 1.0)
    };
    let row_of = |y: f64| -> usize {
        let t = (y_max - y) / (y_max - y_min);
        ((t * (ASCII_HEIGHT - 1) as f64).round() as usize).min(ASCII_HEIGHT - 1)
    };

    let mut grid = vec![vec![' '; ASCII_WIDTH]; ASCII_HEIGHT];
    let zero_row = row_of(0.0);
    grid[zero_row].iter_mut().for_each(|c| *c = '-');

    for col in 0..ASCII_WIDTH {
        let x = x_min + (x_max - x_min) * col as f64 / (ASCII_WIDTH - 1) as f64;
        grid[row_of(curve.profit_at(x))][col] = '*';
    }

    let mut out = String::new();
    let _ = writeln!(out, "  {}", labels.title);
    let _ = writeln!(out, "  {}", labels.subtitle);
    for (i, row) in grid.iter().enumerate() {
        let axis = if i == 0 {
            format!("{y_max:>10.0}")
        } else if i == zero_row {
            format!("{:>10}", 0)
        } else if i == ASCII_HEIGHT - 1 {
            format!("{y_min:>10.0}")
        } else {
            " ".repeat(10)
        };
        let _ = writeln!(out, "  {axis} |{}", row.iter().collect::<String>());
    }
    let _ = writeln!(out, "  {} +{}", " ".repeat(10), "\u{2500}".repeat(ASCII_WIDTH));
    let _ = writeln!(
        out,
        "  {}  {x_min:<.1}{:>width$.1}",
        " ".repeat(10),
        x_max,
        width = ASCII_WIDTH - format!("{x_min:.1}").len()
    );
    out
}

// ── Helpers ──────────────────────────────────────────────────────────

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Widen a range by 5% on each side; degenerate ranges get a unit margin.
fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> ChartLabels {
        ChartLabels {
            title: "GGAL - Vencimiento: Octubre".into(),
            subtitle: "Bull Spread #1: 100.0 - 110.0".into(),
            legend: "Bull Spread 100.0 - 110.0".into(),
            y_label: "Ganancia/Pérdida Total".into(),
        }
    }

    #[test]
    fn test_svg_has_curve_and_zero_line() {
        let curve = PayoffCurve::new(100.0, 110.0, 8.0, 3.0, 10);
        let svg = render_svg(&curve, &labels());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains("Bull Spread #1: 100.0 - 110.0"));
        let polyline = svg.lines().find(|l| l.contains("<polyline")).unwrap();
        assert_eq!(polyline.matches(',').count(), curve.points.len());
    }

    #[test]
    fn test_svg_escapes_text() {
        let mut l = labels();
        l.title = "A&B <x>".into();
        let curve = PayoffCurve::new(100.0, 110.0, 8.0, 3.0, 1);
        assert!(render_svg(&curve, &l).contains("A&amp;B &lt;x&gt;"));
    }

    #[test]
    fn test_ascii_shape() {
        let curve = PayoffCurve::new(100.0, 110.0, 8.0, 3.0, 10);
        let text = render_ascii(&curve, &labels());
        let rows: Vec<&str> = text.lines().filter(|l| l.contains('|')).collect();
        assert_eq!(rows.len(), ASCII_HEIGHT);
        // Flat loss on the left ends up on the bottom row, flat gain on the top row.
        assert!(rows[ASCII_HEIGHT - 1].contains("|*"));
        assert!(rows[0].ends_with('*'));
    }
}
