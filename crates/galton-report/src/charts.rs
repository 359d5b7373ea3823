//! Static SVG charts, assembled by hand.
//!
//! Every function takes plain data and returns a complete `<svg>` element
//! ready to inline into an HTML page. No drawing dependency; the markup is
//! pushed together the same way the dashboard HTML is.

use galton_stats::describe::percentile_sorted;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 360.0;
const MARGIN_TOP: f64 = 46.0;
const MARGIN_BOTTOM: f64 = 52.0;
const MARGIN_RIGHT: f64 = 18.0;

/// Categorical palette, applied in series order.
const PALETTE: [&str; 8] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#b07aa1", "#9c755f",
];

/// One named series of a grouped bar chart.
#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

/// One point of a scatter chart; `group` picks the color.
#[derive(Debug, Clone)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub group: String,
}

/// Escape text for safe inclusion in SVG or HTML markup.
///
/// # Examples
///
/// ```
/// use galton_report::charts::escape;
///
/// assert_eq!(escape("<Go & Rust>"), "&lt;Go &amp; Rust&gt;");
/// ```
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Vertical bar chart with a value label on top of each bar.
pub fn bar_chart(title: &str, data: &[(String, f64)]) -> String {
    if data.is_empty() {
        return no_data(title);
    }
    let margin_left = 62.0;
    let plot_w = WIDTH - margin_left - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let y_base = MARGIN_TOP + plot_h;
    let top = nice_ceiling(data.iter().map(|(_, v)| *v).fold(0.0, f64::max));

    let mut svg = svg_open(title);
    y_gridlines(&mut svg, margin_left, WIDTH - MARGIN_RIGHT, y_base, plot_h, top);

    let slot = plot_w / data.len() as f64;
    for (i, (label, value)) in data.iter().enumerate() {
        let bar_w = slot * 0.6;
        let bar_h = plot_h * (value / top).clamp(0.0, 1.0);
        let x = margin_left + slot * i as f64 + slot * 0.2;
        let y = y_base - bar_h;
        svg.push_str(&format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{bar_w:.1}" height="{bar_h:.1}" fill="{}"/>"#,
            PALETTE[0]
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="10" fill="#444">{}</text>"##,
            x + bar_w / 2.0,
            y - 4.0,
            format_number(*value)
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11" fill="#333">{}</text>"##,
            x + bar_w / 2.0,
            y_base + 16.0,
            escape(label)
        ));
        svg.push('\n');
    }
    svg.push_str("</svg>\n");
    svg
}

/// Grouped bar chart: one cluster per label, one color per series.
pub fn grouped_bar_chart(title: &str, labels: &[String], series: &[Series]) -> String {
    if labels.is_empty() || series.is_empty() {
        return no_data(title);
    }
    let margin_left = 62.0;
    let plot_w = WIDTH - margin_left - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let y_base = MARGIN_TOP + plot_h;
    let top = nice_ceiling(
        series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max),
    );

    let mut svg = svg_open(title);
    let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
    legend(&mut svg, &names);
    y_gridlines(&mut svg, margin_left, WIDTH - MARGIN_RIGHT, y_base, plot_h, top);

    let slot = plot_w / labels.len() as f64;
    let sub = slot * 0.8 / series.len() as f64;
    for (i, label) in labels.iter().enumerate() {
        let x_start = margin_left + slot * i as f64 + slot * 0.1;
        for (j, s) in series.iter().enumerate() {
            let value = s.values.get(i).copied().unwrap_or(0.0);
            let bar_h = plot_h * (value / top).clamp(0.0, 1.0);
            let x = x_start + sub * j as f64;
            let y = y_base - bar_h;
            svg.push_str(&format!(
                r#"<rect x="{x:.1}" y="{y:.1}" width="{:.1}" height="{bar_h:.1}" fill="{}"/>"#,
                sub * 0.9,
                PALETTE[j % PALETTE.len()]
            ));
            svg.push('\n');
        }
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11" fill="#333">{}</text>"##,
            margin_left + slot * (i as f64 + 0.5),
            y_base + 16.0,
            escape(label)
        ));
        svg.push('\n');
    }
    svg.push_str("</svg>\n");
    svg
}

/// Horizontal bar chart; category labels on the left, values at bar ends.
pub fn horizontal_bar_chart(title: &str, data: &[(String, f64)]) -> String {
    if data.is_empty() {
        return no_data(title);
    }
    let margin_left = 150.0;
    let plot_w = WIDTH - margin_left - 46.0;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let y_base = MARGIN_TOP + plot_h;
    let top = nice_ceiling(data.iter().map(|(_, v)| *v).fold(0.0, f64::max));

    let mut svg = svg_open(title);
    for i in 0..=4 {
        let frac = f64::from(i) / 4.0;
        let x = margin_left + plot_w * frac;
        let color = if i == 0 { "#999" } else { "#e3e3e3" };
        svg.push_str(&format!(
            r#"<line x1="{x:.1}" y1="{MARGIN_TOP}" x2="{x:.1}" y2="{y_base}" stroke="{color}"/>"#
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r##"<text x="{x:.1}" y="{:.1}" text-anchor="middle" font-size="10" fill="#666">{}</text>"##,
            y_base + 16.0,
            format_number(top * frac)
        ));
        svg.push('\n');
    }

    let slot = plot_h / data.len() as f64;
    for (i, (label, value)) in data.iter().enumerate() {
        let bar_h = slot * 0.6;
        let bar_w = plot_w * (value / top).clamp(0.0, 1.0);
        let y = MARGIN_TOP + slot * i as f64 + slot * 0.2;
        let mid = y + bar_h / 2.0 + 4.0;
        svg.push_str(&format!(
            r#"<rect x="{margin_left}" y="{y:.1}" width="{bar_w:.1}" height="{bar_h:.1}" fill="{}"/>"#,
            PALETTE[0]
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{mid:.1}" text-anchor="end" font-size="11" fill="#333">{}</text>"##,
            margin_left - 8.0,
            escape(label)
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{mid:.1}" font-size="10" fill="#444">{}</text>"##,
            margin_left + bar_w + 5.0,
            format_number(*value)
        ));
        svg.push('\n');
    }
    svg.push_str("</svg>\n");
    svg
}

/// Scatter chart on log-log axes, colored by group.
///
/// Points with a nonpositive coordinate cannot sit on a log axis and are
/// dropped.
pub fn scatter_chart(title: &str, x_label: &str, y_label: &str, points: &[ScatterPoint]) -> String {
    let kept: Vec<&ScatterPoint> = points.iter().filter(|p| p.x > 0.0 && p.y > 0.0).collect();
    if kept.is_empty() {
        return no_data(title);
    }
    let margin_left = 62.0;
    let plot_w = WIDTH - margin_left - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let y_base = MARGIN_TOP + plot_h;

    let x_lo = kept
        .iter()
        .map(|p| p.x)
        .fold(f64::MAX, f64::min)
        .log10()
        .floor() as i32;
    let y_lo = kept
        .iter()
        .map(|p| p.y)
        .fold(f64::MAX, f64::min)
        .log10()
        .floor() as i32;
    let mut x_hi = kept
        .iter()
        .map(|p| p.x)
        .fold(f64::MIN, f64::max)
        .log10()
        .ceil() as i32;
    let mut y_hi = kept
        .iter()
        .map(|p| p.y)
        .fold(f64::MIN, f64::max)
        .log10()
        .ceil() as i32;
    if x_hi <= x_lo {
        x_hi = x_lo + 1;
    }
    if y_hi <= y_lo {
        y_hi = y_lo + 1;
    }

    let mut groups: Vec<&str> = Vec::new();
    for p in &kept {
        if !groups.contains(&p.group.as_str()) {
            groups.push(&p.group);
        }
    }

    let mut svg = svg_open(title);
    legend(&mut svg, &groups);

    for d in x_lo..=x_hi {
        let frac = f64::from(d - x_lo) / f64::from(x_hi - x_lo);
        let x = margin_left + plot_w * frac;
        let color = if d == x_lo { "#999" } else { "#e3e3e3" };
        svg.push_str(&format!(
            r#"<line x1="{x:.1}" y1="{MARGIN_TOP}" x2="{x:.1}" y2="{y_base}" stroke="{color}"/>"#
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r##"<text x="{x:.1}" y="{:.1}" text-anchor="middle" font-size="10" fill="#666">{}</text>"##,
            y_base + 14.0,
            format_number(10.0_f64.powi(d))
        ));
        svg.push('\n');
    }
    for d in y_lo..=y_hi {
        let frac = f64::from(d - y_lo) / f64::from(y_hi - y_lo);
        let y = y_base - plot_h * frac;
        let color = if d == y_lo { "#999" } else { "#e3e3e3" };
        svg.push_str(&format!(
            r#"<line x1="{margin_left}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{color}"/>"#,
            WIDTH - MARGIN_RIGHT
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="10" fill="#666">{}</text>"##,
            margin_left - 6.0,
            y + 3.5,
            format_number(10.0_f64.powi(d))
        ));
        svg.push('\n');
    }

    for p in &kept {
        let color_index = groups.iter().position(|g| *g == p.group).unwrap_or(0);
        let cx = margin_left
            + plot_w * (p.x.log10() - f64::from(x_lo)) / f64::from(x_hi - x_lo);
        let cy = y_base - plot_h * (p.y.log10() - f64::from(y_lo)) / f64::from(y_hi - y_lo);
        svg.push_str(&format!(
            r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="3" fill="{}" fill-opacity="0.65"/>"#,
            PALETTE[color_index % PALETTE.len()]
        ));
        svg.push('\n');
    }

    axis_labels(&mut svg, x_label, y_label, margin_left, plot_w, plot_h);
    svg.push_str("</svg>\n");
    svg
}

/// Box-and-whisker plot: quartile box, median line, whiskers to min/max.
pub fn box_plot(title: &str, y_label: &str, groups: &[(String, Vec<f64>)]) -> String {
    let kept: Vec<(String, Vec<f64>)> = groups
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(label, values)| {
            let mut sorted = values.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            (label.clone(), sorted)
        })
        .collect();
    if kept.is_empty() {
        return no_data(title);
    }
    let margin_left = 62.0;
    let plot_w = WIDTH - margin_left - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let y_base = MARGIN_TOP + plot_h;
    let top = nice_ceiling(
        kept.iter()
            .map(|(_, sorted)| sorted[sorted.len() - 1])
            .fold(0.0, f64::max),
    );
    let scale = |v: f64| y_base - plot_h * (v / top).clamp(0.0, 1.0);

    let mut svg = svg_open(title);
    y_gridlines(&mut svg, margin_left, WIDTH - MARGIN_RIGHT, y_base, plot_h, top);

    let slot = plot_w / kept.len() as f64;
    for (i, (label, sorted)) in kept.iter().enumerate() {
        let q1 = percentile_sorted(sorted, 25.0);
        let q2 = percentile_sorted(sorted, 50.0);
        let q3 = percentile_sorted(sorted, 75.0);
        let lo = sorted[0];
        let hi = sorted[sorted.len() - 1];
        let cx = margin_left + slot * (i as f64 + 0.5);
        let half = slot * 0.25;

        for (from, to) in [(lo, q1), (q3, hi)] {
            svg.push_str(&format!(
                r##"<line x1="{cx:.1}" y1="{:.1}" x2="{cx:.1}" y2="{:.1}" stroke="#333"/>"##,
                scale(from),
                scale(to)
            ));
            svg.push('\n');
        }
        for cap in [lo, hi] {
            svg.push_str(&format!(
                r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#333"/>"##,
                cx - half / 2.0,
                scale(cap),
                cx + half / 2.0,
                scale(cap)
            ));
            svg.push('\n');
        }
        svg.push_str(&format!(
            r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" fill-opacity="0.55" stroke="#333"/>"##,
            cx - half,
            scale(q3),
            half * 2.0,
            scale(q1) - scale(q3),
            PALETTE[i % PALETTE.len()]
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#111" stroke-width="2"/>"##,
            cx - half,
            scale(q2),
            cx + half,
            scale(q2)
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r##"<text x="{cx:.1}" y="{:.1}" text-anchor="middle" font-size="11" fill="#333">{}</text>"##,
            y_base + 16.0,
            escape(label)
        ));
        svg.push('\n');
    }

    axis_labels(&mut svg, "", y_label, margin_left, plot_w, plot_h);
    svg.push_str("</svg>\n");
    svg
}

fn svg_open(title: &str) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" font-family="system-ui, sans-serif">"#
    );
    svg.push('\n');
    svg.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);
    svg.push('\n');
    svg.push_str(&format!(
        r##"<text x="{}" y="24" text-anchor="middle" font-size="15" font-weight="bold" fill="#333">{}</text>"##,
        WIDTH / 2.0,
        escape(title)
    ));
    svg.push('\n');
    svg
}

fn no_data(title: &str) -> String {
    let mut svg = svg_open(title);
    svg.push_str(&format!(
        r##"<text x="{}" y="{}" text-anchor="middle" font-size="13" fill="#888">no data</text>"##,
        WIDTH / 2.0,
        HEIGHT / 2.0
    ));
    svg.push('\n');
    svg.push_str("</svg>\n");
    svg
}

fn legend(svg: &mut String, names: &[&str]) {
    let mut x = 62.0;
    for (i, name) in names.iter().enumerate() {
        svg.push_str(&format!(
            r#"<rect x="{x:.1}" y="25" width="10" height="10" fill="{}"/>"#,
            PALETTE[i % PALETTE.len()]
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="34" font-size="11" fill="#333">{}</text>"##,
            x + 14.0,
            escape(name)
        ));
        svg.push('\n');
        x += 14.0 + name.len() as f64 * 6.5 + 16.0;
    }
}

fn y_gridlines(svg: &mut String, x0: f64, x1: f64, y_base: f64, plot_h: f64, top: f64) {
    for i in 0..=4 {
        let frac = f64::from(i) / 4.0;
        let y = y_base - plot_h * frac;
        let color = if i == 0 { "#999" } else { "#e3e3e3" };
        svg.push_str(&format!(
            r#"<line x1="{x0}" y1="{y:.1}" x2="{x1}" y2="{y:.1}" stroke="{color}"/>"#
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="10" fill="#666">{}</text>"##,
            x0 - 6.0,
            y + 3.5,
            format_number(top * frac)
        ));
        svg.push('\n');
    }
}

fn axis_labels(
    svg: &mut String,
    x_label: &str,
    y_label: &str,
    margin_left: f64,
    plot_w: f64,
    plot_h: f64,
) {
    if !x_label.is_empty() {
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{}" text-anchor="middle" font-size="11" fill="#555">{}</text>"##,
            margin_left + plot_w / 2.0,
            HEIGHT - 6.0,
            escape(x_label)
        ));
        svg.push('\n');
    }
    if !y_label.is_empty() {
        let cy = MARGIN_TOP + plot_h / 2.0;
        svg.push_str(&format!(
            r##"<text transform="rotate(-90 14 {cy:.1})" x="14" y="{cy:.1}" text-anchor="middle" font-size="11" fill="#555">{}</text>"##,
            escape(y_label)
        ));
        svg.push('\n');
    }
}

/// Round up to the nearest 1, 2, or 5 times a power of ten.
fn nice_ceiling(max: f64) -> f64 {
    if max <= 0.0 {
        return 1.0;
    }
    let magnitude = 10.0_f64.powi(max.log10().floor() as i32);
    let scaled = max / magnitude;
    let factor = if scaled <= 1.0 {
        1.0
    } else if scaled <= 2.0 {
        2.0
    } else if scaled <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

/// Compact axis-label formatting: thousands as `k`, small values with
/// enough precision to stay distinguishable.
fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".into();
    }
    let abs = value.abs();
    if abs >= 1000.0 {
        let k = value / 1000.0;
        if (k - k.round()).abs() < 1e-9 {
            format!("{k:.0}k")
        } else {
            format!("{k:.1}k")
        }
    } else if abs >= 10.0 {
        format!("{value:.0}")
    } else if abs >= 1.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn bar_chart_draws_one_rect_per_datum() {
        let data = vec![("Python".to_string(), 120.0), ("Rust".to_string(), 30.0)];
        let svg = bar_chart("Repositories by language", &data);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        // background plus one bar per datum
        assert_eq!(count(&svg, "<rect"), 3);
        assert!(svg.contains("Python"));
        assert!(svg.contains(">120<"));
    }

    #[test]
    fn bar_chart_escapes_labels() {
        let data = vec![("C<script>".to_string(), 1.0)];
        let svg = bar_chart("t", &data);
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
    }

    #[test]
    fn empty_chart_says_no_data() {
        let svg = bar_chart("empty", &[]);
        assert!(svg.contains("no data"));
        assert_eq!(count(&svg, "<rect"), 1);
    }

    #[test]
    fn grouped_bar_draws_labels_times_series_bars() {
        let labels = vec!["Go".to_string(), "Ruby".to_string()];
        let series = vec![
            Series {
                name: "Stars".into(),
                values: vec![100.0, 50.0],
            },
            Series {
                name: "Forks".into(),
                values: vec![20.0, 10.0],
            },
        ];
        let svg = grouped_bar_chart("Popularity", &labels, &series);
        // background + two legend swatches + four bars
        assert_eq!(count(&svg, "<rect"), 7);
        assert!(svg.contains("Stars"));
        assert!(svg.contains("Forks"));
    }

    #[test]
    fn horizontal_bar_places_labels_before_bars() {
        let data = vec![("Web Development".to_string(), 40.0)];
        let svg = horizontal_bar_chart("Categories", &data);
        assert_eq!(count(&svg, "<rect"), 2);
        assert!(svg.contains("Web Development"));
    }

    #[test]
    fn scatter_drops_nonpositive_points() {
        let points = vec![
            ScatterPoint {
                x: 10.0,
                y: 100.0,
                group: "Python".into(),
            },
            ScatterPoint {
                x: 0.0,
                y: 50.0,
                group: "Python".into(),
            },
            ScatterPoint {
                x: 5.0,
                y: -1.0,
                group: "Rust".into(),
            },
        ];
        let svg = scatter_chart("Activity", "commits", "stars", &points);
        assert_eq!(count(&svg, "<circle"), 1);
    }

    #[test]
    fn scatter_legend_lists_groups_in_first_seen_order() {
        let points = vec![
            ScatterPoint {
                x: 1.0,
                y: 1.0,
                group: "Python".into(),
            },
            ScatterPoint {
                x: 2.0,
                y: 2.0,
                group: "Rust".into(),
            },
            ScatterPoint {
                x: 3.0,
                y: 3.0,
                group: "Python".into(),
            },
        ];
        let svg = scatter_chart("t", "x", "y", &points);
        assert_eq!(count(&svg, "<circle"), 3);
        let python_at = svg.find("Python").unwrap();
        let rust_at = svg.find("Rust").unwrap();
        assert!(python_at < rust_at);
    }

    #[test]
    fn box_plot_draws_quartile_boxes() {
        let groups = vec![
            ("Python".to_string(), vec![0.2, 0.4, 0.6, 0.8]),
            ("Rust".to_string(), vec![0.5, 0.5, 0.7]),
        ];
        let svg = box_plot("Resolution rate", "rate", &groups);
        // background + one quartile box per group
        assert_eq!(count(&svg, "<rect"), 3);
        // the median lines are the only thick strokes
        assert_eq!(count(&svg, r#"stroke-width="2""#), 2);
    }

    #[test]
    fn box_plot_skips_empty_groups() {
        let groups = vec![
            ("Python".to_string(), vec![1.0, 2.0]),
            ("Rust".to_string(), vec![]),
        ];
        let svg = box_plot("t", "y", &groups);
        assert_eq!(count(&svg, "<rect"), 2);
        assert!(!svg.contains("Rust"));
    }

    #[test]
    fn nice_ceiling_rounds_to_clean_steps() {
        assert_eq!(nice_ceiling(0.85), 1.0);
        assert_eq!(nice_ceiling(7.0), 10.0);
        assert_eq!(nice_ceiling(120.0), 200.0);
        assert_eq!(nice_ceiling(500.0), 500.0);
        assert_eq!(nice_ceiling(0.0), 1.0);
    }

    #[test]
    fn format_number_is_compact() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(0.73), "0.73");
        assert_eq!(format_number(8.4), "8.4");
        assert_eq!(format_number(120.0), "120");
        assert_eq!(format_number(1500.0), "1.5k");
        assert_eq!(format_number(10_000.0), "10k");
    }
}
