//! SVG box-plot rendering
//!
//! One box per strategy: the box spans Q1..Q3 with a line at the median,
//! whiskers reach the furthest samples within 1.5 IQR of the box, and
//! anything beyond is drawn as an outlier dot.

use crate::benchmark::BenchmarkReport;
use crate::output::stats::SampleSummary;
use std::fmt::Write;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const BOX_WIDTH: f64 = 0.5;

/// Axis label for a strategy key
fn label_for(key: &str) -> &str {
    match key {
        "single_thread" => "Single",
        "thread_pool" => "Threads",
        "cooperative" => "Cooperative",
        other => other,
    }
}

/// Rounds a raw tick step up to 1, 2 or 5 times a power of ten
fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Renders the report as a standalone SVG document
pub fn render_svg(report: &BenchmarkReport) -> String {
    let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let max_sample = report
        .iter()
        .flat_map(|(_, samples)| samples.iter().copied())
        .fold(0.0_f64, f64::max);
    let step = nice_step(max_sample / 5.0);
    let y_max = ((max_sample / step).ceil() * step).max(step);
    let y = |value: f64| MARGIN_TOP + plot_height * (1.0 - value / y_max);

    let slots = report.len().max(1) as f64;
    let slot_width = plot_width / slots;
    let x = |index: usize| MARGIN_LEFT + slot_width * (index as f64 + 0.5);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = WIDTH,
        h = HEIGHT
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="middle" font-size="18">Crawler Performance Comparison</text>"#,
        WIDTH / 2.0,
        MARGIN_TOP / 2.0 + 6.0
    );

    // Grid and y ticks
    let mut tick = 0.0;
    while tick <= y_max + step / 2.0 {
        let ty = y(tick);
        let _ = writeln!(
            svg,
            r##"<line x1="{x1}" y1="{ty:.1}" x2="{x2}" y2="{ty:.1}" stroke="#999" stroke-opacity="0.4" stroke-dasharray="4 4"/>"##,
            x1 = MARGIN_LEFT,
            x2 = WIDTH - MARGIN_RIGHT,
            ty = ty
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{:.1}" text-anchor="end" font-size="12">{}</text>"#,
            MARGIN_LEFT - 8.0,
            ty + 4.0,
            format_tick(tick, step)
        );
        tick += step;
    }

    // Axes
    let _ = writeln!(
        svg,
        r#"<line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="black"/>"#,
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = HEIGHT - MARGIN_BOTTOM
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="black"/>"#,
        l = MARGIN_LEFT,
        r = WIDTH - MARGIN_RIGHT,
        b = HEIGHT - MARGIN_BOTTOM
    );
    let _ = writeln!(
        svg,
        r#"<text x="20" y="{}" text-anchor="middle" font-size="14" transform="rotate(-90 20 {})">Seconds</text>"#,
        MARGIN_TOP + plot_height / 2.0,
        MARGIN_TOP + plot_height / 2.0
    );

    for (index, (key, samples)) in report.iter().enumerate() {
        let cx = x(index);
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{}" text-anchor="middle" font-size="14">{}</text>"#,
            cx,
            HEIGHT - MARGIN_BOTTOM + 24.0,
            label_for(key)
        );

        let Some(summary) = SampleSummary::from_samples(samples) else {
            continue;
        };
        draw_box(&mut svg, &summary, samples, cx, slot_width * BOX_WIDTH, &y);
    }

    svg.push_str("</svg>\n");
    svg
}

fn draw_box(
    svg: &mut String,
    summary: &SampleSummary,
    samples: &[f64],
    cx: f64,
    box_width: f64,
    y: &dyn Fn(f64) -> f64,
) {
    let low_fence = summary.q1 - 1.5 * summary.iqr();
    let high_fence = summary.q3 + 1.5 * summary.iqr();
    let whisker_low = samples
        .iter()
        .copied()
        .filter(|s| *s >= low_fence)
        .fold(f64::INFINITY, f64::min);
    let whisker_high = samples
        .iter()
        .copied()
        .filter(|s| *s <= high_fence)
        .fold(f64::NEG_INFINITY, f64::max);

    let left = cx - box_width / 2.0;
    let cap = box_width / 4.0;

    let _ = writeln!(
        svg,
        r#"<line x1="{cx:.1}" y1="{a:.1}" x2="{cx:.1}" y2="{b:.1}" stroke="black"/>"#,
        cx = cx,
        a = y(whisker_high),
        b = y(summary.q3)
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{cx:.1}" y1="{a:.1}" x2="{cx:.1}" y2="{b:.1}" stroke="black"/>"#,
        cx = cx,
        a = y(summary.q1),
        b = y(whisker_low)
    );
    for whisker in [whisker_low, whisker_high] {
        let _ = writeln!(
            svg,
            r#"<line x1="{:.1}" y1="{wy:.1}" x2="{:.1}" y2="{wy:.1}" stroke="black"/>"#,
            cx - cap,
            cx + cap,
            wy = y(whisker)
        );
    }
    let _ = writeln!(
        svg,
        r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="#dbe8f5" stroke="black"/>"##,
        left,
        y(summary.q3),
        box_width,
        (y(summary.q1) - y(summary.q3)).max(1.0)
    );
    let _ = writeln!(
        svg,
        r##"<line x1="{:.1}" y1="{my:.1}" x2="{:.1}" y2="{my:.1}" stroke="#e07b00" stroke-width="2"/>"##,
        left,
        left + box_width,
        my = y(summary.median)
    );

    for outlier in samples.iter().filter(|s| **s < low_fence || **s > high_fence) {
        let _ = writeln!(
            svg,
            r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="none" stroke="black"/>"#,
            cx,
            y(*outlier)
        );
    }
}

/// Formats a tick value with as many decimals as the step needs
fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    format!("{:.*}", decimals, value)
}
