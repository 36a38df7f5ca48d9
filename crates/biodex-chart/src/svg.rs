//! SVG bar chart of animal speeds, coloured by diet.

use std::fmt::Write;

use crate::data::{AnimalDatum, Diet};
use crate::scale::{BandScale, LinearScale};

pub const MIN_WIDTH: u32 = 700;
pub const HEIGHT: u32 = 500;
pub const TITLE: &str = "Animal Speed by Diet";

struct Margin {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

const MARGIN: Margin = Margin { top: 40.0, right: 150.0, bottom: 100.0, left: 70.0 };

/// Render the chart. `width` is a hint; the chart is never narrower than
/// [`MIN_WIDTH`].
pub fn render_svg(data: &[AnimalDatum], width: u32) -> String {
    let width = width.max(MIN_WIDTH) as f64;
    let height = HEIGHT as f64;
    let inner_w = width - MARGIN.left - MARGIN.right;
    let inner_h = height - MARGIN.top - MARGIN.bottom;

    let mut svg = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="{TITLE}">"#,
        w = width,
        h = height,
    );

    if data.is_empty() {
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" text-anchor="middle" style="font-size: 14px; fill: currentColor">No animal data available.</text>"#,
            width / 2.0,
            height / 2.0
        );
        svg.push_str("</svg>\n");
        return svg;
    }

    let x = BandScale::new(data.len(), inner_w, 0.2);
    let max_speed = data.iter().map(|d| d.speed).fold(0.0, f64::max);
    let y = LinearScale::new(max_speed, inner_h);

    let _ = writeln!(
        svg,
        r#"<text x="{}" y="25" text-anchor="middle" style="font-size: 16px; font-weight: bold; fill: currentColor">{TITLE}</text>"#,
        width / 2.0
    );
    let _ = writeln!(svg, r#"<g transform="translate({},{})">"#, MARGIN.left, MARGIN.top);

    // Bars
    for (i, d) in data.iter().enumerate() {
        let top = y.y(d.speed);
        let _ = writeln!(
            svg,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" rx="3" opacity="0.85"><title>{}: {} km/h</title></rect>"#,
            x.x(i),
            top,
            x.bandwidth(),
            inner_h - top,
            d.diet.color(),
            escape(&d.name),
            d.speed
        );
    }

    // X axis
    let _ = writeln!(svg, r#"<g class="x-axis" transform="translate(0,{})">"#, inner_h);
    let _ = writeln!(svg, r#"<line x1="0" x2="{}" y1="0" y2="0" stroke="currentColor"/>"#, inner_w);
    for (i, d) in data.iter().enumerate() {
        let cx = x.x(i) + x.bandwidth() / 2.0;
        let _ = writeln!(
            svg,
            r#"<g transform="translate({cx:.2},0)"><line y2="6" stroke="currentColor"/><text y="9" dy="0.71em" transform="rotate(-40)" style="text-anchor: end; font-size: 11px; fill: currentColor">{}</text></g>"#,
            escape(&d.name)
        );
    }
    svg.push_str("</g>\n");

    // Y axis
    svg.push_str("<g class=\"y-axis\">\n");
    let _ = writeln!(svg, r#"<line x1="0" x2="0" y1="0" y2="{}" stroke="currentColor"/>"#, inner_h);
    for tick in y.ticks() {
        let ty = y.y(tick);
        let _ = writeln!(
            svg,
            r#"<g transform="translate(0,{ty:.2})"><line x2="-6" stroke="currentColor"/><text x="-9" dy="0.32em" style="text-anchor: end; font-size: 10px; fill: currentColor">{}</text></g>"#,
            format_tick(tick)
        );
    }
    svg.push_str("</g>\n");

    // Axis labels
    let _ = writeln!(
        svg,
        r#"<text transform="rotate(-90)" y="-55" x="{}" text-anchor="middle" style="font-size: 13px; fill: currentColor">Speed (km/h)</text>"#,
        -inner_h / 2.0
    );
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="middle" style="font-size: 13px; fill: currentColor">Animal</text>"#,
        inner_w / 2.0,
        inner_h + 85.0
    );
    svg.push_str("</g>\n");

    // Legend
    let _ = writeln!(
        svg,
        r#"<g class="legend" transform="translate({},{})">"#,
        width - MARGIN.right + 15.0,
        MARGIN.top
    );
    for (i, diet) in Diet::ALL.iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"<g transform="translate(0,{})"><rect width="14" height="14" rx="2" fill="{}"/><text x="20" y="12" style="font-size: 12px; fill: currentColor">{}</text></g>"#,
            i * 25,
            diet.color(),
            diet.label()
        );
    }
    svg.push_str("</g>\n</svg>\n");
    svg
}

fn format_tick(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        // trim float noise such as 0.30000000000000004
        let s = format!("{:.6}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
