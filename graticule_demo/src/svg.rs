// Copyright 2025 the Graticule Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG output for `graticule_demo`.

use std::fmt::Write as _;

use graticule_axis::{LabelPlacement, LineSegment, RenderSink};
use graticule_text::FontWeight;
use kurbo::{Circle, Rect};
use peniko::Brush;

/// Collects chart geometry as SVG elements.
#[derive(Debug)]
pub(crate) struct SvgSink {
    view_box: Rect,
    body: String,
    defs: String,
    next_clip: usize,
    open_clips: usize,
}

impl SvgSink {
    pub(crate) fn new(view_box: Rect) -> Self {
        Self {
            view_box,
            body: String::new(),
            defs: String::new(),
            next_clip: 0,
            open_clips: 0,
        }
    }

    pub(crate) fn into_svg_string(mut self) -> String {
        while self.open_clips > 0 {
            self.pop_clip();
        }
        let v = self.view_box;
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
            v.x0,
            v.y0,
            v.width(),
            v.height(),
            v.width(),
            v.height()
        );
        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            out.push_str(&self.defs);
            out.push_str("</defs>\n");
        }
        let _ = writeln!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="white"/>"#,
            v.x0,
            v.y0,
            v.width(),
            v.height()
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl RenderSink for SvgSink {
    fn line(&mut self, segment: &LineSegment) {
        let l = segment.line;
        let _ = write!(
            self.body,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{}""#,
            l.p0.x, l.p0.y, l.p1.x, l.p1.y, segment.stroke.stroke_width
        );
        write_paint_attr(&mut self.body, "stroke", &segment.stroke.brush);
        if !segment.stroke.dash.is_empty() {
            let dash: Vec<String> = segment.stroke.dash.iter().map(f64::to_string).collect();
            let _ = write!(self.body, r#" stroke-dasharray="{}""#, dash.join(" "));
        }
        self.body.push_str("/>\n");
    }

    fn label(&mut self, label: &LabelPlacement<'_>) {
        let c = label.rect.center();
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" font-size="{}" font-family="{}" text-anchor="middle" dominant-baseline="middle""#,
            c.x,
            c.y,
            label.settings.style.font_size,
            label.settings.style.font_family.as_css_family()
        );
        let weight = label.settings.style.font_weight;
        if weight != FontWeight::NORMAL {
            let _ = write!(self.body, r#" font-weight="{}""#, weight.0);
        }
        if label.settings.rotation != 0.0 {
            let _ = write!(
                self.body,
                r#" transform="rotate({} {} {})""#,
                label.settings.rotation, c.x, c.y
            );
        }
        write_paint_attr(&mut self.body, "fill", &label.settings.brush);
        self.body.push('>');
        self.body.push_str(&escape_xml(label.text));
        self.body.push_str("</text>\n");
    }

    fn circle(&mut self, circle: Circle, brush: &Brush) {
        let _ = write!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{}""#,
            circle.center.x, circle.center.y, circle.radius
        );
        write_paint_attr(&mut self.body, "fill", brush);
        self.body.push_str("/>\n");
    }

    fn push_clip(&mut self, rect: Rect) {
        let id = self.next_clip;
        self.next_clip += 1;
        let _ = writeln!(
            self.defs,
            r#"<clipPath id="clip{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height()
        );
        let _ = writeln!(self.body, r#"<g clip-path="url(#clip{id})">"#);
        self.open_clips += 1;
    }

    fn pop_clip(&mut self) {
        if self.open_clips > 0 {
            self.open_clips -= 1;
            self.body.push_str("</g>\n");
        }
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = (rgba.a != 255).then(|| f64::from(rgba.a) / 255.0);
            (fill, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
