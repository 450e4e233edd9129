// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-page HTML report of SVG snapshots.

/// One titled group of snapshots.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: &'static str,
    pub(crate) description: &'static str,
    /// `(caption, svg)` pairs, shown left to right.
    pub(crate) frames: Vec<(String, String)>,
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">");
    out.push_str(&format!("<title>{title}</title>"));
    out.push_str(
        "<style>body{font-family:sans-serif;margin:24px;color:#333}\
         .row{display:flex;flex-wrap:wrap;gap:12px}\
         figure{margin:0;border:1px solid #ddd;padding:6px}\
         figcaption{font-size:12px;color:#666}</style>",
    );
    out.push_str("</head><body>\n");
    out.push_str(&format!("<h1>{title}</h1>\n"));
    for section in sections {
        out.push_str(&format!(
            "<section><h2>{}</h2><p>{}</p><div class=\"row\">\n",
            section.title, section.description
        ));
        for (caption, svg) in &section.frames {
            out.push_str("<figure>");
            out.push_str(svg);
            out.push_str(&format!("<figcaption>{caption}</figcaption></figure>\n"));
        }
        out.push_str("</div></section>\n");
    }
    out.push_str("</body></html>\n");
    out
}
