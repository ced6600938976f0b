//! HTML for the design form and preview page.

use spoonsmith_core::{BowlShape, FormLimits, HandleShape, PresentationMode, SpoonSpec};
use std::fmt::Write;

const STYLE: &str = "body{font-family:sans-serif;max-width:760px;margin:2em auto;padding:0 1em}\
label{display:block;margin:.6em 0 .2em}\
input[type=range]{width:70%}\
output{margin-left:.6em}\
.preview img{max-width:100%;border:1px solid #ccc}";

/// Query string reproducing `spec` and `mode`.
pub fn spec_query(spec: &SpoonSpec, mode: PresentationMode) -> String {
    let mut query = format!(
        "bowl_shape={}&handle_shape={}",
        spec.bowl_shape, spec.handle_shape
    );
    for (field, value) in spec.dimensions() {
        let _ = write!(query, "&{field}={value}");
    }
    let _ = write!(query, "&mode={mode}");
    query
}

/// The bare design form, prefilled with `spec`.
pub fn index_page(limits: &FormLimits, spec: &SpoonSpec, mode: PresentationMode) -> String {
    page("Spoon Designer", &form(limits, spec, mode))
}

/// The design form followed by a preview of the chosen outline.
pub fn design_page(limits: &FormLimits, spec: &SpoonSpec, mode: PresentationMode) -> String {
    // PNG output is always compact; the SVG download keeps the chosen mode.
    let png_query = spec_query(spec, PresentationMode::Compact);
    let svg_query = spec_query(spec, mode);
    let preview_src = match mode {
        PresentationMode::Compact => format!("/spoon.png?{png_query}"),
        PresentationMode::Template => format!("/template.svg?{svg_query}"),
    };
    let png_query = escape_html(&png_query);
    let svg_query = escape_html(&svg_query);
    let preview_src = escape_html(&preview_src);

    let mut body = form(limits, spec, mode);
    let _ = write!(
        body,
        "<section class=\"preview\">\n\
         <h2>Your Spoon</h2>\n\
         <p>{} bowl, {} handle, total length {} mm</p>\n\
         <img src=\"{preview_src}\" alt=\"Spoon outline preview\">\n\
         <p><a href=\"/spoon.png?{png_query}\" download>Download PNG</a> | \
         <a href=\"/template.svg?{svg_query}\" download>Download SVG</a></p>\n\
         </section>\n",
        spec.bowl_shape,
        spec.handle_shape,
        spec.total_length()
    );
    page("Spoon Designer", &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n{body}</body>\n</html>\n"
    )
}

fn form(limits: &FormLimits, spec: &SpoonSpec, mode: PresentationMode) -> String {
    let mut html = String::from("<form action=\"/design\" method=\"get\">\n");

    let bowls: Vec<&str> = BowlShape::ALL.iter().map(|s| s.name()).collect();
    let handles: Vec<&str> = HandleShape::ALL.iter().map(|s| s.name()).collect();
    let modes = [PresentationMode::Compact.name(), PresentationMode::Template.name()];
    select(&mut html, "bowl_shape", "Bowl Shape", &bowls, spec.bowl_shape.name());
    select(&mut html, "handle_shape", "Handle Shape", &handles, spec.handle_shape.name());

    for (slider, (_, value)) in limits.sliders().iter().zip(spec.dimensions()) {
        let _ = write!(
            html,
            "<label for=\"{name}\">{label}</label>\n\
             <input type=\"range\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"1\" \
             value=\"{value}\" oninput=\"this.nextElementSibling.value=this.value\">\
             <output>{value}</output>\n",
            name = slider.name,
            label = slider.label,
            min = slider.range.min,
            max = slider.range.max,
        );
    }

    select(&mut html, "mode", "Presentation", &modes, mode.name());
    html.push_str("<p><button type=\"submit\">Generate Spoon</button></p>\n</form>\n");
    html
}

fn select(html: &mut String, name: &str, label: &str, options: &[&str], selected: &str) {
    let _ = writeln!(html, "<label for=\"{name}\">{label}</label>");
    let _ = writeln!(html, "<select id=\"{name}\" name=\"{name}\">");
    for option in options {
        let marker = if *option == selected { " selected" } else { "" };
        let _ = writeln!(html, "<option value=\"{option}\"{marker}>{option}</option>");
    }
    html.push_str("</select>\n");
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;")
}
