//! HTML renderer — standalone page with a list pane or a detail pane.

use crate::model::AreaRecord;
use crate::render::*;
use crate::resolve::Resolution;

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render_list(&self, view: &ListView) -> String {
        let mut body = String::new();
        body.push_str(&format!(
            "<header><h1>Area search</h1><small>{} of {} matches for <code>{}</code></small></header>\n",
            view.items.len(),
            view.total,
            html_escape(&view.query)
        ));
        body.push_str("<div class=\"list\">\n");
        for record in &view.items {
            body.push_str(&render_item(record));
        }
        body.push_str("</div>\n");
        page("Area search", &body)
    }

    fn render_detail(&self, view: &DetailView) -> String {
        let record = view.record;
        let mut body = String::new();
        body.push_str("<div class=\"detail\">\n");
        body.push_str(&format!("<h2>{}</h2>\n", html_escape(&record.label())));
        body.push_str("<dl>\n");
        push_term(&mut body, "Code", &format!("<code>{}</code>", html_escape(&record.code)));
        push_term(&mut body, "Group", &html_escape(&record.group));
        if let Some(parent) = record.direct_parent() {
            push_term(&mut body, "Parent", &format!("<code>{}</code>", html_escape(&parent)));
        }
        body.push_str("</dl>\n");

        body.push_str("<h3>Office</h3>\n");
        body.push_str(&self.render_resolution(&view.resolution, &view.steps));
        if let Some(ref links) = view.links {
            body.push_str("<ul class=\"links\">\n");
            body.push_str(&format!(
                "  <li><a href=\"{0}\">Forecast</a> <small>{0}</small></li>\n",
                html_escape(&links.forecast)
            ));
            body.push_str(&format!(
                "  <li><a href=\"{0}\">Overview</a> <small>{0}</small></li>\n",
                html_escape(&links.overview)
            ));
            body.push_str("</ul>\n");
        }

        let raw = serde_json::to_string_pretty(&record.raw).unwrap_or_else(|_| record.raw.to_string());
        body.push_str("<h3>Raw</h3>\n");
        body.push_str(&format!("<pre><code>{}</code></pre>\n", html_escape(&raw)));
        body.push_str("</div>\n");
        page(&record.label(), &body)
    }

    fn render_resolution(&self, resolution: &Resolution, steps: &[PathStep]) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "<p class=\"reason reason-{}\">{}",
            resolution.reason,
            html_escape(resolution.reason.message())
        ));
        if resolution.is_ok() {
            out.push_str(&format!(": <code>{}</code>", html_escape(&resolution.office)));
        }
        out.push_str("</p>\n");
        if !steps.is_empty() {
            out.push_str("<ol class=\"path\">\n");
            for step in steps {
                let name = match step.name.as_deref() {
                    Some(name) => html_escape(name),
                    None => "<em>missing</em>".to_string(),
                };
                out.push_str(&format!(
                    "  <li><code>{}</code> {}</li>\n",
                    html_escape(&step.code),
                    name
                ));
            }
            out.push_str("</ol>\n");
        }
        out
    }
}

fn render_item(record: &AreaRecord) -> String {
    format!(
        "  <div class=\"item\"><code>{}</code> {} <small>{}</small></div>\n",
        html_escape(&record.code),
        html_escape(&record.name),
        html_escape(&record.group)
    )
}

fn push_term(out: &mut String, term: &str, definition: &str) {
    out.push_str(&format!("  <dt>{}</dt><dd>{}</dd>\n", term, definition));
}

fn page(title: &str, body: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    out.push_str("<style>\n");
    out.push_str("body { font-family: system-ui, -apple-system, \"Segoe UI\", sans-serif; margin: 24px; line-height: 1.5; }\n");
    out.push_str(".list, .detail { border: 1px solid #ddd; border-radius: 8px; padding: 12px; }\n");
    out.push_str(".item { padding: 8px; border-radius: 6px; }\n");
    out.push_str("small { color: #666; }\n");
    out.push_str("code { background: #f4f4f4; padding: 2px 4px; border-radius: 4px; }\n");
    out.push_str("</style>\n");
    out.push_str("</head>\n<body>\n");
    out.push_str(body);
    out.push_str("</body>\n</html>\n");
    out
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
