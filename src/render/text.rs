//! Plain-text renderer for terminal output.

use crate::render::*;
use crate::resolve::Resolution;

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render_list(&self, view: &ListView) -> String {
        let mut out = String::new();
        let width = view.items.iter().map(|r| r.code.len()).max().unwrap_or(0);
        for record in &view.items {
            out.push_str(&format!(
                "{:<width$}  {}  [{}]\n",
                record.code,
                display_name(&record.name),
                record.group,
                width = width
            ));
        }
        if view.items.len() < view.total {
            out.push_str(&format!("... {} of {} matches shown\n", view.items.len(), view.total));
        } else if view.total == 0 {
            out.push_str(&format!("no matches for \"{}\"\n", view.query));
        }
        out
    }

    fn render_detail(&self, view: &DetailView) -> String {
        let record = view.record;
        let mut out = String::new();
        out.push_str(&format!("code:     {}\n", record.code));
        out.push_str(&format!("name:     {}\n", display_name(&record.name)));
        out.push_str(&format!("group:    {}\n", record.group));
        if let Some(parent) = record.direct_parent() {
            out.push_str(&format!("parent:   {}\n", parent));
        }
        out.push('\n');
        out.push_str(&self.render_resolution(&view.resolution, &view.steps));
        if let Some(ref name) = view.office_name {
            out.push_str(&format!("office name: {}\n", display_name(name)));
        }
        if let Some(ref links) = view.links {
            out.push_str(&format!("forecast: {}\n", links.forecast));
            out.push_str(&format!("overview: {}\n", links.overview));
        }
        out.push_str("\nraw:\n");
        let raw = serde_json::to_string_pretty(&record.raw).unwrap_or_else(|_| record.raw.to_string());
        for line in raw.lines() {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    fn render_resolution(&self, resolution: &Resolution, steps: &[PathStep]) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "office:   {}\n",
            if resolution.office.is_empty() { "-" } else { resolution.office.as_str() }
        ));
        out.push_str(&format!(
            "status:   {} ({})\n",
            resolution.reason,
            resolution.reason.message()
        ));
        if !steps.is_empty() {
            let chain: Vec<String> = steps.iter().map(step_label).collect();
            out.push_str(&format!("path:     {}\n", chain.join(" -> ")));
        }
        out
    }
}

fn step_label(step: &PathStep) -> String {
    match step.name.as_deref() {
        Some(name) if !name.is_empty() => format!("{} {}", step.code, name),
        Some(_) => step.code.clone(),
        None => format!("{} (missing)", step.code),
    }
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "(no name)"
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build;
    use crate::query::{count_matches, search};
    use serde_json::json;

    fn index() -> crate::model::AreaIndex {
        build(&json!({
            "offices": {"130000": {"name": "Tokyo"}},
            "class10s": {
                "130010": {"name": "Tokyo Area", "parent": "130000"},
                "999": {"parent": "404"}
            }
        }))
    }

    #[test]
    fn list_aligns_codes() {
        let index = index();
        let view = ListView {
            query: "".into(),
            total: count_matches(&index, ""),
            items: search(&index, "", 0),
        };
        let out = TextRenderer.render_list(&view);
        assert!(out.contains("130000  Tokyo  [offices]\n"));
        assert!(out.contains("999     (no name)  [class10s]\n"));
    }

    #[test]
    fn list_reports_truncation_and_empty() {
        let index = index();
        let view = ListView {
            query: "1".into(),
            total: count_matches(&index, "1"),
            items: search(&index, "1", 1),
        };
        assert!(TextRenderer.render_list(&view).contains("... 1 of 2 matches shown"));

        let empty = ListView {
            query: "osaka".into(),
            total: 0,
            items: vec![],
        };
        assert_eq!(TextRenderer.render_list(&empty), "no matches for \"osaka\"\n");
    }

    #[test]
    fn detail_shows_path_and_links() {
        let index = index();
        let view = DetailView::new(index.get("130010").unwrap(), &index);
        let out = TextRenderer.render_detail(&view);
        assert!(out.contains("office:   130000\n"));
        assert!(out.contains("status:   ok (Office resolved)\n"));
        assert!(out.contains("path:     130010 Tokyo Area -> 130000 Tokyo\n"));
        assert!(out.contains("forecast: https://www.jma.go.jp/bosai/forecast/data/forecast/130000.json"));
        assert!(out.contains("\"parent\": \"130000\""));
    }

    #[test]
    fn detail_for_dead_end() {
        let index = index();
        let view = DetailView::new(index.get("999").unwrap(), &index);
        let out = TextRenderer.render_detail(&view);
        assert!(out.contains("office:   -\n"));
        assert!(out.contains("status:   not_found"));
        assert!(out.contains("404 (missing)"));
        assert!(!out.contains("forecast:"));
    }
}
