//! Renderer module — trait-based format dispatch for list and detail views.

pub mod html;
pub mod json;
pub mod text;

use crate::links::OfficeLinks;
use crate::model::{AreaIndex, AreaRecord};
use crate::resolve::{resolve_office, Resolution};
use anyhow::{anyhow, Result};
use serde::Serialize;

/// Search results pane.
#[derive(Debug, Serialize)]
pub struct ListView<'a> {
    pub query: String,
    /// Matches before the limit was applied.
    pub total: usize,
    pub items: Vec<&'a AreaRecord>,
}

/// One step of a resolution path, with the name when the code is known.
#[derive(Debug, Serialize)]
pub struct PathStep {
    pub code: String,
    pub name: Option<String>,
    pub group: Option<String>,
}

/// Detail pane for a selected record.
#[derive(Debug, Serialize)]
pub struct DetailView<'a> {
    pub record: &'a AreaRecord,
    pub resolution: Resolution,
    pub steps: Vec<PathStep>,
    pub office_name: Option<String>,
    pub links: Option<OfficeLinks>,
}

impl<'a> DetailView<'a> {
    pub fn new(record: &'a AreaRecord, index: &AreaIndex) -> Self {
        let resolution = resolve_office(Some(&record.code), index);
        let steps = path_steps(&resolution, index);
        let office_name = index
            .get(&resolution.office)
            .filter(|_| resolution.is_ok())
            .map(|office| office.name.clone());
        let links = OfficeLinks::for_resolution(&resolution);
        DetailView {
            record,
            resolution,
            steps,
            office_name,
            links,
        }
    }
}

/// Annotate every code on the resolution path with its record, if any.
pub fn path_steps(resolution: &Resolution, index: &AreaIndex) -> Vec<PathStep> {
    resolution
        .path
        .iter()
        .map(|code| {
            let record = index.get(code);
            PathStep {
                code: code.clone(),
                name: record.map(|r| r.name.clone()),
                group: record.map(|r| r.group.clone()),
            }
        })
        .collect()
}

/// Trait for rendering views into a specific output format.
pub trait Renderer {
    fn render_list(&self, view: &ListView) -> String;
    fn render_detail(&self, view: &DetailView) -> String;
    fn render_resolution(&self, resolution: &Resolution, steps: &[PathStep]) -> String;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "text" | "txt" => Ok(Box::new(text::TextRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        "html" => Ok(Box::new(html::HtmlRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use text, json, or html", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build;
    use serde_json::json;

    #[test]
    fn unknown_format_rejected() {
        let err = create_renderer("yaml").err().unwrap();
        assert!(err.to_string().contains("unknown format: yaml"));
        assert!(create_renderer("txt").is_ok());
    }

    #[test]
    fn detail_view_names_path_and_office() {
        let index = build(&json!({
            "offices": {"B1": {"name": "Office"}},
            "class10s": {"A1": {"name": "Area", "parent": "B1"}}
        }));
        let view = DetailView::new(index.get("A1").unwrap(), &index);
        assert!(view.resolution.is_ok());
        assert_eq!(view.office_name.as_deref(), Some("Office"));
        assert_eq!(view.steps.len(), 2);
        assert_eq!(view.steps[1].group.as_deref(), Some("offices"));
        assert!(view.links.is_some());
    }

    #[test]
    fn detail_view_without_office() {
        let index = build(&json!({"class10s": {"A1": {"parent": "GONE"}}}));
        let view = DetailView::new(index.get("A1").unwrap(), &index);
        assert!(!view.resolution.is_ok());
        assert_eq!(view.office_name, None);
        assert_eq!(view.links, None);
        assert_eq!(view.steps[1].name, None);
    }
}
