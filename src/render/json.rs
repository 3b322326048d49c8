//! JSON renderer — structured output for scripts and other tools.

use crate::model::AreaRecord;
use crate::render::*;
use crate::resolve::Resolution;
use serde::Serialize;

pub struct JsonRenderer;

/// List entries omit the raw node to keep search output small.
#[derive(Serialize)]
struct ListItem<'a> {
    code: &'a str,
    name: &'a str,
    group: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<String>,
}

impl<'a> From<&'a AreaRecord> for ListItem<'a> {
    fn from(record: &'a AreaRecord) -> Self {
        ListItem {
            code: &record.code,
            name: &record.name,
            group: &record.group,
            parent: record.direct_parent(),
        }
    }
}

#[derive(Serialize)]
struct ListOutput<'a> {
    query: &'a str,
    total: usize,
    shown: usize,
    items: Vec<ListItem<'a>>,
}

#[derive(Serialize)]
struct ResolutionOutput<'a> {
    #[serde(flatten)]
    resolution: &'a Resolution,
    message: &'static str,
    steps: &'a [PathStep],
}

impl Renderer for JsonRenderer {
    fn render_list(&self, view: &ListView) -> String {
        let output = ListOutput {
            query: &view.query,
            total: view.total,
            shown: view.items.len(),
            items: view.items.iter().map(|r| ListItem::from(*r)).collect(),
        };
        to_json(&output)
    }

    fn render_detail(&self, view: &DetailView) -> String {
        to_json(view)
    }

    fn render_resolution(&self, resolution: &Resolution, steps: &[PathStep]) -> String {
        to_json(&ResolutionOutput {
            resolution,
            message: resolution.reason.message(),
            steps,
        })
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(mut s) => {
            s.push('\n');
            s
        }
        Err(e) => format!("{{\"error\": {}}}\n", serde_json::Value::String(e.to_string())),
    }
}
