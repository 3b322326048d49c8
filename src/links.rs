//! Forecast API URLs derived from a resolved office code.

use crate::resolve::Resolution;
use serde::Serialize;

const FORECAST_BASE: &str = "https://www.jma.go.jp/bosai/forecast/data/forecast";
const OVERVIEW_BASE: &str = "https://www.jma.go.jp/bosai/forecast/data/overview_forecast";

pub fn forecast_url(office: &str) -> String {
    format!("{FORECAST_BASE}/{office}.json")
}

pub fn overview_url(office: &str) -> String {
    format!("{OVERVIEW_BASE}/{office}.json")
}

/// Downstream endpoints for one office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfficeLinks {
    pub forecast: String,
    pub overview: String,
}

impl OfficeLinks {
    pub fn new(office: &str) -> Self {
        OfficeLinks {
            forecast: forecast_url(office),
            overview: overview_url(office),
        }
    }

    /// Links for a successful resolution, `None` otherwise.
    pub fn for_resolution(resolution: &Resolution) -> Option<Self> {
        resolution
            .is_ok()
            .then(|| OfficeLinks::new(&resolution.office))
    }
}
