//! Dashboard Page
//!
//! Assembles rendered charts into a single static HTML page. Each chart
//! mounts into a named slot; slots without a chart render a placeholder
//! so the page layout stays stable when a sensor fails to load.

use crate::loader::{default_requests, RenderedChart};
use crate::render::xml_escape;
use chrono::Local;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PageError {
    #[error("Unknown chart slot: {0}")]
    UnknownSlot(String),
}

struct Slot {
    id: String,
    heading: String,
    chart: Option<RenderedChart>,
}

/// A static dashboard page with named chart slots
pub struct DashboardPage {
    title: String,
    slots: Vec<Slot>,
}

impl DashboardPage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slots: Vec::new(),
        }
    }

    /// Add a chart slot; mounting targets slots by id
    pub fn with_slot(mut self, id: impl Into<String>, heading: impl Into<String>) -> Self {
        self.slots.push(Slot {
            id: id.into(),
            heading: heading.into(),
            chart: None,
        });
        self
    }

    /// Mount a rendered chart into the slot it was loaded for
    pub fn mount(&mut self, chart: RenderedChart) -> Result<(), PageError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.id == chart.slot)
            .ok_or_else(|| PageError::UnknownSlot(chart.slot.clone()))?;
        slot.chart = Some(chart);
        Ok(())
    }

    /// Render the full page as an HTML document
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", xml_escape(&self.title)));
        html.push_str("<style>\n");
        html.push_str("body { background: #111827; color: #9ca3af; font-family: sans-serif; margin: 0; padding: 2rem; }\n");
        html.push_str("h1 { color: #f9fafb; }\n");
        html.push_str(
            "section { background: #1f2937; border-radius: 8px; padding: 1rem; margin-bottom: 1.5rem; }\n",
        );
        html.push_str("h2 { margin-top: 0; font-size: 1rem; text-transform: capitalize; }\n");
        html.push_str(".empty { color: #6b7280; padding: 2rem; text-align: center; }\n");
        html.push_str("footer { font-size: 0.8rem; color: #6b7280; }\n");
        html.push_str("</style>\n</head>\n<body>\n");
        html.push_str(&format!("<h1>{}</h1>\n", xml_escape(&self.title)));

        for slot in &self.slots {
            html.push_str(&format!(
                "<section id=\"{}\">\n<h2>{}</h2>\n",
                xml_escape(&slot.id),
                xml_escape(&slot.heading)
            ));
            match &slot.chart {
                Some(chart) => html.push_str(&chart.svg),
                None => html.push_str("<div class=\"empty\">No data loaded</div>\n"),
            }
            html.push_str("</section>\n");
        }

        html.push_str(&format!(
            "<footer>Generated at {}</footer>\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        html.push_str("</body>\n</html>\n");
        html
    }

    /// Write the page to disk
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_html())
    }
}

impl Default for DashboardPage {
    /// The standard three-sensor dashboard layout
    fn default() -> Self {
        let mut page = Self::new("Solarium Dashboard");
        for request in default_requests() {
            page = page.with_slot(request.slot, request.sensor);
        }
        page
    }
}
