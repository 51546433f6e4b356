//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::StopName;

use super::dto::RouteResponse;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page: numbered stop list and route form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub stops: Vec<StopView>,
    pub default_penalty: u32,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Route result fragment.
#[derive(Template)]
#[template(path = "route_result.html")]
pub struct RouteResultTemplate {
    pub route: RouteView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A stop as listed on the index page.
#[derive(Debug, Clone)]
pub struct StopView {
    /// 1-based position in the listing
    pub number: usize,
    pub name: String,
}

impl StopView {
    /// Number a sorted stop list from 1.
    pub fn list<'a>(stops: impl IntoIterator<Item = &'a StopName>) -> Vec<Self> {
        stops
            .into_iter()
            .enumerate()
            .map(|(i, stop)| StopView {
                number: i + 1,
                name: stop.to_string(),
            })
            .collect()
    }
}

/// Route view model for templates.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub origin: String,
    pub destination: String,
    pub found: bool,
    pub total_minutes: u64,
    pub transfers: usize,
    pub transfer_penalty: u32,
    /// Instruction lines, or the single no-route / same-stop message
    pub lines: Vec<String>,
    pub path: String,
}

impl RouteView {
    /// Create from the JSON response model.
    pub fn from_response(response: &RouteResponse) -> Self {
        let lines = if response.instructions.is_empty() {
            vec![response.summary.clone()]
        } else {
            response
                .instructions
                .iter()
                .map(|i| i.text.clone())
                .collect()
        };

        Self {
            origin: response.origin.clone(),
            destination: response.destination.clone(),
            found: response.found,
            total_minutes: response.total_minutes.unwrap_or_default(),
            transfers: response.transfers.unwrap_or_default(),
            transfer_penalty: response.transfer_penalty,
            lines,
            path: response.path.clone(),
        }
    }

    /// "1 change" / "3 changes".
    pub fn transfers_label(&self) -> String {
        match self.transfers {
            1 => "1 change".to_string(),
            n => format!("{n} changes"),
        }
    }
}
