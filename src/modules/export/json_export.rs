//! JSON Export
//!
//! Writes a whole dashboard, including fetched card results, to a JSON
//! file.

use crate::domain::dashboard::{selectors, CardDataset, DashCard, DashboardState, Parameter};
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Exportable dashboard (excludes UI state like the sidebar)
#[derive(Serialize)]
struct ExportableDashboard<'a> {
    id: u64,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    parameters: Vec<ExportableParameter<'a>>,
    cards: Vec<ExportableCard<'a>>,
}

#[derive(Serialize)]
struct ExportableParameter<'a> {
    id: &'a str,
    name: &'a str,
    slug: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a Value>,
}

#[derive(Serialize)]
struct ExportableCard<'a> {
    id: u64,
    name: &'a str,
    display: String,
    row: u32,
    col: u32,
    size_x: u32,
    size_y: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a CardDataset>,
}

fn exportable_parameter<'a>(
    parameter: &'a Parameter,
    state: &'a DashboardState,
) -> ExportableParameter<'a> {
    ExportableParameter {
        id: &parameter.id,
        name: &parameter.name,
        slug: &parameter.slug,
        kind: &parameter.kind,
        value: state.parameter_values.get(&parameter.id),
    }
}

fn exportable_card<'a>(dashcard: &'a DashCard, state: &'a DashboardState) -> ExportableCard<'a> {
    ExportableCard {
        id: dashcard.card.id,
        name: &dashcard.card.name,
        display: format!("{:?}", dashcard.card.display).to_lowercase(),
        row: dashcard.row,
        col: dashcard.col,
        size_x: dashcard.size_x,
        size_y: dashcard.size_y,
        data: selectors::card_dataset(state, dashcard.id),
    }
}

/// Write the loaded dashboard to JSON file
pub fn write_dashboard(path: &Path, state: &DashboardState) -> Result<usize, Box<dyn std::error::Error>> {
    let dashboard = selectors::current_dashboard(state).ok_or("no dashboard loaded")?;
    let cards: Vec<ExportableCard> = selectors::ordered_dashcards(state)
        .into_iter()
        .map(|dashcard| exportable_card(dashcard, state))
        .collect();
    let count = cards.len();

    let exportable = ExportableDashboard {
        id: dashboard.id,
        name: &dashboard.name,
        description: dashboard.description.as_deref(),
        parameters: dashboard
            .parameters
            .iter()
            .map(|parameter| exportable_parameter(parameter, state))
            .collect(),
        cards,
    };

    let json = serde_json::to_string_pretty(&exportable)?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(count)
}
