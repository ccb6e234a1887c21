//! Dashboard UI state: the immutable value managed by the reducer.
//!
//! The whole state is replaced on every dispatch, never mutated in
//! place. Rendering reads it through selectors; nothing outside the
//! reducer writes it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type DashboardId = u64;
pub type DashCardId = u64;
pub type CardId = u64;

/// Parameter ids are opaque strings assigned by the server.
pub type ParameterId = String;

/// A user-settable filter attached to a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: ParameterId,
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub default: Option<Value>,
}

/// How a card renders its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardDisplay {
    Scalar,
    Table,
    Line,
    Bar,
    #[serde(other)]
    Other,
}

/// A saved question referenced by a dashboard placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub display: CardDisplay,
    #[serde(default)]
    pub description: Option<String>,
}

/// A card placement on a dashboard grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashCard {
    pub id: DashCardId,
    pub dashboard_id: DashboardId,
    pub card: Card,
    pub row: u32,
    pub col: u32,
    pub size_x: u32,
    pub size_y: u32,
    /// Client-side only: placement has local edits not yet saved.
    #[serde(default)]
    pub is_dirty: bool,
    /// Server attributes the client does not model (visualization
    /// settings and the like). Preserved verbatim across overlays.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A dashboard record as held in state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub id: DashboardId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub can_write: bool,
    #[serde(default)]
    pub enable_embedding: bool,
    #[serde(default)]
    pub public_uuid: Option<String>,
    #[serde(default)]
    pub collection_id: Option<u64>,
    #[serde(default)]
    pub creator_id: Option<u64>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Placement ids in server order; grid position decides layout.
    #[serde(default)]
    pub dashcard_ids: Vec<DashCardId>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Client-side only: record has local edits not yet saved.
    #[serde(default)]
    pub is_dirty: bool,
    /// Attributes the client does not model, carried as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One card's fetched result. A failed fetch stores the error message
/// with no rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardDataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CardDataset {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// The transient side panel. `name` of `None` means closed; `props` is
/// always present, at minimum an empty map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sidebar {
    pub name: Option<String>,
    pub props: Map<String, Value>,
}

impl Sidebar {
    pub fn is_open(&self) -> bool {
        self.name.is_some()
    }
}

/// Progress of the current card-data fetch round.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CardLoadProgress {
    pub dashcard_ids: Vec<DashCardId>,
    pub loading_ids: Vec<DashCardId>,
    pub started_at: Option<DateTime<Utc>>,
    pub is_complete: bool,
}

/// UI state for the dashboard screen.
///
/// `Default` is the initial value the screen starts from and the value
/// `Reset` restores.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    pub dashboard_id: Option<DashboardId>,
    pub dashboards: BTreeMap<DashboardId, Dashboard>,
    pub dashcards: BTreeMap<DashCardId, DashCard>,
    pub dashcard_data: BTreeMap<DashCardId, BTreeMap<CardId, CardDataset>>,
    /// `Some` holds the snapshot taken when editing began; `None` is
    /// both "never edited" and "left edit mode".
    pub is_editing: Option<Box<Dashboard>>,
    pub sidebar: Sidebar,
    pub parameter_values: BTreeMap<ParameterId, Value>,
    /// Cached parameter-value searches, keyed "{parameter_id}:{query}".
    pub parameter_search_cache: BTreeMap<String, Vec<Value>>,
    pub load_progress: CardLoadProgress,
    pub is_add_parameter_popover_open: bool,
    pub slow_cards: BTreeMap<CardId, bool>,
    pub has_seen_loaded_dashboard: bool,
    pub show_load_complete_indicator: bool,
}

/// Shallow attribute overlay over a serde-backed record.
///
/// Every key in `attrs` overwrites the matching field wholesale; keys
/// not present keep their prior value. Nested objects are replaced,
/// never deep-merged. A payload that does not type-check against the
/// record leaves it unchanged.
pub fn overlay<T>(record: &T, attrs: &Map<String, Value>) -> T
where
    T: Serialize + DeserializeOwned + Clone,
{
    let Ok(Value::Object(mut doc)) = serde_json::to_value(record) else {
        return record.clone();
    };
    for (key, value) in attrs {
        doc.insert(key.clone(), value.clone());
    }
    serde_json::from_value(Value::Object(doc)).unwrap_or_else(|_| record.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_dashboard() -> Dashboard {
        serde_json::from_value(json!({
            "id": 1,
            "name": "Dashboard",
            "archived": false,
            "can_write": true,
            "enable_embedding": false,
            "creator_id": 1,
            "parameters": [],
            "created_at": "2021-01-01T01:01:01.001",
            "updated_at": "2021-01-01T01:01:01.001",
            "last-edit-info": {
                "id": 1,
                "email": "testy@example.test",
                "first_name": "Testy",
                "timestamp": "2021-01-01T01:01:01.001"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_overlay_overwrites_only_named_keys() {
        let dash = sample_dashboard();
        let mut attrs = Map::new();
        attrs.insert("name".into(), json!("New Name"));

        let merged = overlay(&dash, &attrs);
        assert_eq!(merged.name, "New Name");
        assert_eq!(merged.id, dash.id);
        assert_eq!(merged.created_at, dash.created_at);
        assert_eq!(merged.extra, dash.extra);
    }

    #[test]
    fn test_overlay_replaces_nested_values_wholesale() {
        let dash = sample_dashboard();
        let mut attrs = Map::new();
        attrs.insert("last-edit-info".into(), json!({ "id": 2 }));

        let merged = overlay(&dash, &attrs);
        assert_eq!(merged.extra.get("last-edit-info"), Some(&json!({ "id": 2 })));
    }

    #[test]
    fn test_overlay_keeps_record_on_type_mismatch() {
        let dash = sample_dashboard();
        let mut attrs = Map::new();
        attrs.insert("id".into(), json!("not-a-number"));

        let merged = overlay(&dash, &attrs);
        assert_eq!(merged, dash);
    }

    #[test]
    fn test_overlay_accepts_unknown_keys_into_extra() {
        let dash = sample_dashboard();
        let mut attrs = Map::new();
        attrs.insert("points_of_interest".into(), json!("the big number"));

        let merged = overlay(&dash, &attrs);
        assert_eq!(
            merged.extra.get("points_of_interest"),
            Some(&json!("the big number"))
        );
    }

    #[test]
    fn test_initial_state_shape() {
        let state = DashboardState::default();
        assert_eq!(state.dashboard_id, None);
        assert!(state.dashboards.is_empty());
        assert!(state.dashcards.is_empty());
        assert!(state.dashcard_data.is_empty());
        assert!(state.is_editing.is_none());
        assert_eq!(state.sidebar, Sidebar::default());
        assert!(state.sidebar.props.is_empty());
        assert!(state.parameter_values.is_empty());
        assert!(state.parameter_search_cache.is_empty());
        assert_eq!(state.load_progress, CardLoadProgress::default());
        assert!(state.load_progress.started_at.is_none());
        assert!(!state.load_progress.is_complete);
        assert!(!state.is_add_parameter_popover_open);
        assert!(state.slow_cards.is_empty());
        assert!(!state.has_seen_loaded_dashboard);
        assert!(!state.show_load_complete_indicator);
    }

    #[test]
    fn test_card_display_parses_unknown_as_other() {
        let display: CardDisplay = serde_json::from_value(json!("funnel")).unwrap();
        assert_eq!(display, CardDisplay::Other);
        let display: CardDisplay = serde_json::from_value(json!("scalar")).unwrap();
        assert_eq!(display, CardDisplay::Scalar);
    }
}
