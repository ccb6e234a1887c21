//! Wire payloads for the analytics server's REST API.
//!
//! Schemas are the server's own; everything deserializes through serde
//! and converts into domain types at this boundary. Unknown fields ride
//! along in the records' open attribute bags.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::browse::CollectionItem;
use crate::domain::dashboard::{CardDataset, DashCard, Dashboard};

/// `GET /api/user/current`
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self.email.clone(),
        }
    }
}

/// `GET /api/dashboard/:id`: the record with its placements nested.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardDoc {
    #[serde(default, alias = "ordered_cards")]
    pub dashcards: Vec<DashCard>,
    #[serde(flatten)]
    pub dashboard: Dashboard,
}

impl DashboardDoc {
    /// Split into the record and its placements, recording placement
    /// order on the record.
    pub fn into_parts(self) -> (Dashboard, Vec<DashCard>) {
        let mut dashboard = self.dashboard;
        dashboard.dashcard_ids = self.dashcards.iter().map(|dashcard| dashcard.id).collect();
        (dashboard, self.dashcards)
    }
}

/// Card query result: `{data: {cols, rows}, error?}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetDoc {
    #[serde(default)]
    pub data: DatasetData,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetData {
    #[serde(default)]
    pub cols: Vec<ColumnDoc>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnDoc {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl DatasetDoc {
    pub fn into_dataset(self) -> CardDataset {
        CardDataset {
            columns: self
                .data
                .cols
                .into_iter()
                .map(|col| col.display_name.unwrap_or(col.name))
                .collect(),
            rows: self.data.rows,
            error: self.error,
        }
    }
}

/// Collection listings come back either paged (`{data: [...]}`) or as a
/// bare array, depending on server version.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CollectionItemsDoc {
    Paged { data: Vec<CollectionItem> },
    Plain(Vec<CollectionItem>),
}

impl CollectionItemsDoc {
    pub fn into_items(self) -> Vec<CollectionItem> {
        match self {
            CollectionItemsDoc::Paged { data } => data,
            CollectionItemsDoc::Plain(items) => items,
        }
    }
}

/// Parameter-value search results. Entries arrive as one-element arrays
/// (`[["AK"], ["AL"]]`) which unwrap to their value.
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterValuesDoc {
    #[serde(default)]
    pub values: Vec<Value>,
}

impl ParameterValuesDoc {
    pub fn into_values(self) -> Vec<Value> {
        self.values
            .into_iter()
            .map(|value| match value {
                Value::Array(entry) => entry.into_iter().next().unwrap_or(Value::Null),
                other => other,
            })
            .collect()
    }
}

/// `POST /api/dashboard/:id/public_link`
#[derive(Debug, Clone, Deserialize)]
pub struct PublicLinkDoc {
    pub uuid: String,
}

/// `GET /api/database` (paged like collection items).
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseDoc {
    pub id: u64,
    pub name: String,
}

/// `GET /api/permissions/group`
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionsGroupDoc {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub member_count: Option<u64>,
}

/// `GET /api/permissions/graph`: `groups[group_id][db_id]` holds the
/// access descriptor for that pair.
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionsGraphDoc {
    pub revision: i64,
    #[serde(default)]
    pub groups: BTreeMap<String, BTreeMap<String, Value>>,
}

/// Assembled group-by-database access view for the admin screen.
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionsMatrix {
    pub revision: i64,
    pub databases: Vec<String>,
    pub rows: Vec<PermissionsRow>,
}

/// One group's access levels, aligned with `PermissionsMatrix::databases`.
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionsRow {
    pub group: String,
    pub levels: Vec<String>,
}

/// Collapse an access descriptor into the label the matrix shows.
pub fn access_level(descriptor: Option<&Value>) -> String {
    let Some(descriptor) = descriptor else {
        return "none".to_string();
    };
    let data = descriptor.get("data").unwrap_or(descriptor);
    if data.get("native").and_then(Value::as_str) == Some("write") {
        return "native".to_string();
    }
    match data.get("schemas") {
        Some(Value::String(level)) => level.clone(),
        Some(Value::Object(_)) => "granular".to_string(),
        _ => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dashboard_doc_splits_and_records_order() {
        let doc: DashboardDoc = serde_json::from_value(json!({
            "id": 1,
            "name": "Revenue",
            "can_write": true,
            "ordered_cards": [
                {
                    "id": 11,
                    "dashboard_id": 1,
                    "card": {"id": 110, "name": "MRR", "display": "scalar"},
                    "row": 0, "col": 0, "size_x": 4, "size_y": 4
                },
                {
                    "id": 12,
                    "dashboard_id": 1,
                    "card": {"id": 120, "name": "By month", "display": "line"},
                    "row": 0, "col": 4, "size_x": 8, "size_y": 4
                }
            ]
        }))
        .unwrap();

        let (dashboard, dashcards) = doc.into_parts();
        assert_eq!(dashboard.name, "Revenue");
        assert_eq!(dashboard.dashcard_ids, vec![11, 12]);
        assert_eq!(dashcards.len(), 2);
    }

    #[test]
    fn test_dataset_doc_prefers_display_names() {
        let doc: DatasetDoc = serde_json::from_value(json!({
            "data": {
                "cols": [{"name": "total", "display_name": "Total"}, {"name": "month"}],
                "rows": [["a", 1]]
            }
        }))
        .unwrap();
        let dataset = doc.into_dataset();
        assert_eq!(dataset.columns, vec!["Total", "month"]);
        assert_eq!(dataset.rows.len(), 1);
        assert!(dataset.error.is_none());
    }

    #[test]
    fn test_collection_items_both_shapes() {
        let paged: CollectionItemsDoc = serde_json::from_value(json!({
            "data": [{"id": 1, "model": "dashboard", "name": "A"}]
        }))
        .unwrap();
        assert_eq!(paged.into_items().len(), 1);

        let plain: CollectionItemsDoc =
            serde_json::from_value(json!([{"id": 2, "model": "card", "name": "B"}])).unwrap();
        assert_eq!(plain.into_items().len(), 1);
    }

    #[test]
    fn test_parameter_values_unwrap_single_element_rows() {
        let doc: ParameterValuesDoc =
            serde_json::from_value(json!({"values": [["AK"], ["AL"], "plain"]})).unwrap();
        assert_eq!(doc.into_values(), vec![json!("AK"), json!("AL"), json!("plain")]);
    }

    #[test]
    fn test_access_level_labels() {
        assert_eq!(access_level(None), "none");
        assert_eq!(access_level(Some(&json!({"data": {"schemas": "all"}}))), "all");
        assert_eq!(
            access_level(Some(&json!({"data": {"native": "write", "schemas": "all"}}))),
            "native"
        );
        assert_eq!(
            access_level(Some(&json!({"data": {"schemas": {"PUBLIC": "all"}}}))),
            "granular"
        );
    }
}
