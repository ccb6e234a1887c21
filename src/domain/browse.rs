//! Browse slice: the collections tree and per-collection listings.
//!
//! Small sibling of the dashboard slice, managed by the same store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type CollectionId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

/// What kind of saved thing a collection item points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemModel {
    Dashboard,
    Card,
    #[serde(other)]
    Other,
}

impl ItemModel {
    pub fn title(&self) -> &'static str {
        match self {
            ItemModel::Dashboard => "dashboard",
            ItemModel::Card => "question",
            ItemModel::Other => "item",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionItem {
    pub id: u64,
    pub model: ItemModel,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrowseState {
    pub collections: Vec<Collection>,
    pub collections_loaded: bool,
    pub items: BTreeMap<CollectionId, Vec<CollectionItem>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseAction {
    CollectionsLoaded { collections: Vec<Collection> },
    CollectionItemsLoaded {
        collection_id: CollectionId,
        items: Vec<CollectionItem>,
    },
}

pub fn reduce(state: &BrowseState, action: &BrowseAction) -> BrowseState {
    let mut next = state.clone();
    match action {
        BrowseAction::CollectionsLoaded { collections } => {
            next.collections = collections.clone();
            next.collections_loaded = true;
        }
        BrowseAction::CollectionItemsLoaded {
            collection_id,
            items,
        } => {
            next.items.insert(*collection_id, items.clone());
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(id: u64, name: &str) -> Collection {
        Collection {
            id,
            name: name.to_string(),
            description: None,
            archived: false,
        }
    }

    #[test]
    fn test_collections_loaded_replaces_list() {
        let state = reduce(
            &BrowseState::default(),
            &BrowseAction::CollectionsLoaded {
                collections: vec![collection(1, "Our analytics")],
            },
        );
        assert!(state.collections_loaded);
        assert_eq!(state.collections.len(), 1);

        let state = reduce(
            &state,
            &BrowseAction::CollectionsLoaded {
                collections: vec![collection(1, "Our analytics"), collection(2, "Marketing")],
            },
        );
        assert_eq!(state.collections.len(), 2);
    }

    #[test]
    fn test_items_keyed_by_collection() {
        let state = reduce(
            &BrowseState::default(),
            &BrowseAction::CollectionItemsLoaded {
                collection_id: 2,
                items: vec![CollectionItem {
                    id: 5,
                    model: ItemModel::Dashboard,
                    name: "Funnel".into(),
                    description: None,
                }],
            },
        );
        assert_eq!(state.items[&2].len(), 1);
        assert!(state.items.get(&1).is_none());
    }

    #[test]
    fn test_item_model_parses_unknown_as_other() {
        let model: ItemModel = serde_json::from_str("\"pulse\"").unwrap();
        assert_eq!(model, ItemModel::Other);
    }
}
