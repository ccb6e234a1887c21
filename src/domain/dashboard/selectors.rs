//! Read-only projections over [`DashboardState`].
//!
//! Rendering and the shell go through these instead of picking the
//! state apart; none of them allocate beyond the returned collections.

use serde_json::Value;

use super::state::{
    CardDataset, DashCard, DashCardId, Dashboard, DashboardState, Parameter,
};

/// The dashboard currently in focus, if one is loaded.
pub fn current_dashboard(state: &DashboardState) -> Option<&Dashboard> {
    state.dashboards.get(&state.dashboard_id?)
}

pub fn is_editing(state: &DashboardState) -> bool {
    state.is_editing.is_some()
}

/// Placements of the current dashboard in grid order (row-major).
pub fn ordered_dashcards(state: &DashboardState) -> Vec<&DashCard> {
    let Some(dashboard) = current_dashboard(state) else {
        return Vec::new();
    };
    let mut cards: Vec<&DashCard> = state
        .dashcards
        .values()
        .filter(|dashcard| dashcard.dashboard_id == dashboard.id)
        .collect();
    cards.sort_by_key(|dashcard| (dashcard.row, dashcard.col, dashcard.id));
    cards
}

/// The fetched dataset for a placement, if any.
pub fn card_dataset(state: &DashboardState, dashcard_id: DashCardId) -> Option<&CardDataset> {
    let dashcard = state.dashcards.get(&dashcard_id)?;
    state
        .dashcard_data
        .get(&dashcard_id)?
        .get(&dashcard.card.id)
}

pub fn is_card_loading(state: &DashboardState, dashcard_id: DashCardId) -> bool {
    state.load_progress.loading_ids.contains(&dashcard_id)
}

pub fn is_card_slow(state: &DashboardState, dashcard_id: DashCardId) -> bool {
    state
        .dashcards
        .get(&dashcard_id)
        .and_then(|dashcard| state.slow_cards.get(&dashcard.card.id))
        .copied()
        .unwrap_or(false)
}

/// Fraction of the current round already landed, in 0..=1. A round with
/// nothing requested reads as fully loaded.
pub fn loading_fraction(state: &DashboardState) -> f64 {
    let total = state.load_progress.dashcard_ids.len();
    if total == 0 {
        return 1.0;
    }
    let pending = state.load_progress.loading_ids.len();
    (total - pending) as f64 / total as f64
}

/// Parameters of the current dashboard paired with their applied values.
pub fn applied_parameters(state: &DashboardState) -> Vec<(&Parameter, Option<&Value>)> {
    let Some(dashboard) = current_dashboard(state) else {
        return Vec::new();
    };
    dashboard
        .parameters
        .iter()
        .map(|parameter| (parameter, state.parameter_values.get(&parameter.id)))
        .collect()
}

/// True when any loaded record carries unsaved edits.
pub fn has_unsaved_changes(state: &DashboardState) -> bool {
    state.dashboards.values().any(|dashboard| dashboard.is_dirty)
        || state.dashcards.values().any(|dashcard| dashcard.is_dirty)
}

/// Cached search results for a parameter-value query, if present.
pub fn cached_parameter_search<'a>(
    state: &'a DashboardState,
    parameter_id: &str,
    query: &str,
) -> Option<&'a [Value]> {
    state
        .parameter_search_cache
        .get(&search_cache_key(parameter_id, query))
        .map(Vec::as_slice)
}

/// Cache key for a parameter-value search.
pub fn search_cache_key(parameter_id: &str, query: &str) -> String {
    format!("{}:{}", parameter_id, query.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::state::{Card, CardDisplay};
    use serde_json::{json, Map};

    fn dashboard(id: u64, parameters: Vec<Parameter>) -> Dashboard {
        Dashboard {
            id,
            name: format!("Dashboard {id}"),
            description: None,
            archived: false,
            can_write: true,
            enable_embedding: false,
            public_uuid: None,
            collection_id: None,
            creator_id: Some(1),
            parameters,
            dashcard_ids: Vec::new(),
            created_at: None,
            updated_at: None,
            is_dirty: false,
            extra: Map::new(),
        }
    }

    fn placement(id: u64, dashboard_id: u64, card_id: u64, row: u32, col: u32) -> DashCard {
        DashCard {
            id,
            dashboard_id,
            card: Card {
                id: card_id,
                name: format!("Card {card_id}"),
                display: CardDisplay::Table,
                description: None,
            },
            row,
            col,
            size_x: 4,
            size_y: 4,
            is_dirty: false,
            extra: Map::new(),
        }
    }

    fn state_with_grid() -> DashboardState {
        let mut state = DashboardState::default();
        state.dashboard_id = Some(1);
        state.dashboards.insert(1, dashboard(1, Vec::new()));
        state.dashcards.insert(12, placement(12, 1, 120, 1, 0));
        state.dashcards.insert(10, placement(10, 1, 100, 0, 0));
        state.dashcards.insert(11, placement(11, 1, 110, 0, 4));
        // Belongs to another dashboard, must not appear.
        state.dashcards.insert(99, placement(99, 2, 990, 0, 0));
        state
    }

    #[test]
    fn test_ordered_dashcards_row_major_and_scoped() {
        let state = state_with_grid();
        let ids: Vec<u64> = ordered_dashcards(&state).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn test_current_dashboard_requires_focus() {
        let mut state = state_with_grid();
        assert!(current_dashboard(&state).is_some());
        state.dashboard_id = None;
        assert!(current_dashboard(&state).is_none());
    }

    #[test]
    fn test_loading_fraction() {
        let mut state = state_with_grid();
        assert_eq!(loading_fraction(&state), 1.0);

        state.load_progress.dashcard_ids = vec![10, 11, 12, 99];
        state.load_progress.loading_ids = vec![11];
        assert_eq!(loading_fraction(&state), 0.75);
    }

    #[test]
    fn test_card_dataset_keyed_by_placement_and_card() {
        let mut state = state_with_grid();
        state.dashcard_data.entry(10).or_default().insert(
            100,
            CardDataset {
                columns: vec!["count".into()],
                rows: vec![vec![json!(42)]],
                error: None,
            },
        );

        assert!(card_dataset(&state, 10).is_some());
        assert!(card_dataset(&state, 11).is_none());
    }

    #[test]
    fn test_slow_card_resolves_through_card_id() {
        let mut state = state_with_grid();
        state.slow_cards.insert(100, true);
        assert!(is_card_slow(&state, 10));
        assert!(!is_card_slow(&state, 11));
    }

    #[test]
    fn test_applied_parameters_pairs_values() {
        let mut state = DashboardState::default();
        state.dashboard_id = Some(1);
        state.dashboards.insert(
            1,
            dashboard(
                1,
                vec![Parameter {
                    id: "p1".into(),
                    name: "State".into(),
                    slug: "state".into(),
                    kind: "category".into(),
                    default: None,
                }],
            ),
        );
        state.parameter_values.insert("p1".into(), json!("WA"));

        let applied = applied_parameters(&state);
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].0.slug, "state");
        assert_eq!(applied[0].1, Some(&json!("WA")));
    }

    #[test]
    fn test_unsaved_changes_tracks_both_record_kinds() {
        let mut state = state_with_grid();
        assert!(!has_unsaved_changes(&state));
        state.dashcards.get_mut(&10).unwrap().is_dirty = true;
        assert!(has_unsaved_changes(&state));
    }

    #[test]
    fn test_search_cache_key_lowercases_query() {
        assert_eq!(search_cache_key("p1", "OR"), "p1:or");
    }
}
