//! Pure reducer for dashboard UI state.
//!
//! Rules the whole module obeys:
//! - `(state, action) -> state`, synchronous, no I/O, no clock reads
//!   (timestamps arrive inside actions)
//! - the input state is never mutated; callers replace their copy with
//!   the returned value
//! - no failure modes: a payload naming an id that is not present is a
//!   no-op, never an error

use super::actions::DashboardAction;
use super::state::{
    overlay, CardDataset, CardLoadProgress, DashCardId, DashboardState, Sidebar,
};

pub fn reduce(state: &DashboardState, action: &DashboardAction) -> DashboardState {
    let mut next = state.clone();
    match action {
        DashboardAction::Initialize => {
            next.sidebar = Sidebar::default();
            next.is_editing = None;
        }
        DashboardAction::Reset => {
            next = DashboardState::default();
        }

        DashboardAction::DashboardLoaded {
            dashboard,
            dashcards,
        } => {
            next.dashboard_id = Some(dashboard.id);
            for dashcard in dashcards {
                next.dashcards.insert(dashcard.id, dashcard.clone());
            }
            next.dashboards.insert(dashboard.id, dashboard.clone());
        }
        DashboardAction::CardDataRequested {
            dashcard_ids,
            started_at,
        } => {
            next.load_progress = CardLoadProgress {
                dashcard_ids: dashcard_ids.clone(),
                loading_ids: dashcard_ids.clone(),
                started_at: Some(*started_at),
                is_complete: false,
            };
            next.show_load_complete_indicator = false;
        }
        DashboardAction::CardDataLoaded {
            dashcard_id,
            card_id,
            dataset,
        } => {
            next.dashcard_data
                .entry(*dashcard_id)
                .or_default()
                .insert(*card_id, dataset.clone());
            settle_dashcard(&mut next, *dashcard_id);
        }
        DashboardAction::CardDataFailed {
            dashcard_id,
            card_id,
            error,
        } => {
            next.dashcard_data
                .entry(*dashcard_id)
                .or_default()
                .insert(*card_id, CardDataset::failed(error.clone()));
            settle_dashcard(&mut next, *dashcard_id);
        }
        DashboardAction::CardFetchCancelled { dashcard_id } => {
            // Drops out of the round entirely: a fully cancelled round
            // never reads as complete.
            next.load_progress.loading_ids.retain(|id| id != dashcard_id);
            next.load_progress.dashcard_ids.retain(|id| id != dashcard_id);
        }
        DashboardAction::MarkCardSlow { card_id, result } => {
            next.slow_cards.insert(*card_id, *result);
        }
        DashboardAction::SetShowLoadCompleteIndicator { visible } => {
            next.show_load_complete_indicator = *visible;
        }

        DashboardAction::SetEditingDashboard { dashboard } => match dashboard {
            Some(snapshot) => {
                next.is_editing = Some(snapshot.clone());
            }
            None => {
                // Leaving edit mode always closes any open sidebar.
                next.is_editing = None;
                next.sidebar = Sidebar::default();
            }
        },
        DashboardAction::SetDashboardAttributes {
            id,
            attributes,
            is_dirty,
        } => {
            if let Some(dashboard) = next.dashboards.get_mut(id) {
                let mut merged = overlay(dashboard, attributes);
                merged.is_dirty = is_dirty.unwrap_or(true);
                *dashboard = merged;
            }
        }
        DashboardAction::SetDashcardAttributes { id, attributes } => {
            if let Some(dashcard) = next.dashcards.get_mut(id) {
                let mut merged = overlay(dashcard, attributes);
                merged.is_dirty = true;
                *dashcard = merged;
            }
        }

        DashboardAction::SetSidebar { name, props } => {
            next.sidebar = Sidebar {
                name: Some(name.clone()),
                props: props.clone().unwrap_or_default(),
            };
        }
        DashboardAction::CloseSidebar => {
            next.sidebar = Sidebar::default();
        }
        DashboardAction::ShowAddParameterPopover => {
            next.is_add_parameter_popover_open = true;
        }
        DashboardAction::HideAddParameterPopover => {
            next.is_add_parameter_popover_open = false;
        }

        DashboardAction::RemoveParameter { id } => {
            next.sidebar = Sidebar::default();
            next.parameter_values.remove(id);
        }
        DashboardAction::SetParameterValue { id, value } => {
            next.parameter_values.insert(id.clone(), value.clone());
        }
        DashboardAction::ParameterSearchCached { cache_key, values } => {
            next.parameter_search_cache
                .insert(cache_key.clone(), values.clone());
        }
    }
    next
}

/// A dashcard finished (or failed): take it off the in-flight list and
/// close out the round when it was the last one.
fn settle_dashcard(next: &mut DashboardState, dashcard_id: DashCardId) {
    let progress = &mut next.load_progress;
    progress.loading_ids.retain(|id| *id != dashcard_id);
    if progress.loading_ids.is_empty() && !progress.dashcard_ids.is_empty() && !progress.is_complete
    {
        progress.is_complete = true;
        next.has_seen_loaded_dashboard = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::state::{Card, CardDisplay, DashCard, Dashboard};
    use chrono::Utc;
    use serde_json::{json, Map};

    fn empty_dashboard(id: u64) -> Dashboard {
        serde_json::from_value(json!({
            "id": id,
            "name": "Dashboard",
            "archived": false,
            "can_write": true,
            "enable_embedding": false,
            "creator_id": 1,
            "parameters": [],
            "created_at": "2021-01-01T01:01:01.001",
            "updated_at": "2021-01-01T01:01:01.001"
        }))
        .unwrap()
    }

    fn placement(id: u64, dashboard_id: u64, card_id: u64) -> DashCard {
        DashCard {
            id,
            dashboard_id,
            card: Card {
                id: card_id,
                name: format!("Card {card_id}"),
                display: CardDisplay::Scalar,
                description: None,
            },
            row: 0,
            col: 0,
            size_x: 4,
            size_y: 4,
            is_dirty: false,
            extra: Map::new(),
        }
    }

    fn attrs(pairs: &[(&str, serde_json::Value)]) -> Map<String, serde_json::Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_close_sidebar_always_yields_closed_empty_props() {
        let state = reduce(
            &DashboardState::default(),
            &DashboardAction::SetSidebar {
                name: "foo".into(),
                props: Some(attrs(&[("abc", json!(123))])),
            },
        );
        assert!(state.sidebar.is_open());

        let state = reduce(&state, &DashboardAction::CloseSidebar);
        assert_eq!(state.sidebar, Sidebar::default());
        assert!(state.sidebar.props.is_empty());
    }

    #[test]
    fn test_set_sidebar_defaults_props_to_empty() {
        let state = reduce(
            &DashboardState::default(),
            &DashboardAction::SetSidebar {
                name: "foo".into(),
                props: None,
            },
        );
        assert_eq!(state.sidebar.name.as_deref(), Some("foo"));
        assert!(state.sidebar.props.is_empty());
    }

    #[test]
    fn test_initialize_closes_sidebar_and_clears_editing() {
        let mut state = reduce(
            &DashboardState::default(),
            &DashboardAction::SetSidebar {
                name: "foo".into(),
                props: Some(attrs(&[("abc", json!(123))])),
            },
        );
        state = reduce(
            &state,
            &DashboardAction::SetEditingDashboard {
                dashboard: Some(Box::new(empty_dashboard(1))),
            },
        );

        let state = reduce(&state, &DashboardAction::Initialize);
        assert_eq!(state.sidebar, Sidebar::default());
        assert!(state.is_editing.is_none());
    }

    #[test]
    fn test_entering_edit_mode_preserves_sidebar() {
        let opened = reduce(
            &DashboardState::default(),
            &DashboardAction::SetSidebar {
                name: "sharing".into(),
                props: None,
            },
        );

        let state = reduce(
            &opened,
            &DashboardAction::SetEditingDashboard {
                dashboard: Some(Box::new(empty_dashboard(1))),
            },
        );
        assert_eq!(state.sidebar, opened.sidebar);
        assert_eq!(state.is_editing.as_deref(), Some(&empty_dashboard(1)));
    }

    #[test]
    fn test_leaving_edit_mode_closes_sidebar() {
        let mut state = reduce(
            &DashboardState::default(),
            &DashboardAction::SetSidebar {
                name: "sharing".into(),
                props: None,
            },
        );
        state = reduce(
            &state,
            &DashboardAction::SetEditingDashboard {
                dashboard: Some(Box::new(empty_dashboard(1))),
            },
        );

        let state = reduce(
            &state,
            &DashboardAction::SetEditingDashboard { dashboard: None },
        );
        assert!(state.is_editing.is_none());
        assert_eq!(state.sidebar, Sidebar::default());
    }

    #[test]
    fn test_remove_parameter_deletes_value_and_closes_sidebar() {
        let mut state = DashboardState::default();
        state
            .parameter_values
            .insert("123".into(), json!("abc"));
        state
            .parameter_values
            .insert("456".into(), json!("def"));
        state.sidebar = Sidebar {
            name: Some("edit-parameter".into()),
            props: Map::new(),
        };

        let state = reduce(
            &state,
            &DashboardAction::RemoveParameter { id: "123".into() },
        );
        assert_eq!(state.parameter_values.len(), 1);
        assert_eq!(state.parameter_values.get("456"), Some(&json!("def")));
        assert_eq!(state.sidebar, Sidebar::default());
    }

    #[test]
    fn test_set_dashboard_attributes_merges_and_defaults_dirty() {
        let mut state = DashboardState::default();
        state.dashboards.insert(1, empty_dashboard(1));

        let state = reduce(
            &state,
            &DashboardAction::SetDashboardAttributes {
                id: 1,
                attributes: attrs(&[("name", json!("New Name"))]),
                is_dirty: None,
            },
        );

        let dashboard = &state.dashboards[&1];
        assert_eq!(dashboard.name, "New Name");
        assert!(dashboard.is_dirty);
        assert_eq!(dashboard.created_at, empty_dashboard(1).created_at);
    }

    #[test]
    fn test_set_dashboard_attributes_explicitly_clean() {
        let mut state = DashboardState::default();
        state.dashboards.insert(1, empty_dashboard(1));

        let state = reduce(
            &state,
            &DashboardAction::SetDashboardAttributes {
                id: 1,
                attributes: attrs(&[("name", json!("New Name"))]),
                is_dirty: Some(false),
            },
        );

        let dashboard = &state.dashboards[&1];
        assert_eq!(dashboard.name, "New Name");
        assert!(!dashboard.is_dirty);
    }

    #[test]
    fn test_set_dashboard_attributes_missing_id_is_noop() {
        let mut state = DashboardState::default();
        state.dashboards.insert(1, empty_dashboard(1));

        let next = reduce(
            &state,
            &DashboardAction::SetDashboardAttributes {
                id: 99,
                attributes: attrs(&[("name", json!("New Name"))]),
                is_dirty: None,
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn test_set_dashboard_attributes_leaves_other_dashboards() {
        let mut state = DashboardState::default();
        state.dashboards.insert(1, empty_dashboard(1));
        state.dashboards.insert(2, empty_dashboard(2));

        let next = reduce(
            &state,
            &DashboardAction::SetDashboardAttributes {
                id: 1,
                attributes: attrs(&[("name", json!("New Name"))]),
                is_dirty: None,
            },
        );
        assert_eq!(next.dashboards[&2], state.dashboards[&2]);
    }

    #[test]
    fn test_set_dashcard_attributes_marks_dirty() {
        let mut state = DashboardState::default();
        state.dashcards.insert(7, placement(7, 1, 70));

        let state = reduce(
            &state,
            &DashboardAction::SetDashcardAttributes {
                id: 7,
                attributes: attrs(&[("size_x", json!(8))]),
            },
        );
        assert_eq!(state.dashcards[&7].size_x, 8);
        assert!(state.dashcards[&7].is_dirty);
    }

    #[test]
    fn test_dashboard_loaded_populates_maps() {
        let state = reduce(
            &DashboardState::default(),
            &DashboardAction::DashboardLoaded {
                dashboard: empty_dashboard(1),
                dashcards: vec![placement(10, 1, 100), placement(11, 1, 101)],
            },
        );
        assert_eq!(state.dashboard_id, Some(1));
        assert_eq!(state.dashboards.len(), 1);
        assert_eq!(state.dashcards.len(), 2);
    }

    #[test]
    fn test_card_data_round_completes_when_last_card_lands() {
        let started_at = Utc::now();
        let mut state = reduce(
            &DashboardState::default(),
            &DashboardAction::CardDataRequested {
                dashcard_ids: vec![10, 11],
                started_at,
            },
        );
        assert_eq!(state.load_progress.loading_ids, vec![10, 11]);
        assert_eq!(state.load_progress.started_at, Some(started_at));
        assert!(!state.load_progress.is_complete);

        state = reduce(
            &state,
            &DashboardAction::CardDataLoaded {
                dashcard_id: 10,
                card_id: 100,
                dataset: CardDataset::default(),
            },
        );
        assert_eq!(state.load_progress.loading_ids, vec![11]);
        assert!(!state.load_progress.is_complete);
        assert!(!state.has_seen_loaded_dashboard);

        state = reduce(
            &state,
            &DashboardAction::CardDataFailed {
                dashcard_id: 11,
                card_id: 101,
                error: "query timed out".into(),
            },
        );
        assert!(state.load_progress.loading_ids.is_empty());
        assert!(state.load_progress.is_complete);
        assert!(state.has_seen_loaded_dashboard);
        assert_eq!(
            state.dashcard_data[&11][&101].error.as_deref(),
            Some("query timed out")
        );
    }

    #[test]
    fn test_fully_cancelled_round_never_reads_complete() {
        let mut state = reduce(
            &DashboardState::default(),
            &DashboardAction::CardDataRequested {
                dashcard_ids: vec![10],
                started_at: Utc::now(),
            },
        );
        state = reduce(&state, &DashboardAction::CardFetchCancelled { dashcard_id: 10 });
        assert!(state.load_progress.loading_ids.is_empty());
        assert!(!state.load_progress.is_complete);
        assert!(!state.has_seen_loaded_dashboard);
    }

    #[test]
    fn test_new_round_clears_completion_cue() {
        let mut state = reduce(
            &DashboardState::default(),
            &DashboardAction::SetShowLoadCompleteIndicator { visible: true },
        );
        assert!(state.show_load_complete_indicator);

        state = reduce(
            &state,
            &DashboardAction::CardDataRequested {
                dashcard_ids: vec![10],
                started_at: Utc::now(),
            },
        );
        assert!(!state.show_load_complete_indicator);
    }

    #[test]
    fn test_mark_card_slow_round_trips() {
        let mut state = reduce(
            &DashboardState::default(),
            &DashboardAction::MarkCardSlow {
                card_id: 100,
                result: true,
            },
        );
        assert_eq!(state.slow_cards.get(&100), Some(&true));

        state = reduce(
            &state,
            &DashboardAction::MarkCardSlow {
                card_id: 100,
                result: false,
            },
        );
        assert_eq!(state.slow_cards.get(&100), Some(&false));
    }

    #[test]
    fn test_parameter_value_and_search_cache() {
        let mut state = reduce(
            &DashboardState::default(),
            &DashboardAction::SetParameterValue {
                id: "123".into(),
                value: json!(["WA", "OR"]),
            },
        );
        assert_eq!(state.parameter_values["123"], json!(["WA", "OR"]));

        state = reduce(
            &state,
            &DashboardAction::ParameterSearchCached {
                cache_key: "123:or".into(),
                values: vec![json!("OR"), json!("Orange County")],
            },
        );
        assert_eq!(state.parameter_search_cache["123:or"].len(), 2);
    }

    #[test]
    fn test_popover_flags() {
        let state = reduce(
            &DashboardState::default(),
            &DashboardAction::ShowAddParameterPopover,
        );
        assert!(state.is_add_parameter_popover_open);
        let state = reduce(&state, &DashboardAction::HideAddParameterPopover);
        assert!(!state.is_add_parameter_popover_open);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = reduce(
            &DashboardState::default(),
            &DashboardAction::DashboardLoaded {
                dashboard: empty_dashboard(1),
                dashcards: vec![placement(10, 1, 100)],
            },
        );
        state = reduce(
            &state,
            &DashboardAction::SetParameterValue {
                id: "123".into(),
                value: json!("abc"),
            },
        );

        let state = reduce(&state, &DashboardAction::Reset);
        assert_eq!(state, DashboardState::default());
    }
}
