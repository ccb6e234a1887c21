//! The state container: one value, one dispatch door.
//!
//! `State` holds one field per slice; the root `Action` wraps each
//! slice's action enum and the root reducer routes by variant, so an
//! action addressed to one slice can never disturb another. The store
//! is built in `main` and handed to the shell, there is no global.

use crate::domain::browse::{self, BrowseAction, BrowseState};
use crate::domain::dashboard::{self, DashboardAction, DashboardState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct State {
    pub dashboard: DashboardState,
    pub browse: BrowseState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Dashboard(DashboardAction),
    Browse(BrowseAction),
}

pub fn reduce(state: &State, action: &Action) -> State {
    match action {
        Action::Dashboard(action) => State {
            dashboard: dashboard::reduce(&state.dashboard, action),
            browse: state.browse.clone(),
        },
        Action::Browse(action) => State {
            dashboard: state.dashboard.clone(),
            browse: browse::reduce(&state.browse, action),
        },
    }
}

#[derive(Debug, Default)]
pub struct Store {
    state: State,
}

impl Store {
    pub fn new() -> Self {
        Self {
            state: State::default(),
        }
    }

    /// Run one action through the reducer and replace the state with
    /// the result. Actions are processed one at a time, in call order.
    pub fn dispatch(&mut self, action: Action) {
        self.state = reduce(&self.state, &action);
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn dashboard(&self) -> &DashboardState {
        &self.state.dashboard
    }

    pub fn browse(&self) -> &BrowseState {
        &self.state.browse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::browse::{BrowseAction, Collection};
    use serde_json::json;

    #[test]
    fn test_fresh_store_holds_initial_state() {
        let store = Store::new();
        assert_eq!(store.state(), &State::default());
        assert_eq!(store.dashboard(), &DashboardState::default());
    }

    #[test]
    fn test_action_for_one_slice_leaves_the_other_equal() {
        let mut store = Store::new();
        store.dispatch(Action::Dashboard(DashboardAction::SetParameterValue {
            id: "p1".into(),
            value: json!("WA"),
        }));
        let dashboard_before = store.dashboard().clone();

        store.dispatch(Action::Browse(BrowseAction::CollectionsLoaded {
            collections: vec![Collection {
                id: 1,
                name: "Our analytics".into(),
                description: None,
                archived: false,
            }],
        }));

        assert_eq!(store.dashboard(), &dashboard_before);
        assert!(store.browse().collections_loaded);
    }

    #[test]
    fn test_dispatches_apply_in_call_order() {
        let mut store = Store::new();
        store.dispatch(Action::Dashboard(DashboardAction::SetParameterValue {
            id: "p1".into(),
            value: json!("first"),
        }));
        store.dispatch(Action::Dashboard(DashboardAction::SetParameterValue {
            id: "p1".into(),
            value: json!("second"),
        }));
        assert_eq!(store.dashboard().parameter_values["p1"], json!("second"));
    }
}
