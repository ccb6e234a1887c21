//! Dashboard edit mode
//!
//! Entering edit mode snapshots the dashboard so a cancel can discard
//! everything; attribute changes pile up as dirty state until `:save`
//! pushes them (or applies them directly in mock mode).

use chrono::Utc;
use serde_json::{Map, Value};

use crate::app::{App, DataMode};
use crate::core::{Action, NotifyLevel};
use crate::domain::dashboard::{DashboardAction, Parameter};

/// `:edit` snapshots the open dashboard and switches to edit mode.
pub fn enter(app: &mut App) -> Action {
    let Some(dashboard) = app.current_dashboard() else {
        return Action::Notify("No dashboard open".to_string(), NotifyLevel::Warn);
    };
    if app.store.dashboard().is_editing.is_some() {
        return Action::Notify("Already editing".to_string(), NotifyLevel::Info);
    }
    if !dashboard.can_write {
        return Action::Notify(
            "You do not have edit access to this dashboard".to_string(),
            NotifyLevel::Warn,
        );
    }

    let snapshot = Box::new(dashboard.clone());
    app.editing_layout_backup = Some(app.ordered_dashcards().into_iter().cloned().collect());
    app.dispatch(DashboardAction::SetEditingDashboard {
        dashboard: Some(snapshot),
    });
    app.sync_context();
    Action::Notify(
        "Editing dashboard (:save to keep, :cancel to discard)".to_string(),
        NotifyLevel::Info,
    )
}

/// `:save` pushes the edited attributes and leaves edit mode.
pub fn save(app: &mut App) -> Action {
    if app.store.dashboard().is_editing.is_none() {
        return Action::Notify("Not editing".to_string(), NotifyLevel::Warn);
    }
    let Some(dashboard) = app.current_dashboard().cloned() else {
        return Action::Notify("No dashboard open".to_string(), NotifyLevel::Warn);
    };

    match app.data_mode {
        DataMode::Mock => {
            let mut saved = dashboard;
            saved.is_dirty = false;
            let dashcards = app
                .ordered_dashcards()
                .into_iter()
                .cloned()
                .map(|mut dc| {
                    dc.is_dirty = false;
                    dc
                })
                .collect();
            app.apply_dashboard_saved(saved, dashcards);
            Action::None
        }
        DataMode::Api => {
            let mut attributes = Map::new();
            attributes.insert("name".to_string(), Value::String(dashboard.name.clone()));
            attributes.insert(
                "description".to_string(),
                dashboard
                    .description
                    .clone()
                    .map(Value::String)
                    .unwrap_or(Value::Null),
            );
            match serde_json::to_value(&dashboard.parameters) {
                Ok(parameters) => {
                    attributes.insert("parameters".to_string(), parameters);
                }
                Err(err) => {
                    return Action::Notify(format!("Save failed: {err}"), NotifyLevel::Error);
                }
            }
            app.pending_save_request = Some((dashboard.id, attributes));
            Action::Notify("Saving dashboard".to_string(), NotifyLevel::Info)
        }
    }
}

/// `:cancel` restores the snapshot taken by `enter` and drops all edits.
pub fn cancel(app: &mut App) -> Action {
    let Some(snapshot) = app.store.dashboard().is_editing.clone() else {
        return Action::Notify("Not editing".to_string(), NotifyLevel::Warn);
    };
    let layout = match app.editing_layout_backup.take() {
        Some(layout) => layout,
        None => app.ordered_dashcards().into_iter().cloned().collect(),
    };
    app.dispatch(DashboardAction::DashboardLoaded {
        dashboard: *snapshot,
        dashcards: layout,
    });
    app.dispatch(DashboardAction::SetEditingDashboard { dashboard: None });
    app.sync_context();
    Action::Notify("Edits discarded".to_string(), NotifyLevel::Info)
}

/// `:rename <name>`, edit-mode only.
pub fn rename(app: &mut App, name: &str) -> Action {
    let name = name.trim();
    if name.is_empty() {
        return Action::Notify("Name cannot be empty".to_string(), NotifyLevel::Warn);
    }
    let Some(dashboard_id) = require_editing(app) else {
        return Action::Notify(
            "Enter edit mode first (:edit)".to_string(),
            NotifyLevel::Warn,
        );
    };

    let mut attributes = Map::new();
    attributes.insert("name".to_string(), Value::String(name.to_string()));
    app.dispatch(DashboardAction::SetDashboardAttributes {
        id: dashboard_id,
        attributes,
        is_dirty: None,
    });
    Action::Notify(format!("Renamed to {name}"), NotifyLevel::Info)
}

/// `:describe <text>`, edit-mode only. An empty text clears the
/// description.
pub fn describe(app: &mut App, text: &str) -> Action {
    let Some(dashboard_id) = require_editing(app) else {
        return Action::Notify(
            "Enter edit mode first (:edit)".to_string(),
            NotifyLevel::Warn,
        );
    };

    let text = text.trim();
    let mut attributes = Map::new();
    attributes.insert(
        "description".to_string(),
        if text.is_empty() {
            Value::Null
        } else {
            Value::String(text.to_string())
        },
    );
    app.dispatch(DashboardAction::SetDashboardAttributes {
        id: dashboard_id,
        attributes,
        is_dirty: None,
    });
    let message = if text.is_empty() {
        "Description cleared".to_string()
    } else {
        "Description updated".to_string()
    };
    Action::Notify(message, NotifyLevel::Info)
}

/// `:addfilter` opens the parameter kind popover.
pub fn open_add_filter(app: &mut App) -> Action {
    if require_editing(app).is_none() {
        return Action::Notify(
            "Enter edit mode first (:edit)".to_string(),
            NotifyLevel::Warn,
        );
    }
    app.add_parameter_popover.reset();
    app.dispatch(DashboardAction::ShowAddParameterPopover);
    Action::None
}

/// Append a new parameter of the chosen kind to the dashboard being
/// edited. Called when the popover commits a choice.
pub fn add_parameter(app: &mut App, kind: &str, label: &str) -> Action {
    let Some(dashboard_id) = require_editing(app) else {
        app.dispatch(DashboardAction::HideAddParameterPopover);
        return Action::Notify(
            "Enter edit mode first (:edit)".to_string(),
            NotifyLevel::Warn,
        );
    };
    let Some(dashboard) = app.current_dashboard() else {
        app.dispatch(DashboardAction::HideAddParameterPopover);
        return Action::Notify("No dashboard open".to_string(), NotifyLevel::Warn);
    };

    let parameter = Parameter {
        id: format!("p{}", Utc::now().timestamp_millis()),
        name: label.to_string(),
        slug: label.to_lowercase().replace(' ', "_"),
        kind: kind.to_string(),
        default: None,
    };
    let mut parameters = dashboard.parameters.clone();
    parameters.push(parameter);

    let mut attributes = Map::new();
    match serde_json::to_value(&parameters) {
        Ok(parameters) => {
            attributes.insert("parameters".to_string(), parameters);
        }
        Err(err) => {
            app.dispatch(DashboardAction::HideAddParameterPopover);
            return Action::Notify(format!("Add filter failed: {err}"), NotifyLevel::Error);
        }
    }
    app.dispatch(DashboardAction::SetDashboardAttributes {
        id: dashboard_id,
        attributes,
        is_dirty: None,
    });
    app.dispatch(DashboardAction::HideAddParameterPopover);
    Action::Notify(format!("Added filter {label}"), NotifyLevel::Info)
}

/// Move the selected card on the grid, one cell at a time. Keeps the
/// selection on the card as it changes position in draw order.
pub fn nudge_card(app: &mut App, dx: i64, dy: i64) -> Action {
    if require_editing(app).is_none() {
        return Action::Notify(
            "Enter edit mode first (:edit)".to_string(),
            NotifyLevel::Warn,
        );
    }
    let Some(dashcard) = app.selected_dashcard() else {
        return Action::None;
    };
    let dashcard_id = dashcard.id;
    let col = (dashcard.col as i64 + dx).max(0);
    let row = (dashcard.row as i64 + dy).max(0);
    if col == dashcard.col as i64 && row == dashcard.row as i64 {
        return Action::None;
    }

    let mut attributes = Map::new();
    attributes.insert("col".to_string(), Value::from(col));
    attributes.insert("row".to_string(), Value::from(row));
    app.dispatch(DashboardAction::SetDashcardAttributes {
        id: dashcard_id,
        attributes,
    });

    if let Some(index) = app
        .ordered_dashcards()
        .iter()
        .position(|dc| dc.id == dashcard_id)
    {
        app.selected_card = index;
    }
    Action::None
}

fn require_editing(app: &App) -> Option<crate::domain::dashboard::DashboardId> {
    if app.store.dashboard().is_editing.is_some() {
        app.current_dashboard_id()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::selectors;
    use serde_json::json;

    fn editing_app() -> App {
        let mut app = App::new();
        app.open_dashboard(101);
        enter(&mut app);
        app
    }

    #[test]
    fn test_rename_outside_edit_mode_warns() {
        let mut app = App::new();
        app.open_dashboard(101);
        let action = rename(&mut app, "New Name");
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Warn)));
    }

    #[test]
    fn test_enter_respects_can_write() {
        let mut app = App::new();
        app.open_dashboard(101);
        let mut attributes = Map::new();
        attributes.insert("can_write".to_string(), json!(false));
        app.dispatch(DashboardAction::SetDashboardAttributes {
            id: 101,
            attributes,
            is_dirty: Some(false),
        });

        let action = enter(&mut app);
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Warn)));
        assert!(app.store.dashboard().is_editing.is_none());
    }

    #[test]
    fn test_cancel_restores_snapshot() {
        let mut app = editing_app();
        rename(&mut app, "Scratch Name");
        nudge_card(&mut app, 1, 0);
        assert!(selectors::has_unsaved_changes(app.store.dashboard()));

        cancel(&mut app);
        let dashboard = app.current_dashboard().unwrap();
        assert_eq!(dashboard.name, "Revenue Overview");
        assert!(app.store.dashboard().is_editing.is_none());
        assert!(!selectors::has_unsaved_changes(app.store.dashboard()));
    }

    #[test]
    fn test_save_clears_dirty_and_leaves_edit_mode() {
        let mut app = editing_app();
        rename(&mut app, "Quarterly Revenue");
        describe(&mut app, "Board deck numbers");

        let action = save(&mut app);
        assert!(matches!(action, Action::None));
        let dashboard = app.current_dashboard().unwrap();
        assert_eq!(dashboard.name, "Quarterly Revenue");
        assert_eq!(dashboard.description.as_deref(), Some("Board deck numbers"));
        assert!(app.store.dashboard().is_editing.is_none());
        assert!(!selectors::has_unsaved_changes(app.store.dashboard()));
    }

    #[test]
    fn test_nudge_moves_selected_card_and_follows_it() {
        let mut app = editing_app();
        let before = app.selected_dashcard().unwrap().id;
        nudge_card(&mut app, 0, 5);

        let moved = app.store.dashboard().dashcards.get(&before).unwrap();
        assert_eq!(moved.row, 5);
        assert!(moved.is_dirty);
        assert_eq!(app.selected_dashcard().unwrap().id, before);
    }

    #[test]
    fn test_add_parameter_appends_definition() {
        let mut app = editing_app();
        open_add_filter(&mut app);
        assert!(app.store.dashboard().is_add_parameter_popover_open);

        add_parameter(&mut app, "date/all-options", "Date");
        let dashboard = app.current_dashboard().unwrap();
        assert_eq!(dashboard.parameters.len(), 3);
        assert!(!app.store.dashboard().is_add_parameter_popover_open);
    }
}
